//! untextract CLI - rebuild documents from Textract analysis responses

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untextract::render::{self, ArtifactSink, DirectorySink, OutputGenerator};
use untextract::{
    parse_file_with_options, Document, JsonFormat, OutputOptions, PageSelection, ParseOptions,
    RenderOptions,
};

#[derive(Parser)]
#[command(name = "untextract")]
#[command(version)]
#[command(about = "Rebuild documents from Textract responses as text, JSON and CSV", long_about = None)]
struct Cli {
    /// Input response JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the full artifact set (per-page JSON, text, CSV and full response)
    Convert {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Skip forms.csv
        #[arg(long)]
        no_forms: bool,

        /// Skip tables.csv
        #[arg(long)]
        no_tables: bool,

        /// Document identifier used to tag raw response artifacts
        #[arg(long, env = "UNTEXTRACT_DOCUMENT_ID")]
        document_id: Option<String>,

        /// Artifact path prefix
        #[arg(long, env = "UNTEXTRACT_PREFIX", default_value = "ocr-analysis")]
        prefix: String,

        /// Keep going on malformed table layouts
        #[arg(long)]
        lenient: bool,
    },

    /// Print the document text
    Text {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Keep going on malformed table layouts
        #[arg(long)]
        lenient: bool,
    },

    /// Print the document model as JSON
    Json {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Keep going on malformed table layouts
        #[arg(long)]
        lenient: bool,
    },

    /// Print form fields as CSV
    Forms {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (all pages if not specified)
        #[arg(long)]
        page: Option<u32>,

        /// Keep going on malformed table layouts
        #[arg(long)]
        lenient: bool,
    },

    /// Print tables as CSV
    Tables {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (all pages if not specified)
        #[arg(long)]
        page: Option<u32>,

        /// Keep going on malformed table layouts
        #[arg(long)]
        lenient: bool,
    },

    /// Show document information
    Info {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Keep going on malformed table layouts
        #[arg(long)]
        lenient: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            no_forms,
            no_tables,
            document_id,
            prefix,
            lenient,
        }) => {
            let mut options = OutputOptions::new()
                .with_prefix(prefix)
                .with_forms(!no_forms)
                .with_tables(!no_tables);
            if let Some(id) = document_id {
                options = options.with_document_id(&id);
            }
            cmd_convert(&input, output.as_deref(), options, lenient)
        }
        Some(Commands::Text {
            input,
            output,
            pages,
            lenient,
        }) => cmd_text(&input, output.as_deref(), pages.as_deref(), lenient),
        Some(Commands::Json {
            input,
            output,
            compact,
            lenient,
        }) => cmd_json(&input, output.as_deref(), compact, lenient),
        Some(Commands::Forms {
            input,
            page,
            lenient,
        }) => cmd_forms(&input, page, lenient),
        Some(Commands::Tables {
            input,
            page,
            lenient,
        }) => cmd_tables(&input, page, lenient),
        Some(Commands::Info { input, lenient }) => cmd_info(&input, lenient),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), OutputOptions::default(), false)
            } else {
                println!("{}", "Usage: untextract <FILE> [OUTPUT]".yellow());
                println!("       untextract --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: OutputOptions,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    let doc = parse_file_with_options(input, parse_options(lenient))?;
    log::debug!("{}: {} page(s)", input.display(), doc.page_count());

    // Render everything before the first write
    let artifacts = OutputGenerator::new(&doc, options).artifacts()?;

    let pb = ProgressBar::new(artifacts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut sink = DirectorySink::new(&output_dir);
    for artifact in &artifacts {
        pb.set_message(artifact.path.clone());
        sink.write(artifact)?;
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    let last = artifacts.len().saturating_sub(1);
    for (i, artifact) in artifacts.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), artifact.path);
    }

    Ok(())
}

/// Table layout errors fail the parse unless `lenient` is set.
fn parse_options(lenient: bool) -> ParseOptions {
    if lenient {
        ParseOptions::new().lenient()
    } else {
        ParseOptions::new()
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p)?
    } else {
        PageSelection::All
    };

    let doc = parse_file_with_options(input, parse_options(lenient))?;
    let render_options = RenderOptions::new().with_pages(page_selection);
    let text = render::to_text(&doc, &render_options)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse_options(lenient))?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_forms(
    input: &Path,
    page: Option<u32>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse_options(lenient))?;
    for (page_num, page) in selected_pages(&doc, page)? {
        println!("{}", format!("Page {}", page_num).cyan().bold());
        print!("{}", render::forms_to_csv(page)?);
    }
    Ok(())
}

fn cmd_tables(
    input: &Path,
    page: Option<u32>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse_options(lenient))?;
    for (page_num, page) in selected_pages(&doc, page)? {
        println!("{}", format!("Page {}", page_num).cyan().bold());
        print!("{}", render::tables_to_csv(page)?);
    }
    Ok(())
}

fn selected_pages(
    doc: &Document,
    page: Option<u32>,
) -> Result<Vec<(u32, &untextract::Page)>, Box<dyn std::error::Error>> {
    match page {
        Some(n) => {
            let found = doc
                .get_page(n)
                .ok_or_else(|| format!("Page {} not found ({} pages)", n, doc.page_count()))?;
            Ok(vec![(n, found)])
        }
        None => Ok((1..).zip(doc.pages.iter()).collect()),
    }
}

fn cmd_info(input: &Path, lenient: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse_options(lenient))?;
    let stats = doc.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Responses".bold(), doc.responses.len());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Blocks".bold(), stats.block_count);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Form fields".bold(), stats.field_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Cells".bold(), stats.cell_count);
    println!("{}: {}", "Selection marks".bold(), stats.selection_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untextract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Textract response reconstruction tool");
}

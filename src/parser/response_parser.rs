//! Document parser over Textract responses.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{Document, Page};

use super::block::Response;
use super::index::BlockIndex;
use super::options::ParseOptions;
use super::page_assembler::PageAssembler;

/// A JSON payload holding one response or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<Response>),
    One(Box<Response>),
}

impl From<Payload> for Vec<Response> {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Many(responses) => responses,
            Payload::One(response) => vec![*response],
        }
    }
}

/// Rebuilds a [`Document`] from one or more analysis responses.
pub struct ResponseParser {
    responses: Vec<Response>,
    options: ParseOptions,
}

impl ResponseParser {
    /// Open a response JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a response JSON file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader_with_options(BufReader::new(file), options)
    }

    /// Parse response JSON from a string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_options(json, ParseOptions::default())
    }

    /// Parse response JSON from a string with custom options.
    pub fn from_json_with_options(json: &str, options: ParseOptions) -> Result<Self> {
        let payload: Payload = serde_json::from_str(json)?;
        Ok(Self::from_responses_with_options(payload.into(), options))
    }

    /// Parse response JSON from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse response JSON from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let payload: Payload = serde_json::from_slice(data)?;
        Ok(Self::from_responses_with_options(payload.into(), options))
    }

    /// Parse response JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse response JSON from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Self> {
        let payload: Payload = serde_json::from_reader(reader)?;
        Ok(Self::from_responses_with_options(payload.into(), options))
    }

    /// Use already decoded responses.
    pub fn from_responses(responses: Vec<Response>) -> Self {
        Self::from_responses_with_options(responses, ParseOptions::default())
    }

    /// Use already decoded responses with custom options.
    pub fn from_responses_with_options(responses: Vec<Response>, options: ParseOptions) -> Self {
        Self { responses, options }
    }

    /// The responses this parser reads from.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Assemble the document.
    ///
    /// Produces one page per page group, in source order. The only failure is
    /// a table whose cells cannot be grouped in strict mode; unresolvable
    /// references and empty keys are skipped.
    pub fn parse(&self) -> Result<Document> {
        let pages = self.assemble_pages()?;
        Ok(Document {
            pages,
            responses: self.responses.clone(),
        })
    }

    /// Assemble the document, consuming the parser.
    pub fn into_document(self) -> Result<Document> {
        let pages = self.assemble_pages()?;
        Ok(Document {
            pages,
            responses: self.responses,
        })
    }

    /// Page count reported by the response metadata.
    ///
    /// Every result page of a paginated analysis repeats the document total,
    /// so the largest reported value is taken.
    pub fn reported_pages(&self) -> Option<u32> {
        self.responses.iter().filter_map(Response::reported_pages).max()
    }

    fn assemble_pages(&self) -> Result<Vec<Page>> {
        let index = BlockIndex::build(&self.responses);
        let assembler = PageAssembler::new(&index, self.options.error_mode);
        let groups = index.page_groups();

        let mut pages = Vec::with_capacity(groups.len());
        for (i, group) in groups.iter().enumerate() {
            let page_num = i as u32 + 1;
            if !self.options.pages.includes(page_num) {
                continue;
            }
            pages.push(assembler.assemble(group)?);
        }

        if let Some(reported) = self.reported_pages().filter(|&n| n > 0 && n != groups.len() as u32) {
            log::warn!(
                "Responses report {} page(s) but {} page group(s) were found",
                reported,
                groups.len()
            );
        }
        log::debug!("Assembled {} of {} page(s)", pages.len(), groups.len());

        Ok(pages)
    }
}

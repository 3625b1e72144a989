//! Geometry types.

use serde::{Deserialize, Serialize};

use crate::parser::RawGeometry;

/// Location of an entity on its page.
///
/// All coordinates are ratios of the page width/height (0..1).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Coarse axis-aligned box
    pub bounding_box: BoundingBox,

    /// Fine-grained outline, in source order
    pub polygon: Vec<Point>,
}

impl Geometry {
    /// Create a geometry from a box and its outline.
    pub fn new(bounding_box: BoundingBox, polygon: Vec<Point>) -> Self {
        Self {
            bounding_box,
            polygon,
        }
    }
}

impl From<&RawGeometry> for Geometry {
    fn from(raw: &RawGeometry) -> Self {
        let bb = raw.bounding_box;
        Self {
            bounding_box: BoundingBox::new(bb.width, bb.height, bb.left, bb.top),
            polygon: raw.polygon.iter().map(|p| Point::new(p.x, p.y)).collect(),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(width: f64, height: f64, left: f64, top: f64) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Area as a fraction of the page.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A polygon vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

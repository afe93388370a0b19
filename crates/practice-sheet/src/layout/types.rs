//! Geometry primitives produced by the layout engine
//!
//! These are plain values: they carry no identity beyond their position
//! and are regenerated on every layout pass.

use crate::types::{Margins, PageSpec};

/// A straight line from (x1, y1) to (x2, y2)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn horizontal(y: f32, x1: f32, x2: f32) -> Self {
        Self::new(x1, y, x2, y)
    }

    pub fn vertical(x: f32, y1: f32, y2: f32) -> Self {
        Self::new(x, y1, x, y2)
    }

    /// Signed horizontal travel from the first point to the second
    pub fn dx(&self) -> f32 {
        self.x2 - self.x1
    }
}

/// A point on the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangular area in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The page region inside all four margins.
///
/// Always derived from a page and its margins, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WritingArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl WritingArea {
    pub fn new(page: &PageSpec, margins: &Margins) -> Self {
        Self {
            left: margins.left_mm,
            top: margins.top_mm,
            right: page.width_mm - margins.right_mm,
            bottom: page.height_mm - margins.bottom_mm,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width(), self.height())
    }
}

/// Guide line positions for one writing row.
///
/// All values are vertical offsets from the page top, so smaller means
/// higher on the page:
/// `ascender_line < cap_height_line <= x_height_line < baseline < descender_line`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub baseline: f32,
    pub x_height_line: f32,
    pub cap_height_line: f32,
    pub ascender_line: f32,
    pub descender_line: f32,
    /// Position of the row in the requested sequence
    pub row_index: usize,
    /// Label group (rows are labelled three at a time)
    pub group_index: usize,
    /// Position inside the label group
    pub line_index: usize,
}

impl RowGeometry {
    /// Height of the ascender-to-descender envelope
    pub fn envelope_height(&self) -> f32 {
        self.descender_line - self.ascender_line
    }
}

/// Grid rules inside the writing area
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLines {
    pub vertical: Vec<Segment>,
    pub horizontal: Vec<Segment>,
}

/// The four margin boundary lines, each spanning the whole page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginGuides {
    pub top: Segment,
    pub bottom: Segment,
    pub left: Segment,
    pub right: Segment,
}

impl MarginGuides {
    pub fn segments(&self) -> [Segment; 4] {
        [self.top, self.bottom, self.left, self.right]
    }
}

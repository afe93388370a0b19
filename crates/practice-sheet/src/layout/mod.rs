//! Geometry layout engine for practice sheets
//!
//! Every function here is a pure function of the page size and the
//! typography settings:
//! - Page dimensions (paper size, orientation, custom size)
//! - Writing rows (baseline, x-height, cap-height, ascender, descender)
//! - Slant guides, grid rules, margin guides
//! - Masks covering the gaps between rows
//!
//! Coordinates are millimetres from the top-left corner of the page,
//! with y growing downward.

mod grid;
mod margins;
mod masks;
mod page;
mod rows;
mod slant;
mod types;

pub use grid::*;
pub use margins::*;
pub use masks::*;
pub use page::*;
pub use rows::*;
pub use slant::*;
pub use types::*;

//! Shared constants for sheet layout and rendering
//!
//! This module centralizes magic numbers and constants used by the
//! layout engine and the render backends.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Layout
// =============================================================================

/// Slack allowed when testing whether a row still fits above the bottom
/// margin. Row positions are accumulated in f32.
pub const FIT_TOLERANCE_MM: f32 = 1e-3;

/// Rows are labelled in groups of this many
pub const ROWS_PER_LABEL_GROUP: usize = 3;

/// Upper bound on generated slant lines. Only reached for near-horizontal
/// angles far outside the supported 45°–135° range.
pub const MAX_SLANT_LINES: usize = 10_000;

/// Upper bound on grid rules along one axis. A dotted grid holds at most
/// the square of this.
pub const MAX_GRID_LINES: usize = 1_000;

// =============================================================================
// Accepted Ranges
// =============================================================================

pub const X_HEIGHT_RANGE_MM: (f32, f32) = (2.5, 8.0);
pub const ASCENDER_RANGE_MM: (f32, f32) = (2.0, 30.0);
pub const DESCENDER_RANGE_MM: (f32, f32) = (2.0, 12.0);
pub const NUMBER_OF_LINES_RANGE: (usize, usize) = (5, 25);
pub const SLANT_ANGLE_RANGE_DEG: (f32, f32) = (45.0, 135.0);
pub const MARGIN_RANGE_MM: (f32, f32) = (5.0, 50.0);
pub const BASELINE_THICKNESS_RANGE_MM: (f32, f32) = (0.1, 2.0);
pub const CUSTOM_PAGE_RANGE_MM: (f32, f32) = (50.0, 500.0);

/// Smallest distance clamping keeps between the x-height and ascender lines
pub const MIN_ASCENDER_CLEARANCE_MM: f32 = 0.5;

/// Smallest distance clamping keeps between the cap-height and ascender lines
pub const MIN_CAP_CLEARANCE_MM: f32 = 0.1;

/// Writing area left along a page side when clamping oversized margins
pub const MIN_WRITING_EXTENT_MM: f32 = 10.0;

// =============================================================================
// Guide Styling
// =============================================================================

/// Stroke width for margin guides (mm)
pub const MARGIN_LINE_WIDTH_MM: f32 = 0.3;

/// Dash pattern for margin guides (mm on, mm off)
pub const MARGIN_DASH_MM: [f32; 2] = [3.0, 2.0];

/// Opacity of the margin guide layer
pub const MARGIN_LAYER_OPACITY: f32 = 0.6;

/// Stroke width for slant lines (mm)
pub const SLANT_LINE_WIDTH_MM: f32 = 0.2;

/// Stroke width for grid rules (mm)
pub const GRID_LINE_WIDTH_MM: f32 = 0.1;

/// Dash pattern for grid rules (mm on, mm off)
pub const GRID_DASH_MM: [f32; 2] = [1.0, 1.0];

/// Radius of a dotted-grid dot (mm)
pub const GRID_DOT_RADIUS_MM: f32 = 0.25;

/// Stroke width for the cap-height line (mm)
pub const CAP_HEIGHT_LINE_WIDTH_MM: f32 = 0.2;

/// Dash pattern for the cap-height line (mm on, mm off)
pub const CAP_HEIGHT_DASH_MM: [f32; 2] = [4.0, 2.0];

// =============================================================================
// Labels and Legend
// =============================================================================

/// Horizontal distance of row labels left of the writing area (mm)
pub const LABEL_OFFSET_MM: f32 = 12.0;

/// Row label font size (mm)
pub const LABEL_FONT_SIZE_MM: f32 = 2.5;

/// Opacity of the row label layer
pub const LABEL_LAYER_OPACITY: f32 = 0.7;

/// Gap between the writing area and the legend box (mm)
pub const LEGEND_OFFSET_MM: f32 = 2.0;

/// Legend box size (mm)
pub const LEGEND_WIDTH_MM: f32 = 65.0;
pub const LEGEND_HEIGHT_MM: f32 = 12.0;

pub const LEGEND_TITLE: &str = "Handwriting Practice Sheet";

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

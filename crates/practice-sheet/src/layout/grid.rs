//! Square grid inside the writing area

use crate::constants::{FIT_TOLERANCE_MM, MAX_GRID_LINES};
use crate::options::TypographySettings;
use crate::types::PageSpec;

use super::{GridLines, Point, Segment, WritingArea};

/// Generate grid rules at `grid_spacing_mm` intervals.
///
/// Vertical rules start at the left margin and horizontal rules at the top
/// margin; each spans the full writing area in the other direction. A rule
/// that lands on the far margin is included.
///
/// # Arguments
/// * `page` - Resolved page dimensions
/// * `settings` - Margins and grid spacing
pub fn generate_grid(page: &PageSpec, settings: &TypographySettings) -> GridLines {
    let area = WritingArea::new(page, &settings.margins);
    let spacing = settings.grid_spacing_mm;

    let vertical = grid_positions(area.left, area.right, spacing)
        .map(|x| Segment::vertical(x, area.top, area.bottom))
        .collect();
    let horizontal = grid_positions(area.top, area.bottom, spacing)
        .map(|y| Segment::horizontal(y, area.left, area.right))
        .collect();

    GridLines {
        vertical,
        horizontal,
    }
}

/// Generate a dot at every grid intersection, row by row.
pub fn generate_grid_dots(page: &PageSpec, settings: &TypographySettings) -> Vec<Point> {
    let area = WritingArea::new(page, &settings.margins);
    let spacing = settings.grid_spacing_mm;

    let xs: Vec<f32> = grid_positions(area.left, area.right, spacing).collect();
    grid_positions(area.top, area.bottom, spacing)
        .flat_map(|y| xs.iter().map(move |&x| Point::new(x, y)))
        .collect()
}

/// Positions `start + k * spacing` up to and including `end`.
///
/// Positions are computed from the index rather than accumulated so the
/// last rule does not drift. The count is capped at `MAX_GRID_LINES`.
fn grid_positions(start: f32, end: f32, spacing: f32) -> impl Iterator<Item = f32> {
    let count = if spacing > 0.0 && end >= start {
        let steps = ((end - start + FIT_TOLERANCE_MM) / spacing).floor();
        let wanted = (steps as usize).saturating_add(1);
        if wanted > MAX_GRID_LINES {
            log::warn!(
                "Grid spacing {} mm asks for {} rules, capping at {}",
                spacing,
                wanted,
                MAX_GRID_LINES
            );
            MAX_GRID_LINES
        } else {
            wanted
        }
    } else {
        0
    };
    (0..count).map(move |k| start + k as f32 * spacing)
}

//! Slant guide lines

use crate::constants::MAX_SLANT_LINES;
use crate::options::TypographySettings;
use crate::types::PageSpec;

use super::{Segment, WritingArea};

/// Generate the parallel slant guides for the writing area.
///
/// The angle is measured from the baseline: 90° is upright and gives no
/// lines at all, smaller angles lean to the right. Each line runs from the
/// top of the writing area to the bottom, and the set extends past both
/// sides so that clipping to the writing area leaves no uncovered corner.
/// Lines are ordered left to right.
///
/// Horizontal angles, non-positive spacing and a non-finite projection all
/// yield an empty set.
pub fn generate_slant_lines(page: &PageSpec, settings: &TypographySettings) -> Vec<Segment> {
    let angle = settings.slant_angle_degrees;
    let spacing = settings.slant_line_spacing_mm;

    if angle == 90.0 || angle <= 0.0 || angle >= 180.0 || spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }

    let area = WritingArea::new(page, &settings.margins);
    let angle_from_vertical = (90.0 - angle).to_radians();
    let projection = area.height() * angle_from_vertical.tan();
    if !projection.is_finite() {
        return Vec::new();
    }

    let reach = projection.abs();
    let start_x = area.left - reach;
    let wanted = ((area.width() + 2.0 * reach) / spacing).ceil() + 2.0;

    let count = if wanted > MAX_SLANT_LINES as f32 {
        log::warn!(
            "Slant settings ask for {} lines, capping at {}",
            wanted,
            MAX_SLANT_LINES
        );
        MAX_SLANT_LINES
    } else {
        wanted.max(0.0) as usize
    };

    (0..count)
        .map(|i| {
            let x = start_x + i as f32 * spacing;
            Segment::new(x, area.top, x + projection, area.bottom)
        })
        .collect()
}

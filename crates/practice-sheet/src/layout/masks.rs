//! Masks over the space between writing rows
//!
//! Slant guides are generated across the whole writing area. Painting
//! these rectangles over them afterwards leaves slant guides only inside
//! the row envelopes.

use crate::options::TypographySettings;
use crate::types::PageSpec;

use super::{Rect, RowGeometry, WritingArea};

/// Generate one rectangle per gap: above the first row, between each pair
/// of rows, and below the last row.
///
/// Every rectangle spans the writing area width. Gaps with no height are
/// skipped, and no rows means no masks.
///
/// # Arguments
/// * `rows` - Rows in top-to-bottom order, as produced by `layout_rows`
/// * `page` - Resolved page dimensions
/// * `settings` - Margins for the writing area bounds
pub fn generate_row_spacing_masks(
    rows: &[RowGeometry],
    page: &PageSpec,
    settings: &TypographySettings,
) -> Vec<Rect> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Vec::new();
    };

    let area = WritingArea::new(page, &settings.margins);
    let band = |top: f32, bottom: f32| Rect::new(area.left, top, area.width(), bottom - top);

    std::iter::once(band(area.top, first.ascender_line))
        .chain(
            rows.windows(2)
                .map(|pair| band(pair[0].descender_line, pair[1].ascender_line)),
        )
        .chain(std::iter::once(band(last.descender_line, area.bottom)))
        .filter(|rect| rect.height > 0.0)
        .collect()
}

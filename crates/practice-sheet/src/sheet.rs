//! Full-sheet geometry pipeline

use crate::layout::*;
use crate::options::{SheetOptions, TypographySettings};
use crate::types::{GridStyle, PageSpec};

/// Everything a renderer needs to draw one sheet.
///
/// Recomputed from scratch whenever the settings change.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGeometry {
    pub page: PageSpec,
    pub writing_area: WritingArea,
    pub rows: Vec<RowGeometry>,
    pub slant_lines: Vec<Segment>,
    pub grid: GridLines,
    /// Only populated for the dotted grid style
    pub grid_dots: Vec<Point>,
    pub margin_guides: MarginGuides,
    pub masks: Vec<Rect>,
}

impl SheetGeometry {
    /// Run every generator against one page and one settings snapshot
    pub fn compute(page: PageSpec, settings: &TypographySettings) -> Self {
        let rows = layout_rows(&page, settings);
        let masks = generate_row_spacing_masks(&rows, &page, settings);
        let grid_dots = match settings.display.grid_style {
            GridStyle::Dotted => generate_grid_dots(&page, settings),
            GridStyle::Lines => Vec::new(),
        };

        let geometry = Self {
            page,
            writing_area: WritingArea::new(&page, &settings.margins),
            slant_lines: generate_slant_lines(&page, settings),
            grid: generate_grid(&page, settings),
            grid_dots,
            margin_guides: generate_margin_guides(&page, settings),
            rows,
            masks,
        };

        log::debug!(
            "Composed {} x {} mm sheet: {} rows, {} slant lines, {} masks",
            page.width_mm,
            page.height_mm,
            geometry.rows.len(),
            geometry.slant_lines.len(),
            geometry.masks.len()
        );

        geometry
    }
}

/// Resolve the page and compute the sheet geometry for a set of options
pub fn compose_sheet(options: &SheetOptions) -> SheetGeometry {
    SheetGeometry::compute(options.page_spec(), &options.typography)
}

use crate::options::SheetOptions;
use crate::sheet::compose_sheet;
use crate::types::*;

/// Calculate statistics for a sheet
pub fn calculate_statistics(options: &SheetOptions) -> SheetStatistics {
    let geometry = compose_sheet(options);
    let rows = &geometry.rows;

    // Pitch and gap are measured between the first two rows; every
    // distribution mode keeps them constant down the page
    let (row_pitch_mm, inter_row_gap_mm) = match rows.as_slice() {
        [first, second, ..] => (
            Some(second.baseline - first.baseline),
            Some(second.ascender_line - first.descender_line),
        ),
        _ => (None, None),
    };

    SheetStatistics {
        page: geometry.page,
        writing_width_mm: geometry.writing_area.width(),
        writing_height_mm: geometry.writing_area.height(),
        requested_rows: options.typography.number_of_lines,
        produced_rows: rows.len(),
        row_pitch_mm,
        inter_row_gap_mm,
        slant_lines: geometry.slant_lines.len(),
        vertical_grid_lines: geometry.grid.vertical.len(),
        horizontal_grid_lines: geometry.grid.horizontal.len(),
        row_spacing_masks: geometry.masks.len(),
    }
}

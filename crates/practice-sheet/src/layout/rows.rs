//! Writing row layout
//!
//! This module places the writing rows down the page. Each row is a
//! baseline with its x-height, cap-height, ascender and descender lines.
//! Three distribution policies decide where the first baseline sits and
//! how far apart consecutive baselines are.

use crate::constants::{FIT_TOLERANCE_MM, ROWS_PER_LABEL_GROUP};
use crate::options::TypographySettings;
use crate::types::{DistributionMode, PageSpec};

use super::{RowGeometry, WritingArea};

/// Where the first baseline sits and the distance between baselines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    /// Distance from the top margin to the first baseline
    pub leading_mm: f32,
    /// Baseline-to-baseline distance
    pub pitch_mm: f32,
}

// =============================================================================
// Row Layout
// =============================================================================

/// Lay out the writing rows for a page.
///
/// Returns at most `number_of_lines` rows in top-to-bottom order. Rows whose
/// descender would cross the bottom margin are left out, so callers can
/// detect truncation by comparing the length with `number_of_lines`.
///
/// # Arguments
/// * `page` - Resolved page dimensions
/// * `settings` - Row metrics, margins and distribution mode
pub fn layout_rows(page: &PageSpec, settings: &TypographySettings) -> Vec<RowGeometry> {
    let requested = settings.number_of_lines;
    if requested == 0 {
        return Vec::new();
    }

    let placement = row_placement(page, settings);
    let first_baseline = settings.margins.top_mm + placement.leading_mm;
    let bottom_limit = page.height_mm - settings.margins.bottom_mm + FIT_TOLERANCE_MM;

    let rows: Vec<RowGeometry> = (0..requested)
        .map(|i| build_row(i, first_baseline + i as f32 * placement.pitch_mm, settings))
        .filter(|row| row.descender_line <= bottom_limit)
        .collect();

    if rows.len() < requested {
        log::warn!(
            "{} of {} rows fit ({} mode, pitch {:.2} mm)",
            rows.len(),
            requested,
            settings.distribution.name(),
            placement.pitch_mm
        );
    }

    rows
}

/// Compute the leading offset and pitch for the configured distribution.
///
/// # Arguments
/// * `page` - Resolved page dimensions
/// * `settings` - Row metrics, margins, distribution mode and tolerances
pub fn row_placement(page: &PageSpec, settings: &TypographySettings) -> RowPlacement {
    let available = WritingArea::new(page, &settings.margins).height();

    match settings.distribution {
        DistributionMode::EqualGap => equal_gap_placement(available, settings),
        DistributionMode::FillAvailable => fill_available_placement(available, settings),
        DistributionMode::FixedPitch { pitch_mm } => RowPlacement {
            leading_mm: settings.ascender_height_mm,
            pitch_mm,
        },
    }
}

fn build_row(row_index: usize, baseline: f32, settings: &TypographySettings) -> RowGeometry {
    RowGeometry {
        baseline,
        x_height_line: baseline - settings.x_height_mm,
        cap_height_line: baseline - settings.cap_height_mm,
        ascender_line: baseline - settings.ascender_height_mm,
        descender_line: baseline + settings.descender_depth_mm,
        row_index,
        group_index: row_index / ROWS_PER_LABEL_GROUP,
        line_index: row_index % ROWS_PER_LABEL_GROUP,
    }
}

// =============================================================================
// Distribution Policies
// =============================================================================

/// Rows sized to their envelope with gaps between them.
///
/// When the rows fit, the leftover height is split evenly across all
/// `n + 1` gaps (above the first row, between rows, below the last row).
/// If an even split would squeeze the gaps below the minimum, the inner
/// gaps keep the minimum and the block of rows is centred instead. If the
/// rows do not fit at all, every gap is the minimum and the rows that run
/// off the bottom get dropped.
fn equal_gap_placement(available: f32, settings: &TypographySettings) -> RowPlacement {
    let n = settings.number_of_lines as f32;
    let row_height = settings.row_height_mm();
    let min_gap = settings.tolerances.min_row_gap_mm;

    let uniform_gap = (available - n * row_height) / (n + 1.0);

    let (edge_gap, gap) = if uniform_gap >= min_gap {
        (uniform_gap, uniform_gap)
    } else {
        let needed = n * row_height + (n - 1.0) * min_gap;
        if needed <= available {
            ((available - needed) / 2.0, min_gap)
        } else {
            (min_gap, min_gap)
        }
    };

    RowPlacement {
        leading_mm: edge_gap + settings.ascender_height_mm,
        pitch_mm: row_height + gap,
    }
}

/// Baselines spread from the first ascender down to a safety buffer above
/// the bottom margin.
///
/// The pitch never drops below the envelope plus the configured clearance;
/// when that floor kicks in the later rows no longer fit and are dropped.
fn fill_available_placement(available: f32, settings: &TypographySettings) -> RowPlacement {
    let tolerances = &settings.tolerances;
    let min_pitch = settings.row_height_mm() + tolerances.fill_min_clearance_mm;

    let pitch_mm = if settings.number_of_lines > 1 {
        let bottom_reserve = settings.descender_depth_mm + tolerances.fill_bottom_buffer_mm;
        let spread = available - settings.ascender_height_mm - bottom_reserve;
        (spread / (settings.number_of_lines - 1) as f32).max(min_pitch)
    } else {
        min_pitch
    };

    RowPlacement {
        leading_mm: settings.ascender_height_mm,
        pitch_mm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Margins, RowTolerances};

    const EPS: f32 = 1e-3;

    fn a4() -> PageSpec {
        PageSpec::new(210.0, 297.0)
    }

    fn settings(lines: usize, distribution: DistributionMode) -> TypographySettings {
        TypographySettings {
            number_of_lines: lines,
            distribution,
            margins: Margins {
                top_mm: 25.0,
                bottom_mm: 25.0,
                left_mm: 25.0,
                right_mm: 20.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_equal_gap_default_a4_fits_all_rows() {
        let rows = layout_rows(&a4(), &settings(12, DistributionMode::EqualGap));
        assert_eq!(rows.len(), 12);
        assert!(rows[0].ascender_line >= 25.0 - EPS);
        assert!(rows[11].descender_line <= 272.0 + EPS);
    }

    #[test]
    fn test_equal_gap_spans_writing_area() {
        let rows = layout_rows(&a4(), &settings(12, DistributionMode::EqualGap));
        // (247 - 12 * 15) / 13
        let gap = 67.0 / 13.0;
        assert!((rows[0].ascender_line - (25.0 + gap)).abs() < EPS);
        assert!((rows[11].descender_line - (272.0 - gap)).abs() < EPS);
        for pair in rows.windows(2) {
            assert!((pair[1].ascender_line - pair[0].descender_line - gap).abs() < EPS);
        }
    }

    #[test]
    fn test_equal_gap_centres_rows_when_even_split_is_too_tight() {
        let mut s = settings(12, DistributionMode::EqualGap);
        s.ascender_height_mm = 14.0;
        s.descender_depth_mm = 6.0;
        s.cap_height_mm = 10.0;
        s.tolerances = RowTolerances {
            min_row_gap_mm: 0.6,
            ..Default::default()
        };

        // 12 * 20 + 11 * 0.6 = 246.6 of 247 available
        let rows = layout_rows(&a4(), &s);
        assert_eq!(rows.len(), 12);
        assert!((rows[0].ascender_line - 25.2).abs() < EPS);
        assert!((rows[11].descender_line - 271.8).abs() < EPS);
        assert!((rows[1].ascender_line - rows[0].descender_line - 0.6).abs() < EPS);
    }

    #[test]
    fn test_equal_gap_drops_rows_that_overflow() {
        let rows = layout_rows(&a4(), &settings(25, DistributionMode::EqualGap));
        // Descender of row i = 25 + 0.5 + 15 + 15.5 * i <= 272
        assert_eq!(rows.len(), 15);
        assert!(rows.last().unwrap().descender_line <= 272.0 + EPS);
    }

    #[test]
    fn test_fill_available_reaches_bottom_buffer() {
        let rows = layout_rows(&a4(), &settings(12, DistributionMode::FillAvailable));
        assert_eq!(rows.len(), 12);
        // First baseline sits one ascender below the top margin
        assert!((rows[0].baseline - 35.0).abs() < EPS);
        // Last descender stops 5mm above the bottom margin
        assert!((rows[11].descender_line - 267.0).abs() < EPS);
    }

    #[test]
    fn test_fill_available_clamps_pitch_and_drops_rows() {
        let s = settings(25, DistributionMode::FillAvailable);
        let placement = row_placement(&a4(), &s);
        assert!((placement.pitch_mm - 18.0).abs() < EPS);

        let rows = layout_rows(&a4(), &s);
        // Descender of row i = 40 + 18 * i <= 272
        assert_eq!(rows.len(), 13);
    }

    #[test]
    fn test_fill_available_single_row() {
        let rows = layout_rows(&a4(), &settings(1, DistributionMode::FillAvailable));
        assert_eq!(rows.len(), 1);
        assert!((rows[0].baseline - 35.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_pitch() {
        let s = settings(12, DistributionMode::FixedPitch { pitch_mm: 40.0 });
        let rows = layout_rows(&a4(), &s);
        // Descender of row i = 40 + 40 * i <= 272
        assert_eq!(rows.len(), 6);
        assert!((rows[1].baseline - rows[0].baseline - 40.0).abs() < EPS);
    }

    #[test]
    fn test_row_lines_follow_metrics() {
        let rows = layout_rows(&a4(), &settings(5, DistributionMode::EqualGap));
        for row in &rows {
            assert!((row.baseline - row.x_height_line - 5.0).abs() < EPS);
            assert!((row.baseline - row.cap_height_line - 8.0).abs() < EPS);
            assert!((row.baseline - row.ascender_line - 10.0).abs() < EPS);
            assert!((row.descender_line - row.baseline - 5.0).abs() < EPS);
            assert!((row.envelope_height() - 15.0).abs() < EPS);
        }
    }

    #[test]
    fn test_group_and_line_indices() {
        let rows = layout_rows(&a4(), &settings(7, DistributionMode::EqualGap));
        let labels: Vec<(usize, usize, usize)> = rows
            .iter()
            .map(|r| (r.row_index, r.group_index, r.line_index))
            .collect();
        assert_eq!(
            labels,
            vec![
                (0, 0, 0),
                (1, 0, 1),
                (2, 0, 2),
                (3, 1, 0),
                (4, 1, 1),
                (5, 1, 2),
                (6, 2, 0)
            ]
        );
    }

    #[test]
    fn test_zero_lines_is_empty() {
        assert!(layout_rows(&a4(), &settings(0, DistributionMode::EqualGap)).is_empty());
        assert!(layout_rows(&a4(), &settings(0, DistributionMode::FillAvailable)).is_empty());
    }
}

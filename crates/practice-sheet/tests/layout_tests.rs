use practice_sheet::layout::*;
use practice_sheet::*;
use proptest::prelude::*;

const EPS: f32 = 1e-3;

fn a4_settings(lines: usize) -> TypographySettings {
    TypographySettings::default()
        .with_number_of_lines(lines)
        .with_margins(Margins {
            top_mm: 25.0,
            bottom_mm: 25.0,
            left_mm: 25.0,
            right_mm: 20.0,
        })
}

#[test]
fn test_a4_twelve_rows_fit() {
    let page = PaperSize::A4.page_spec();
    let rows = layout_rows(&page, &a4_settings(12));

    assert_eq!(rows.len(), 12);
    assert!(rows[0].ascender_line >= 25.0);
    assert!(rows[11].descender_line <= 272.0 + EPS);
}

#[test]
fn test_a4_grid_has_35_vertical_lines() {
    let page = PageSpec::new(210.0, 297.0);
    let settings = TypographySettings {
        margins: Margins::uniform(20.0),
        grid_spacing_mm: 5.0,
        ..Default::default()
    };
    assert_eq!(generate_grid(&page, &settings).vertical.len(), 35);
}

#[test]
fn test_dense_grid_stays_bounded() {
    let mut settings = a4_settings(12);
    settings.grid_spacing_mm = 0.01;
    settings.display.grid_style = GridStyle::Dotted;
    let geometry = SheetGeometry::compute(PaperSize::A4.page_spec(), &settings);

    assert!(geometry.grid.vertical.len() <= 1_000);
    assert!(geometry.grid.horizontal.len() <= 1_000);
    assert!(geometry.grid_dots.len() <= 1_000 * 1_000);
}

#[test]
fn test_ruled_grid_computes_no_dots() {
    let geometry = SheetGeometry::compute(PaperSize::A4.page_spec(), &a4_settings(12));
    assert!(!geometry.grid.vertical.is_empty());
    assert!(geometry.grid_dots.is_empty());
}

#[test]
fn test_a4_orientation_swap() {
    let base = PaperSize::A4.page_spec();
    assert_eq!(
        resolve_dimensions(base, Orientation::Portrait, None),
        PageSpec::new(210.0, 297.0)
    );
    assert_eq!(
        resolve_dimensions(base, Orientation::Landscape, None),
        PageSpec::new(297.0, 210.0)
    );
}

#[test]
fn test_upright_slant_is_empty() {
    let settings = TypographySettings::default().with_slant_angle(90.0);
    assert!(generate_slant_lines(&PageSpec::default(), &settings).is_empty());
}

#[test]
fn test_landscape_sheet_fits_fewer_rows() {
    let settings = a4_settings(12);
    let portrait = layout_rows(&PageSpec::new(210.0, 297.0), &settings);
    let landscape = layout_rows(&PageSpec::new(297.0, 210.0), &settings);
    assert_eq!(portrait.len(), 12);
    // 160mm of writing height holds ten 15mm rows with 0.5mm gaps
    assert_eq!(landscape.len(), 10);
}

fn arb_settings() -> impl Strategy<Value = TypographySettings> {
    (
        2.5f32..8.0,
        0.0f32..1.0,
        2.0f32..30.0,
        2.0f32..12.0,
        1usize..25,
        45.0f32..135.0,
        (5.0f32..50.0, 5.0f32..50.0, 5.0f32..50.0, 5.0f32..50.0),
    )
        .prop_map(
            |(x_height, cap_fraction, ascender_extra, descender, lines, slant, margins)| {
                let ascender = x_height + ascender_extra;
                let cap = x_height + cap_fraction * (ascender - x_height) * 0.99;
                TypographySettings {
                    x_height_mm: x_height,
                    cap_height_mm: cap,
                    ascender_height_mm: ascender,
                    descender_depth_mm: descender,
                    number_of_lines: lines,
                    slant_angle_degrees: slant,
                    margins: Margins {
                        top_mm: margins.0,
                        bottom_mm: margins.1,
                        left_mm: margins.2,
                        right_mm: margins.3,
                    },
                    ..Default::default()
                }
            },
        )
}

fn arb_page() -> impl Strategy<Value = PageSpec> {
    (150.0f32..500.0, 150.0f32..500.0).prop_map(|(w, h)| PageSpec::new(w, h))
}

proptest! {
    #[test]
    fn prop_layout_is_deterministic(page in arb_page(), settings in arb_settings()) {
        let first = SheetGeometry::compute(page, &settings);
        let second = SheetGeometry::compute(page, &settings);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_row_lines_are_ordered(page in arb_page(), settings in arb_settings()) {
        for mode in [DistributionMode::EqualGap, DistributionMode::FillAvailable] {
            let settings = settings.with_distribution(mode);
            for row in layout_rows(&page, &settings) {
                prop_assert!(row.ascender_line < row.cap_height_line);
                prop_assert!(row.cap_height_line <= row.x_height_line);
                prop_assert!(row.x_height_line < row.baseline);
                prop_assert!(row.baseline < row.descender_line);
            }
        }
    }

    #[test]
    fn prop_rows_stay_inside_margins(page in arb_page(), settings in arb_settings()) {
        for mode in [DistributionMode::EqualGap, DistributionMode::FillAvailable] {
            let settings = settings.with_distribution(mode);
            let rows = layout_rows(&page, &settings);
            prop_assert!(rows.len() <= settings.number_of_lines);
            for row in &rows {
                prop_assert!(row.ascender_line >= settings.margins.top_mm - EPS);
                prop_assert!(
                    row.descender_line <= page.height_mm - settings.margins.bottom_mm + EPS
                );
            }
            for pair in rows.windows(2) {
                prop_assert!(pair[0].baseline < pair[1].baseline);
            }
        }
    }

    #[test]
    fn prop_slant_is_mirrored(page in arb_page(), settings in arb_settings(), angle in 45.0f32..89.0) {
        let right = generate_slant_lines(&page, &settings.with_slant_angle(angle));
        let left = generate_slant_lines(&page, &settings.with_slant_angle(180.0 - angle));
        // Line counts may differ by one when the covered width sits on a
        // spacing boundary
        prop_assert!(right.len().abs_diff(left.len()) <= 1);
        prop_assert!(!right.is_empty());
        for (r, l) in right.iter().zip(&left) {
            prop_assert!((r.x1 - l.x1).abs() < 1e-2);
            prop_assert!((r.dx() + l.dx()).abs() < 1e-2);
        }
    }

    #[test]
    fn prop_masks_and_rows_tile_writing_area(page in arb_page(), settings in arb_settings()) {
        let rows = layout_rows(&page, &settings);
        let masks = generate_row_spacing_masks(&rows, &page, &settings);
        let area = WritingArea::new(&page, &settings.margins);

        let covered: f32 = masks.iter().map(|m| m.height).sum::<f32>()
            + rows.iter().map(|r| r.envelope_height()).sum::<f32>();

        // Every row fits: masks plus envelopes cover the whole height
        if rows.len() == settings.number_of_lines && !rows.is_empty() {
            prop_assert!((covered - area.height()).abs() < 0.05);
        }
        for mask in &masks {
            prop_assert!(mask.height > 0.0);
            prop_assert_eq!(mask.x, area.left);
            prop_assert_eq!(mask.width, area.width());
        }
    }
}

use practice_sheet::*;

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A3.dimensions_mm(), (297.0, 420.0));
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(PaperSize::Legal.dimensions_mm(), (215.9, 355.6));
    assert_eq!(PaperSize::Tabloid.dimensions_mm(), (279.4, 431.8));
}

#[test]
fn test_paper_sizes_are_portrait() {
    for size in [
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Tabloid,
    ] {
        assert!(!size.page_spec().is_landscape(), "{}", size.name());
    }
}

#[test]
fn test_orientation_toggle() {
    assert_eq!(Orientation::Portrait.toggled(), Orientation::Landscape);
    assert_eq!(Orientation::Landscape.toggled(), Orientation::Portrait);
}

#[test]
fn test_color_parsing() {
    assert_eq!("#0066cc".parse::<Color>().unwrap(), Color::rgb(0x00, 0x66, 0xcc));
    assert_eq!("#FF6600".parse::<Color>().unwrap(), Color::rgb(0xff, 0x66, 0x00));
    assert_eq!("#666".parse::<Color>().unwrap(), Color::rgb(0x66, 0x66, 0x66));

    assert!("0066cc".parse::<Color>().is_err());
    assert!("#00gg00".parse::<Color>().is_err());
    assert!("#12345".parse::<Color>().is_err());
    assert!("#ééé".parse::<Color>().is_err());
}

#[test]
fn test_color_hex_display() {
    let color = Color::rgb(0xff, 0x00, 0x0a);
    assert_eq!(color.to_hex(), "#ff000a");
    assert_eq!(color.to_string(), "#ff000a");
}

#[test]
fn test_unit_components() {
    let (r, g, b) = Color::WHITE.unit_components();
    assert_eq!((r, g, b), (1.0, 1.0, 1.0));
    let (r, g, b) = Color::BLACK.unit_components();
    assert_eq!((r, g, b), (0.0, 0.0, 0.0));
}

#[test]
fn test_distribution_names() {
    assert_eq!(DistributionMode::default(), DistributionMode::EqualGap);
    assert_eq!(DistributionMode::EqualGap.name(), "equal-gap");
    assert_eq!(DistributionMode::FillAvailable.name(), "fill-available");
    assert_eq!(
        DistributionMode::FixedPitch { pitch_mm: 20.0 }.name(),
        "fixed-pitch"
    );
}

#[test]
fn test_default_display() {
    let display = DisplaySettings::default();
    assert_eq!(display.guideline_color, Color::rgb(0x00, 0x66, 0xcc));
    assert_eq!(display.slant_line_color, Color::rgb(0xff, 0x66, 0x00));
    assert!(display.show.slant_lines);
    assert!(!display.show.cap_height);
    assert!(!display.show.grid);
    assert_eq!(display.grid_style, GridStyle::Lines);
}

#[test]
fn test_unit_conversion() {
    use practice_sheet::constants::{mm_to_pt, pt_to_mm};
    assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
    assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-4);
}

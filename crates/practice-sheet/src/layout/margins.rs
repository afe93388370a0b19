//! Margin boundary guides

use crate::options::TypographySettings;
use crate::types::PageSpec;

use super::{MarginGuides, Segment};

/// Generate the four margin guides.
///
/// Each guide sits at its margin offset and runs edge to edge across the
/// whole page, so the guides cross at the writing area corners.
pub fn generate_margin_guides(page: &PageSpec, settings: &TypographySettings) -> MarginGuides {
    let margins = &settings.margins;
    let bottom_y = page.height_mm - margins.bottom_mm;
    let right_x = page.width_mm - margins.right_mm;

    MarginGuides {
        top: Segment::horizontal(margins.top_mm, 0.0, page.width_mm),
        bottom: Segment::horizontal(bottom_y, 0.0, page.width_mm),
        left: Segment::vertical(margins.left_mm, 0.0, page.height_mm),
        right: Segment::vertical(right_x, 0.0, page.height_mm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins_on_a4() {
        let guides = generate_margin_guides(&PageSpec::new(210.0, 297.0), &TypographySettings::default());
        assert_eq!(guides.top, Segment::new(0.0, 25.0, 210.0, 25.0));
        assert_eq!(guides.bottom, Segment::new(0.0, 272.0, 210.0, 272.0));
        assert_eq!(guides.left, Segment::new(25.0, 0.0, 25.0, 297.0));
        assert_eq!(guides.right, Segment::new(190.0, 0.0, 190.0, 297.0));
    }
}

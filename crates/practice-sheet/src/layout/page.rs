//! Page dimension resolution

use crate::types::{Orientation, PageSpec};

/// Resolve the effective page size.
///
/// A custom size wins outright and is returned as given; callers keep it
/// within sane bounds. Otherwise landscape swaps the base dimensions.
///
/// # Arguments
/// * `base` - Portrait dimensions of the selected paper
/// * `orientation` - Requested orientation
/// * `custom_size` - Explicit page size, if custom-size mode is on
pub fn resolve_dimensions(
    base: PageSpec,
    orientation: Orientation,
    custom_size: Option<PageSpec>,
) -> PageSpec {
    if let Some(custom) = custom_size {
        return custom;
    }

    match orientation {
        Orientation::Portrait => base,
        Orientation::Landscape => PageSpec::new(base.height_mm, base.width_mm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaperSize;

    #[test]
    fn test_portrait_keeps_base() {
        let page = resolve_dimensions(PageSpec::new(210.0, 297.0), Orientation::Portrait, None);
        assert_eq!(page, PageSpec::new(210.0, 297.0));
    }

    #[test]
    fn test_landscape_swaps() {
        let page = resolve_dimensions(PageSpec::new(210.0, 297.0), Orientation::Landscape, None);
        assert_eq!(page, PageSpec::new(297.0, 210.0));
        assert!(page.is_landscape());
    }

    #[test]
    fn test_custom_size_ignores_orientation() {
        let custom = PageSpec::new(120.0, 80.0);
        let page = resolve_dimensions(
            PaperSize::Letter.page_spec(),
            Orientation::Landscape,
            Some(custom),
        );
        assert_eq!(page, custom);
    }
}

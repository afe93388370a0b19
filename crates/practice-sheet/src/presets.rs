//! Calligraphy and margin presets
//!
//! Typography presets are expressed as ratios of a base size so one preset
//! scales to any nib width. Margin presets are absolute.

use crate::types::Margins;

/// Base size used when a preset is applied without an explicit one (mm)
pub const DEFAULT_BASE_SIZE_MM: f32 = 20.0;

/// Named calligraphy styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypographyPreset {
    Italic,
    Copperplate,
    Spencerian,
    Modern,
    Minimal,
}

/// Proportions of a preset, relative to the base size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetRatios {
    pub x_height: f32,
    pub cap_height: f32,
    pub ascender: f32,
    pub descender: f32,
    pub slant_angle_degrees: f32,
    /// Baseline-to-baseline pitch as a multiple of the base size
    pub line_spacing: f32,
    /// Multiplier applied to the four vertical metrics
    pub metric_spacing: f32,
}

/// Absolute row metrics produced by a preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetMetrics {
    pub x_height_mm: f32,
    pub cap_height_mm: f32,
    pub ascender_height_mm: f32,
    pub descender_depth_mm: f32,
    pub slant_angle_degrees: f32,
    pub line_pitch_mm: f32,
}

impl TypographyPreset {
    pub const ALL: [TypographyPreset; 5] = [
        TypographyPreset::Italic,
        TypographyPreset::Copperplate,
        TypographyPreset::Spencerian,
        TypographyPreset::Modern,
        TypographyPreset::Minimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypographyPreset::Italic => "Italic Foundational",
            TypographyPreset::Copperplate => "Copperplate",
            TypographyPreset::Spencerian => "Spencerian",
            TypographyPreset::Modern => "Modern Calligraphy",
            TypographyPreset::Minimal => "Minimal",
        }
    }

    pub fn ratios(self) -> PresetRatios {
        match self {
            TypographyPreset::Italic => PresetRatios {
                x_height: 0.5,
                cap_height: 0.7,
                ascender: 0.75,
                descender: 0.25,
                slant_angle_degrees: 83.0,
                line_spacing: 2.5,
                metric_spacing: 1.0,
            },
            TypographyPreset::Copperplate => PresetRatios {
                x_height: 0.33,
                cap_height: 0.66,
                ascender: 1.0,
                descender: 0.33,
                slant_angle_degrees: 78.0,
                line_spacing: 3.0,
                metric_spacing: 1.2,
            },
            TypographyPreset::Spencerian => PresetRatios {
                x_height: 0.4,
                cap_height: 0.6,
                ascender: 0.8,
                descender: 0.3,
                slant_angle_degrees: 70.0,
                line_spacing: 2.8,
                metric_spacing: 1.1,
            },
            TypographyPreset::Modern => PresetRatios {
                x_height: 0.45,
                cap_height: 0.65,
                ascender: 0.85,
                descender: 0.35,
                slant_angle_degrees: 75.0,
                line_spacing: 3.2,
                metric_spacing: 1.3,
            },
            TypographyPreset::Minimal => PresetRatios {
                x_height: 0.5,
                cap_height: 0.7,
                ascender: 0.75,
                descender: 0.25,
                slant_angle_degrees: 83.0,
                line_spacing: 2.0,
                metric_spacing: 1.0,
            },
        }
    }

    /// Scale the preset to a base size in millimetres
    pub fn metrics(self, base_size_mm: f32) -> PresetMetrics {
        let ratios = self.ratios();
        let scale = base_size_mm * ratios.metric_spacing;
        PresetMetrics {
            x_height_mm: ratios.x_height * scale,
            cap_height_mm: ratios.cap_height * scale,
            ascender_height_mm: ratios.ascender * scale,
            descender_depth_mm: ratios.descender * scale,
            slant_angle_degrees: ratios.slant_angle_degrees,
            line_pitch_mm: ratios.line_spacing * base_size_mm,
        }
    }
}

/// Named margin sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarginPreset {
    Standard,
    Minimal,
    Wide,
    Notebook,
}

impl MarginPreset {
    pub const ALL: [MarginPreset; 4] = [
        MarginPreset::Standard,
        MarginPreset::Minimal,
        MarginPreset::Wide,
        MarginPreset::Notebook,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MarginPreset::Standard => "Standard A4",
            MarginPreset::Minimal => "Minimal",
            MarginPreset::Wide => "Wide Margins",
            MarginPreset::Notebook => "Notebook Style",
        }
    }

    pub fn margins(self) -> Margins {
        let (top_mm, bottom_mm, left_mm, right_mm) = match self {
            MarginPreset::Standard => (25.0, 25.0, 25.0, 20.0),
            MarginPreset::Minimal => (15.0, 15.0, 15.0, 15.0),
            MarginPreset::Wide => (30.0, 30.0, 30.0, 25.0),
            MarginPreset::Notebook => (20.0, 20.0, 30.0, 15.0),
        };
        Margins {
            top_mm,
            bottom_mm,
            left_mm,
            right_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_preset_at_default_base_size() {
        let metrics = TypographyPreset::Minimal.metrics(DEFAULT_BASE_SIZE_MM);
        assert_eq!(metrics.x_height_mm, 10.0);
        assert!((metrics.cap_height_mm - 14.0).abs() < 1e-4);
        assert_eq!(metrics.ascender_height_mm, 15.0);
        assert_eq!(metrics.descender_depth_mm, 5.0);
        assert_eq!(metrics.slant_angle_degrees, 83.0);
        assert_eq!(metrics.line_pitch_mm, 40.0);
    }

    #[test]
    fn test_metric_spacing_scales_vertical_metrics_only() {
        let metrics = TypographyPreset::Modern.metrics(10.0);
        // 10mm * 0.85 * 1.3
        assert!((metrics.ascender_height_mm - 11.05).abs() < 1e-4);
        // Pitch ignores metric spacing: 10mm * 3.2
        assert!((metrics.line_pitch_mm - 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_presets_keep_metric_order() {
        for preset in TypographyPreset::ALL {
            let m = preset.metrics(DEFAULT_BASE_SIZE_MM);
            assert!(m.x_height_mm <= m.cap_height_mm, "{:?}", preset);
            assert!(m.cap_height_mm < m.ascender_height_mm, "{:?}", preset);
        }
    }

    #[test]
    fn test_notebook_margins() {
        let margins = MarginPreset::Notebook.margins();
        assert_eq!(margins.left_mm, 30.0);
        assert_eq!(margins.right_mm, 15.0);
        assert_eq!(margins.top_mm, 20.0);
        assert_eq!(margins.bottom_mm, 20.0);
    }
}

use crate::constants::*;
use crate::layout::resolve_dimensions;
use crate::presets::{MarginPreset, TypographyPreset};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page size selection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSettings {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Explicit page size; overrides paper size and orientation when set
    pub custom_size: Option<PageSpec>,
}

impl PageSettings {
    /// Effective page dimensions
    pub fn resolve(&self) -> PageSpec {
        resolve_dimensions(
            self.paper_size.page_spec(),
            self.orientation,
            self.custom_size,
        )
    }
}

/// Snapshot of every parameter the layout engine reads, plus the display
/// attributes the renderer needs. All distances are in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypographySettings {
    // Row metrics, measured from the baseline
    pub x_height_mm: f32,
    pub cap_height_mm: f32,
    pub ascender_height_mm: f32,
    pub descender_depth_mm: f32,

    pub number_of_lines: usize,

    /// Slant measured from the baseline: 90° is upright, below 90° leans right
    pub slant_angle_degrees: f32,

    pub margins: Margins,

    pub grid_spacing_mm: f32,
    /// Horizontal distance between neighbouring slant lines
    pub slant_line_spacing_mm: f32,

    pub distribution: DistributionMode,
    pub tolerances: RowTolerances,

    pub display: DisplaySettings,
}

impl Default for TypographySettings {
    fn default() -> Self {
        Self {
            x_height_mm: 5.0,
            cap_height_mm: 8.0,
            ascender_height_mm: 10.0,
            descender_depth_mm: 5.0,
            number_of_lines: 12,
            slant_angle_degrees: 75.0,
            margins: Margins::default(),
            grid_spacing_mm: 5.0,
            slant_line_spacing_mm: 6.0,
            distribution: DistributionMode::EqualGap,
            tolerances: RowTolerances::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl TypographySettings {
    /// Full glyph envelope: ascender line to descender line
    pub fn row_height_mm(&self) -> f32 {
        self.ascender_height_mm + self.descender_depth_mm
    }

    /// Apply a calligraphy preset scaled to `base_size_mm`.
    ///
    /// Only the row metrics and slant angle change; the row distribution
    /// stays as configured.
    pub fn with_preset(mut self, preset: TypographyPreset, base_size_mm: f32) -> Self {
        let metrics = preset.metrics(base_size_mm);
        self.x_height_mm = metrics.x_height_mm;
        self.cap_height_mm = metrics.cap_height_mm;
        self.ascender_height_mm = metrics.ascender_height_mm;
        self.descender_depth_mm = metrics.descender_depth_mm;
        self.slant_angle_degrees = metrics.slant_angle_degrees;
        self
    }

    /// Apply a preset together with its baseline pitch.
    ///
    /// Rows switch to fixed-pitch distribution at the preset's line spacing.
    pub fn with_preset_pitch(self, preset: TypographyPreset, base_size_mm: f32) -> Self {
        let pitch_mm = preset.metrics(base_size_mm).line_pitch_mm;
        self.with_preset(preset, base_size_mm)
            .with_distribution(DistributionMode::FixedPitch { pitch_mm })
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_margin_preset(self, preset: MarginPreset) -> Self {
        self.with_margins(preset.margins())
    }

    pub fn with_distribution(mut self, distribution: DistributionMode) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_number_of_lines(mut self, number_of_lines: usize) -> Self {
        self.number_of_lines = number_of_lines;
        self
    }

    pub fn with_slant_angle(mut self, slant_angle_degrees: f32) -> Self {
        self.slant_angle_degrees = slant_angle_degrees;
        self
    }

    /// Copy of these settings pulled into the accepted ranges.
    ///
    /// The result always passes [`TypographySettings::validate`]: the
    /// ascender is kept above the x-height and the cap height is kept
    /// between the two. Non-positive spacings fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let mut clamped = *self;

        clamped.x_height_mm = clamp_range(self.x_height_mm, X_HEIGHT_RANGE_MM);
        clamped.ascender_height_mm = clamp_range(self.ascender_height_mm, ASCENDER_RANGE_MM)
            .max(clamped.x_height_mm + MIN_ASCENDER_CLEARANCE_MM);
        clamped.descender_depth_mm = clamp_range(self.descender_depth_mm, DESCENDER_RANGE_MM);
        clamped.cap_height_mm = self
            .cap_height_mm
            .max(clamped.x_height_mm)
            .min(clamped.ascender_height_mm - MIN_CAP_CLEARANCE_MM);
        clamped.number_of_lines = self
            .number_of_lines
            .clamp(NUMBER_OF_LINES_RANGE.0, NUMBER_OF_LINES_RANGE.1);
        clamped.slant_angle_degrees = clamp_range(self.slant_angle_degrees, SLANT_ANGLE_RANGE_DEG);

        clamped.margins = Margins {
            top_mm: clamp_range(self.margins.top_mm, MARGIN_RANGE_MM),
            bottom_mm: clamp_range(self.margins.bottom_mm, MARGIN_RANGE_MM),
            left_mm: clamp_range(self.margins.left_mm, MARGIN_RANGE_MM),
            right_mm: clamp_range(self.margins.right_mm, MARGIN_RANGE_MM),
        };

        clamped.grid_spacing_mm = positive_or(self.grid_spacing_mm, defaults.grid_spacing_mm);
        clamped.slant_line_spacing_mm =
            positive_or(self.slant_line_spacing_mm, defaults.slant_line_spacing_mm);
        if let DistributionMode::FixedPitch { pitch_mm } = self.distribution {
            clamped.distribution = DistributionMode::FixedPitch {
                pitch_mm: positive_or(pitch_mm, clamped.row_height_mm()),
            };
        }
        clamped.tolerances = RowTolerances {
            min_row_gap_mm: self.tolerances.min_row_gap_mm.max(0.0),
            fill_bottom_buffer_mm: self.tolerances.fill_bottom_buffer_mm.max(0.0),
            fill_min_clearance_mm: self.tolerances.fill_min_clearance_mm.max(0.0),
        };

        clamped.display.baseline_thickness_mm = clamp_range(
            self.display.baseline_thickness_mm,
            BASELINE_THICKNESS_RANGE_MM,
        );
        clamped.display.baseline_opacity = clamp_range(self.display.baseline_opacity, (0.0, 1.0));
        clamped.display.guideline_opacity =
            clamp_range(self.display.guideline_opacity, (0.0, 1.0));
        clamped.display.slant_line_opacity =
            clamp_range(self.display.slant_line_opacity, (0.0, 1.0));

        clamped
    }

    /// Check the settings against the accepted ranges.
    ///
    /// The layout engine never calls this; degenerate settings simply
    /// produce degenerate geometry.
    pub fn validate(&self) -> Result<()> {
        check_range("X-height", self.x_height_mm, X_HEIGHT_RANGE_MM)?;
        check_range("Ascender height", self.ascender_height_mm, ASCENDER_RANGE_MM)?;
        check_range("Descender depth", self.descender_depth_mm, DESCENDER_RANGE_MM)?;

        if self.cap_height_mm < self.x_height_mm {
            return Err(SheetError::Config(format!(
                "Cap height ({} mm) must not be below the x-height ({} mm)",
                self.cap_height_mm, self.x_height_mm
            )));
        }
        if self.cap_height_mm >= self.ascender_height_mm {
            return Err(SheetError::Config(format!(
                "Cap height ({} mm) must be below the ascender height ({} mm)",
                self.cap_height_mm, self.ascender_height_mm
            )));
        }

        let (min_lines, max_lines) = NUMBER_OF_LINES_RANGE;
        if !(min_lines..=max_lines).contains(&self.number_of_lines) {
            return Err(SheetError::Config(format!(
                "Number of lines must be between {} and {}, got {}",
                min_lines, max_lines, self.number_of_lines
            )));
        }

        check_range("Slant angle", self.slant_angle_degrees, SLANT_ANGLE_RANGE_DEG)?;

        check_range("Top margin", self.margins.top_mm, MARGIN_RANGE_MM)?;
        check_range("Bottom margin", self.margins.bottom_mm, MARGIN_RANGE_MM)?;
        check_range("Left margin", self.margins.left_mm, MARGIN_RANGE_MM)?;
        check_range("Right margin", self.margins.right_mm, MARGIN_RANGE_MM)?;

        check_positive("Grid spacing", self.grid_spacing_mm)?;
        check_positive("Slant line spacing", self.slant_line_spacing_mm)?;
        if let DistributionMode::FixedPitch { pitch_mm } = self.distribution {
            check_positive("Row pitch", pitch_mm)?;
        }

        if self.tolerances.min_row_gap_mm < 0.0
            || self.tolerances.fill_bottom_buffer_mm < 0.0
            || self.tolerances.fill_min_clearance_mm < 0.0
        {
            return Err(SheetError::Config(
                "Row tolerances must not be negative".to_string(),
            ));
        }

        check_range(
            "Baseline thickness",
            self.display.baseline_thickness_mm,
            BASELINE_THICKNESS_RANGE_MM,
        )?;
        for (name, opacity) in [
            ("Baseline opacity", self.display.baseline_opacity),
            ("Guideline opacity", self.display.guideline_opacity),
            ("Slant line opacity", self.display.slant_line_opacity),
        ] {
            check_range(name, opacity, (0.0, 1.0))?;
        }

        Ok(())
    }
}

/// Complete sheet configuration: what gets saved to and loaded from disk
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetOptions {
    pub page: PageSettings,
    pub typography: TypographySettings,
}

impl SheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Effective page dimensions
    pub fn page_spec(&self) -> PageSpec {
        self.page.resolve()
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.page.orientation = orientation;
        self
    }

    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        self.page.paper_size = paper_size;
        self
    }

    pub fn with_custom_size(mut self, custom_size: Option<PageSpec>) -> Self {
        self.page.custom_size = custom_size;
        self
    }

    pub fn with_typography(mut self, typography: TypographySettings) -> Self {
        self.typography = typography;
        self
    }

    /// Copy of these options pulled into the accepted ranges.
    ///
    /// Margins that would leave no writing area on the page are reduced
    /// until they do.
    pub fn clamped(&self) -> Self {
        let mut clamped = *self;
        clamped.page.custom_size = self.page.custom_size.map(|custom| {
            PageSpec::new(
                clamp_range(custom.width_mm, CUSTOM_PAGE_RANGE_MM),
                clamp_range(custom.height_mm, CUSTOM_PAGE_RANGE_MM),
            )
        });
        clamped.typography = self.typography.clamped();

        let page = clamped.page_spec();
        let margins = &mut clamped.typography.margins;
        fit_margin_pair(&mut margins.left_mm, &mut margins.right_mm, page.width_mm);
        fit_margin_pair(&mut margins.top_mm, &mut margins.bottom_mm, page.height_mm);

        clamped
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let Some(custom) = self.page.custom_size {
            check_range("Custom page width", custom.width_mm, CUSTOM_PAGE_RANGE_MM)?;
            check_range("Custom page height", custom.height_mm, CUSTOM_PAGE_RANGE_MM)?;
        }

        self.typography.validate()?;

        let page = self.page_spec();
        let margins = &self.typography.margins;
        if margins.left_mm + margins.right_mm >= page.width_mm
            || margins.top_mm + margins.bottom_mm >= page.height_mm
        {
            return Err(SheetError::Config(format!(
                "Margins leave no writing area on a {} x {} mm page",
                page.width_mm, page.height_mm
            )));
        }

        Ok(())
    }
}

/// Clamp into `[min, max]`; NaN maps to `min`
fn clamp_range(value: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 { value } else { fallback }
}

/// Shrink a pair of opposite margins so they leave room on a page side
fn fit_margin_pair(first: &mut f32, second: &mut f32, side_mm: f32) {
    if *first + *second < side_mm {
        return;
    }
    let limit = (side_mm - MIN_WRITING_EXTENT_MM) / 2.0;
    *first = first.min(limit);
    *second = second.min(limit);
}

fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(SheetError::Config(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(SheetError::Config(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

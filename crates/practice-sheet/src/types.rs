use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl Orientation {
    /// The other orientation
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
        }
    }

    /// Base dimensions as a page spec
    pub fn page_spec(self) -> PageSpec {
        let (width_mm, height_mm) = self.dimensions_mm();
        PageSpec::new(width_mm, height_mm)
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
        }
    }
}

/// Physical page size in millimetres.
///
/// Both dimensions are expected to be positive; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSpec {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSpec {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width_mm > self.height_mm
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PaperSize::A4.page_spec()
    }
}

/// Page margins in millimetres, measured inward from each page edge
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top_mm: 25.0,
            bottom_mm: 25.0,
            left_mm: 25.0,
            right_mm: 20.0,
        }
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }
}

/// How writing rows are distributed down the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionMode {
    /// Rows sized to their glyph envelope, surplus space spread evenly over
    /// every gap so the rows span the writing area edge to edge
    #[default]
    EqualGap,
    /// Baselines spread over the whole writing area, with a safety buffer
    /// below the last row; rows that no longer fit are dropped
    FillAvailable,
    /// Baselines at a fixed pitch from the first ascender downward
    FixedPitch { pitch_mm: f32 },
}

impl DistributionMode {
    pub fn name(&self) -> &'static str {
        match self {
            DistributionMode::EqualGap => "equal-gap",
            DistributionMode::FillAvailable => "fill-available",
            DistributionMode::FixedPitch { .. } => "fixed-pitch",
        }
    }
}

/// Buffers used when fitting rows into the writing area
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowTolerances {
    /// Smallest gap between one row's descender and the next row's ascender
    /// in equal-gap mode
    pub min_row_gap_mm: f32,
    /// Space kept free below the last descender in fill-available mode
    pub fill_bottom_buffer_mm: f32,
    /// Extra clearance added to the row envelope to get the smallest pitch
    /// allowed in fill-available mode
    pub fill_min_clearance_mm: f32,
}

impl Default for RowTolerances {
    fn default() -> Self {
        Self {
            min_row_gap_mm: 0.5,
            fill_bottom_buffer_mm: 5.0,
            fill_min_clearance_mm: 3.0,
        }
    }
}

/// An sRGB color, written as `#rrggbb` in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0.0..=1.0, as PDF color operators expect
    pub fn unit_components(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = SheetError;

    /// Parse `#rrggbb` or the short `#rgb` form
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SheetError::Config(format!("Invalid color '{}', expected #rrggbb", s));

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        match hex.len() {
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Grid rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridStyle {
    /// Dashed rules along both axes
    #[default]
    Lines,
    /// A dot at every rule intersection
    Dotted,
}

/// Which guides are drawn. Geometry is computed regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuideVisibility {
    pub slant_lines: bool,
    pub grid: bool,
    pub x_height: bool,
    pub cap_height: bool,
    pub ascender: bool,
    pub descender: bool,
    /// Letter labels (A, C, X, B, D) beside the first row of each group
    pub line_labels: bool,
    pub margins: bool,
    /// Title box below the writing area
    pub legend: bool,
}

impl Default for GuideVisibility {
    fn default() -> Self {
        Self {
            slant_lines: true,
            grid: false,
            x_height: true,
            cap_height: false,
            ascender: true,
            descender: true,
            line_labels: false,
            margins: true,
            legend: true,
        }
    }
}

/// Display-only attributes: colors, opacities, stroke widths, show-flags
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplaySettings {
    pub show: GuideVisibility,
    pub grid_style: GridStyle,

    pub baseline_color: Color,
    pub guideline_color: Color,
    pub slant_line_color: Color,
    pub margin_color: Color,

    pub baseline_opacity: f32,
    pub guideline_opacity: f32,
    pub slant_line_opacity: f32,

    /// Stroke widths in millimetres
    pub baseline_thickness_mm: f32,
    pub guideline_thickness_mm: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show: GuideVisibility::default(),
            grid_style: GridStyle::Lines,
            baseline_color: Color::BLACK,
            guideline_color: Color::rgb(0x00, 0x66, 0xcc),
            slant_line_color: Color::rgb(0xff, 0x66, 0x00),
            margin_color: Color::rgb(0xff, 0x00, 0x00),
            baseline_opacity: 1.0,
            guideline_opacity: 0.6,
            slant_line_opacity: 0.5,
            baseline_thickness_mm: 0.3,
            guideline_thickness_mm: 0.3,
        }
    }
}

/// Summary numbers for a generated sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Resolved page size
    pub page: PageSpec,
    /// Writing area width in millimetres
    pub writing_width_mm: f32,
    /// Writing area height in millimetres
    pub writing_height_mm: f32,
    /// Rows asked for in the settings
    pub requested_rows: usize,
    /// Rows that fit on the page
    pub produced_rows: usize,
    /// Baseline-to-baseline distance (None with fewer than two rows)
    pub row_pitch_mm: Option<f32>,
    /// Gap between a descender and the next ascender (None with fewer than two rows)
    pub inter_row_gap_mm: Option<f32>,
    pub slant_lines: usize,
    pub vertical_grid_lines: usize,
    pub horizontal_grid_lines: usize,
    pub row_spacing_masks: usize,
}

impl SheetStatistics {
    /// True when some requested rows did not fit
    pub fn is_truncated(&self) -> bool {
        self.produced_rows < self.requested_rows
    }
}

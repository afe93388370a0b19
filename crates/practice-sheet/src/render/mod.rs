//! Rendering of sheet geometry
//!
//! This module turns a computed `SheetGeometry` into drawing calls:
//! - The `Surface` trait that every output backend implements
//! - `draw_sheet`, which fixes the layer order and guide styling
//! - SVG, PDF and printable HTML backends
//!
//! Surfaces receive millimetre coordinates with the origin at the top-left
//! corner of the page and y growing downward.

mod pdf;
mod print;
mod svg;

pub use pdf::{PdfSurface, render_pdf};
pub use print::render_print_html;
pub use svg::{SvgSurface, render_svg};

use crate::constants::*;
use crate::layout::{Point, Rect, Segment};
use crate::options::TypographySettings;
use crate::sheet::SheetGeometry;
use crate::types::{Color, GridStyle, Result};

/// Stroke attributes for a line or outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width_mm: f32,
    pub opacity: f32,
    /// Dash pattern (mm on, mm off); `None` is solid
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(color: Color, width_mm: f32) -> Self {
        Self {
            color,
            width_mm,
            opacity: 1.0,
            dash: None,
        }
    }

    pub fn dashed(mut self, dash: [f32; 2]) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Horizontal alignment of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

/// Font attributes for a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_mm: f32,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size_mm: f32, color: Color) -> Self {
        Self {
            size_mm,
            color,
            anchor: TextAnchor::Start,
            bold: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.anchor = TextAnchor::Middle;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A render backend.
///
/// Layers nest: opacity multiplies with the enclosing layers and a clip
/// rectangle stays in force until the matching `end_layer`.
pub trait Surface {
    fn begin_layer(&mut self, opacity: f32, clip: Option<&Rect>) -> Result<()>;
    fn end_layer(&mut self) -> Result<()>;
    fn line(&mut self, segment: &Segment, stroke: &Stroke) -> Result<()>;
    fn rect(&mut self, rect: &Rect, fill: Option<Color>, stroke: Option<&Stroke>) -> Result<()>;
    fn dot(&mut self, center: Point, radius_mm: f32, color: Color) -> Result<()>;
    /// Draw text with its baseline at `origin.y`
    fn text(&mut self, origin: Point, style: &TextStyle, content: &str) -> Result<()>;
}

const LABEL_COLOR: Color = Color::rgb(0x66, 0x66, 0x66);
const LEGEND_TEXT_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);
const LEGEND_BORDER_COLOR: Color = Color::rgb(0xdd, 0xdd, 0xdd);

// =============================================================================
// Sheet Drawing
// =============================================================================

/// Draw a complete sheet onto a surface.
///
/// Layers go down in a fixed order: background, margin guides, slant lines
/// clipped to the writing area, masks between the rows, grid, row guide
/// lines, row labels and finally the legend.
///
/// # Arguments
/// * `geometry` - Geometry computed from `settings`
/// * `settings` - Display attributes and the slant angle shown in the legend
/// * `surface` - Output backend
pub fn draw_sheet(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let display = &settings.display;
    let show = &display.show;
    let page = geometry.page;

    surface.rect(
        &Rect::new(0.0, 0.0, page.width_mm, page.height_mm),
        Some(Color::WHITE),
        None,
    )?;

    if show.margins {
        draw_margin_guides(geometry, settings, surface)?;
    }

    if show.slant_lines && !geometry.slant_lines.is_empty() {
        draw_slant_lines(geometry, settings, surface)?;
    }

    if show.grid {
        draw_grid(geometry, settings, surface)?;
    }

    draw_rows(geometry, settings, surface)?;

    if show.line_labels {
        draw_row_labels(geometry, settings, surface)?;
    }

    if show.legend {
        draw_legend(geometry, settings, surface)?;
    }

    Ok(())
}

fn draw_margin_guides(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let stroke = Stroke::solid(settings.display.margin_color, MARGIN_LINE_WIDTH_MM)
        .dashed(MARGIN_DASH_MM);

    surface.begin_layer(MARGIN_LAYER_OPACITY, None)?;
    for segment in geometry.margin_guides.segments() {
        surface.line(&segment, &stroke)?;
    }
    surface.end_layer()
}

/// Slant lines, then white masks over the gaps so the slant only shows
/// inside the row envelopes
fn draw_slant_lines(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let display = &settings.display;
    let stroke = Stroke::solid(display.slant_line_color, SLANT_LINE_WIDTH_MM);

    surface.begin_layer(
        display.slant_line_opacity,
        Some(&geometry.writing_area.as_rect()),
    )?;
    for segment in &geometry.slant_lines {
        surface.line(segment, &stroke)?;
    }
    surface.end_layer()?;

    for mask in &geometry.masks {
        surface.rect(mask, Some(Color::WHITE), None)?;
    }

    Ok(())
}

fn draw_grid(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let display = &settings.display;

    surface.begin_layer(display.guideline_opacity, None)?;
    match display.grid_style {
        GridStyle::Lines => {
            let stroke =
                Stroke::solid(display.guideline_color, GRID_LINE_WIDTH_MM).dashed(GRID_DASH_MM);
            for segment in geometry.grid.vertical.iter().chain(&geometry.grid.horizontal) {
                surface.line(segment, &stroke)?;
            }
        }
        GridStyle::Dotted => {
            for &dot in &geometry.grid_dots {
                surface.dot(dot, GRID_DOT_RADIUS_MM, display.guideline_color)?;
            }
        }
    }
    surface.end_layer()
}

fn draw_rows(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let display = &settings.display;
    let show = &display.show;
    let area = &geometry.writing_area;

    let baseline = Stroke::solid(display.baseline_color, display.baseline_thickness_mm)
        .with_opacity(display.baseline_opacity);
    let guide = Stroke::solid(display.guideline_color, display.guideline_thickness_mm)
        .with_opacity(display.guideline_opacity);
    let cap_height = Stroke::solid(display.guideline_color, CAP_HEIGHT_LINE_WIDTH_MM)
        .with_opacity(display.guideline_opacity)
        .dashed(CAP_HEIGHT_DASH_MM);

    for row in &geometry.rows {
        let rule = |y: f32| Segment::horizontal(y, area.left, area.right);

        surface.line(&rule(row.baseline), &baseline)?;
        if show.x_height {
            surface.line(&rule(row.x_height_line), &guide)?;
        }
        if show.cap_height {
            surface.line(&rule(row.cap_height_line), &cap_height)?;
        }
        if show.ascender {
            surface.line(&rule(row.ascender_line), &guide)?;
        }
        if show.descender {
            surface.line(&rule(row.descender_line), &guide)?;
        }
    }

    Ok(())
}

/// Letter labels beside the first row of every group of three
fn draw_row_labels(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let show = &settings.display.show;
    let x = settings.margins.left_mm - LABEL_OFFSET_MM;
    let style = TextStyle::new(LABEL_FONT_SIZE_MM, LABEL_COLOR)
        .centered()
        .bold();

    surface.begin_layer(LABEL_LAYER_OPACITY, None)?;
    for row in geometry.rows.iter().filter(|row| row.line_index == 0) {
        let labels = [
            (show.ascender, "A", row.ascender_line),
            (show.cap_height, "C", row.cap_height_line),
            (show.x_height, "X", row.x_height_line),
            (true, "B", row.baseline),
            (show.descender, "D", row.descender_line),
        ];
        for (_, label, y) in labels.into_iter().filter(|(visible, _, _)| *visible) {
            surface.text(Point::new(x, y + 1.0), &style, label)?;
        }
    }
    surface.end_layer()
}

/// Title box below the writing area with a key for the guides
fn draw_legend(
    geometry: &SheetGeometry,
    settings: &TypographySettings,
    surface: &mut impl Surface,
) -> Result<()> {
    let display = &settings.display;
    let show = &display.show;
    let left = settings.margins.left_mm;
    let top = geometry.page.height_mm - settings.margins.bottom_mm + LEGEND_OFFSET_MM;
    let at = |dx: f32, dy: f32| Point::new(left + dx, top + dy);

    let border = Stroke::solid(LEGEND_BORDER_COLOR, 0.1);
    surface.rect(
        &Rect::new(left, top, LEGEND_WIDTH_MM, LEGEND_HEIGHT_MM),
        Some(Color::WHITE),
        Some(&border),
    )?;
    surface.text(
        at(2.0, 4.0),
        &TextStyle::new(2.0, LEGEND_TEXT_COLOR).bold(),
        LEGEND_TITLE,
    )?;

    if show.line_labels {
        let key: Vec<&str> = [
            (show.ascender, "A=Ascender"),
            (show.cap_height, "C=Cap Height"),
            (show.x_height, "X=X-Height"),
            (true, "B=Baseline"),
            (show.descender, "D=Descender"),
        ]
        .into_iter()
        .filter_map(|(visible, entry)| visible.then_some(entry))
        .collect();
        surface.text(
            at(2.0, 7.0),
            &TextStyle::new(1.0, LABEL_COLOR),
            &key.join(", "),
        )?;
        return Ok(());
    }

    let sample = |x: f32| Segment::horizontal(top + 7.0, left + x, left + x + 4.0);
    let caption = TextStyle::new(1.0, LEGEND_TEXT_COLOR);

    surface.line(
        &sample(2.0),
        &Stroke::solid(display.baseline_color, display.baseline_thickness_mm),
    )?;
    surface.text(at(8.0, 8.0), &caption, "Baseline")?;

    if show.slant_lines && !geometry.slant_lines.is_empty() {
        surface.line(
            &sample(25.0),
            &Stroke::solid(display.slant_line_color, SLANT_LINE_WIDTH_MM),
        )?;
        surface.text(
            at(31.0, 8.0),
            &caption,
            &format!("Slant {}° from baseline", settings.slant_angle_degrees),
        )?;
    }

    Ok(())
}

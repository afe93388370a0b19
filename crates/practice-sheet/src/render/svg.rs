//! SVG output backend

use std::fmt::Write;

use crate::layout::{Point, Rect, Segment};
use crate::options::SheetOptions;
use crate::sheet::compose_sheet;
use crate::types::{Color, PageSpec, Result};

use super::{Stroke, Surface, TextAnchor, TextStyle, draw_sheet};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Builds an SVG document whose user units are millimetres
pub struct SvgSurface {
    page: PageSpec,
    defs: String,
    body: String,
    clip_count: usize,
    depth: usize,
}

impl SvgSurface {
    pub fn new(page: PageSpec) -> Self {
        Self {
            page,
            defs: String::new(),
            body: String::new(),
            clip_count: 0,
            depth: 0,
        }
    }

    /// Close any open layers and return the finished document
    pub fn finish(mut self) -> Result<String> {
        while self.depth > 0 {
            self.end_layer()?;
        }

        let mut svg = String::new();
        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
            w = self.page.width_mm,
            h = self.page.height_mm
        )?;
        if !self.defs.is_empty() {
            writeln!(svg, "<defs>\n{}</defs>", self.defs)?;
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.body.push_str("  ");
        }
    }
}

impl Surface for SvgSurface {
    fn begin_layer(&mut self, opacity: f32, clip: Option<&Rect>) -> Result<()> {
        let clip_attr = match clip {
            Some(rect) => {
                let id = format!("clip{}", self.clip_count);
                self.clip_count += 1;
                writeln!(
                    self.defs,
                    r#"  <clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    id, rect.x, rect.y, rect.width, rect.height
                )?;
                format!(r#" clip-path="url(#{})""#, id)
            }
            None => String::new(),
        };

        self.indent();
        writeln!(self.body, r#"<g opacity="{}"{}>"#, opacity, clip_attr)?;
        self.depth += 1;
        Ok(())
    }

    fn end_layer(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Ok(());
        }
        self.depth -= 1;
        self.indent();
        self.body.push_str("</g>\n");
        Ok(())
    }

    fn line(&mut self, segment: &Segment, stroke: &Stroke) -> Result<()> {
        self.indent();
        writeln!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            segment.x1,
            segment.y1,
            segment.x2,
            segment.y2,
            stroke_attrs(stroke)
        )?;
        Ok(())
    }

    fn rect(&mut self, rect: &Rect, fill: Option<Color>, stroke: Option<&Stroke>) -> Result<()> {
        let fill = fill.map_or_else(|| "none".to_string(), |c| c.to_hex());
        let stroke = stroke.map(stroke_attrs).unwrap_or_default();
        self.indent();
        writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
            rect.x, rect.y, rect.width, rect.height, fill, stroke
        )?;
        Ok(())
    }

    fn dot(&mut self, center: Point, radius_mm: f32, color: Color) -> Result<()> {
        self.indent();
        writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            center.x, center.y, radius_mm, color
        )?;
        Ok(())
    }

    fn text(&mut self, origin: Point, style: &TextStyle, content: &str) -> Result<()> {
        let mut attrs = String::new();
        if style.anchor == TextAnchor::Middle {
            attrs.push_str(r#" text-anchor="middle""#);
        }
        if style.bold {
            attrs.push_str(r#" font-weight="bold""#);
        }

        self.indent();
        writeln!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" fill="{}"{}>{}</text>"#,
            origin.x,
            origin.y,
            style.size_mm,
            FONT_FAMILY,
            style.color,
            attrs,
            escape_xml(content)
        )?;
        Ok(())
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}""#,
        stroke.color, stroke.width_mm
    );
    if stroke.opacity < 1.0 {
        attrs.push_str(&format!(r#" stroke-opacity="{}""#, stroke.opacity));
    }
    if let Some([on, off]) = stroke.dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{},{}""#, on, off));
    }
    attrs
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a sheet as a standalone SVG document
pub fn render_svg(options: &SheetOptions) -> Result<String> {
    let geometry = compose_sheet(options);
    let mut surface = SvgSurface::new(geometry.page);
    draw_sheet(&geometry, &options.typography, &mut surface)?;
    surface.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uses_millimetre_viewbox() {
        let svg = render_svg(&SheetOptions::default()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="210mm" height="297mm" viewBox="0 0 210 297""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_slant_layer_is_clipped() {
        let svg = render_svg(&SheetOptions::default()).unwrap();
        assert!(svg.contains(r#"<clipPath id="clip0"><rect x="25" y="25" width="165" height="247"/></clipPath>"#));
        assert!(svg.contains(r#"<g opacity="0.5" clip-path="url(#clip0)">"#));
    }

    #[test]
    fn test_groups_are_balanced() {
        let svg = render_svg(&SheetOptions::default()).unwrap();
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn test_dashed_stroke() {
        let mut surface = SvgSurface::new(PageSpec::default());
        let stroke = Stroke::solid(Color::BLACK, 0.2).dashed([4.0, 2.0]).with_opacity(0.6);
        surface
            .line(&Segment::horizontal(10.0, 0.0, 100.0), &stroke)
            .unwrap();
        let svg = surface.finish().unwrap();
        assert!(svg.contains(
            r##"<line x1="0" y1="10" x2="100" y2="10" stroke="#000000" stroke-width="0.2" stroke-opacity="0.6" stroke-dasharray="4,2"/>"##
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut surface = SvgSurface::new(PageSpec::default());
        surface
            .text(
                Point::new(1.0, 2.0),
                &TextStyle::new(2.0, Color::BLACK),
                "A & <B>",
            )
            .unwrap();
        let svg = surface.finish().unwrap();
        assert!(svg.contains("A &amp; &lt;B&gt;"));
    }
}

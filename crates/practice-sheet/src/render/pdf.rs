//! PDF output backend
//!
//! The whole page is drawn under a single transform that maps millimetres
//! with a downward y axis onto PDF points, so geometry goes into the
//! content stream unchanged. Text is flipped back locally so glyphs stay
//! upright.

use lopdf::{Dictionary, Document, Object, Stream};

use crate::constants::{HELVETICA_CHAR_WIDTH_RATIO, POINTS_PER_MM, mm_to_pt};
use crate::layout::{Point, Rect, Segment};
use crate::options::SheetOptions;
use crate::sheet::compose_sheet;
use crate::types::{Color, PageSpec, Result};

use super::{Stroke, Surface, TextAnchor, TextStyle, draw_sheet};

/// Bezier control point factor for approximating a quarter circle
const CIRCLE_KAPPA: f32 = 0.552_284_8;

/// Accumulates a single-page content stream
pub struct PdfSurface {
    page: PageSpec,
    ops: String,
    /// Opacity of each open layer, already multiplied with its parents
    layers: Vec<f32>,
    /// Distinct alpha values, indexed by ExtGState name
    alphas: Vec<f32>,
}

impl PdfSurface {
    pub fn new(page: PageSpec) -> Self {
        let mut ops = String::new();
        ops.push_str(&format!(
            "q {} 0 0 {} 0 {} cm\n",
            POINTS_PER_MM,
            -POINTS_PER_MM,
            mm_to_pt(page.height_mm)
        ));

        Self {
            page,
            ops,
            layers: Vec::new(),
            alphas: Vec::new(),
        }
    }

    /// Close the content stream and wrap it in a one-page document
    pub fn into_document(mut self) -> Result<Document> {
        while !self.layers.is_empty() {
            self.end_layer()?;
        }
        self.ops.push_str("Q\n");

        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();

        // Fonts
        let mut fonts = Dictionary::new();
        for (name, base_font) in [("F1", "Helvetica"), ("F2", "Helvetica-Bold")] {
            let mut font_dict = Dictionary::new();
            font_dict.set("Type", Object::Name(b"Font".to_vec()));
            font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
            font_dict.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
            font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
            let font_id = output.add_object(font_dict);
            fonts.set(name, Object::Reference(font_id));
        }

        // Transparency states
        let mut ext_gstates = Dictionary::new();
        for (idx, &alpha) in self.alphas.iter().enumerate() {
            let mut gs = Dictionary::new();
            gs.set("Type", Object::Name(b"ExtGState".to_vec()));
            gs.set("CA", Object::Real(alpha));
            gs.set("ca", Object::Real(alpha));
            ext_gstates.set(gstate_name(idx).as_bytes(), Object::Dictionary(gs));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if !ext_gstates.is_empty() {
            resources.set("ExtGState", Object::Dictionary(ext_gstates));
        }

        let content_id = output.add_object(Stream::new(Dictionary::new(), self.ops.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(mm_to_pt(self.page.width_mm)),
                Object::Real(mm_to_pt(self.page.height_mm)),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));
        let page_id = output.add_object(page_dict);

        // Create pages tree
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        output
            .objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));

        output.trailer.set("Root", catalog_id);

        Ok(output)
    }

    fn layer_opacity(&self) -> f32 {
        self.layers.last().copied().unwrap_or(1.0)
    }

    /// Emit a `gs` operator for `alpha` unless it is fully opaque
    fn set_alpha(&mut self, alpha: f32) {
        if alpha >= 1.0 {
            return;
        }
        let idx = match self.alphas.iter().position(|&a| a == alpha) {
            Some(idx) => idx,
            None => {
                self.alphas.push(alpha);
                self.alphas.len() - 1
            }
        };
        self.ops.push_str(&format!("/{} gs\n", gstate_name(idx)));
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        let (r, g, b) = stroke.color.unit_components();
        self.ops.push_str(&format!("{} {} {} RG\n", r, g, b));
        self.ops.push_str(&format!("{} w\n", stroke.width_mm));
        match stroke.dash {
            Some([on, off]) => self.ops.push_str(&format!("[{} {}] 0 d\n", on, off)),
            None => self.ops.push_str("[] 0 d\n"),
        }
    }

    fn set_fill(&mut self, color: Color) {
        let (r, g, b) = color.unit_components();
        self.ops.push_str(&format!("{} {} {} rg\n", r, g, b));
    }
}

impl Surface for PdfSurface {
    fn begin_layer(&mut self, opacity: f32, clip: Option<&Rect>) -> Result<()> {
        let combined = self.layer_opacity() * opacity;
        self.ops.push_str("q\n");
        if let Some(rect) = clip {
            self.ops.push_str(&format!(
                "{} {} {} {} re W n\n",
                rect.x, rect.y, rect.width, rect.height
            ));
        }
        self.layers.push(combined);
        Ok(())
    }

    fn end_layer(&mut self) -> Result<()> {
        if self.layers.pop().is_some() {
            self.ops.push_str("Q\n");
        }
        Ok(())
    }

    fn line(&mut self, segment: &Segment, stroke: &Stroke) -> Result<()> {
        self.ops.push_str("q\n");
        self.set_alpha(self.layer_opacity() * stroke.opacity);
        self.set_stroke(stroke);
        self.ops.push_str(&format!(
            "{} {} m {} {} l S\n",
            segment.x1, segment.y1, segment.x2, segment.y2
        ));
        self.ops.push_str("Q\n");
        Ok(())
    }

    fn rect(&mut self, rect: &Rect, fill: Option<Color>, stroke: Option<&Stroke>) -> Result<()> {
        let paint = match (fill, stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return Ok(()),
        };

        self.ops.push_str("q\n");
        let stroke_alpha = stroke.map_or(1.0, |s| s.opacity);
        self.set_alpha(self.layer_opacity() * stroke_alpha);
        if let Some(color) = fill {
            self.set_fill(color);
        }
        if let Some(stroke) = stroke {
            self.set_stroke(stroke);
        }
        self.ops.push_str(&format!(
            "{} {} {} {} re {}\n",
            rect.x, rect.y, rect.width, rect.height, paint
        ));
        self.ops.push_str("Q\n");
        Ok(())
    }

    fn dot(&mut self, center: Point, radius_mm: f32, color: Color) -> Result<()> {
        let (cx, cy, r) = (center.x, center.y, radius_mm);
        let k = r * CIRCLE_KAPPA;

        self.ops.push_str("q\n");
        self.set_alpha(self.layer_opacity());
        self.set_fill(color);
        self.ops.push_str(&format!("{} {} m\n", cx + r, cy));
        self.ops.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            cx + r,
            cy + k,
            cx + k,
            cy + r,
            cx,
            cy + r
        ));
        self.ops.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            cx - k,
            cy + r,
            cx - r,
            cy + k,
            cx - r,
            cy
        ));
        self.ops.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            cx - r,
            cy - k,
            cx - k,
            cy - r,
            cx,
            cy - r
        ));
        self.ops.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            cx + k,
            cy - r,
            cx + r,
            cy - k,
            cx + r,
            cy
        ));
        self.ops.push_str("f\nQ\n");
        Ok(())
    }

    fn text(&mut self, origin: Point, style: &TextStyle, content: &str) -> Result<()> {
        let font = if style.bold { "F2" } else { "F1" };
        let offset = match style.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => {
                let text_width =
                    content.chars().count() as f32 * style.size_mm * HELVETICA_CHAR_WIDTH_RATIO;
                -text_width / 2.0
            }
        };

        self.ops.push_str("q\n");
        self.set_alpha(self.layer_opacity());
        self.set_fill(style.color);
        self.ops.push_str(&format!(
            "1 0 0 -1 {} {} cm BT /{} {} Tf {} 0 Td ({}) Tj ET\nQ\n",
            origin.x,
            origin.y,
            font,
            style.size_mm,
            offset,
            escape_pdf_text(content)
        ));
        Ok(())
    }
}

fn gstate_name(idx: usize) -> String {
    format!("GS{}", idx)
}

/// Escape a string for a PDF literal, mapping to WinAnsi where needed
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '°' => escaped.push_str("\\260"),
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Render a sheet as a one-page PDF at physical size
pub fn render_pdf(options: &SheetOptions) -> Result<Document> {
    let geometry = compose_sheet(options);
    let mut surface = PdfSurface::new(geometry.page);
    draw_sheet(&geometry, &options.typography, &mut surface)?;
    surface.into_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(doc: &Document) -> String {
        let pages = doc.get_pages();
        let page_id = *pages.get(&1).unwrap();
        String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap()
    }

    #[test]
    fn test_single_page_at_physical_size() {
        let doc = render_pdf(&SheetOptions::default()).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = *pages.get(&1).unwrap();
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.28).abs() < 0.1);
        assert!((height - 841.89).abs() < 0.1);
    }

    #[test]
    fn test_content_is_flipped_into_millimetres() {
        let doc = render_pdf(&SheetOptions::default()).unwrap();
        let content = content_of(&doc);
        assert!(content.starts_with(&format!("q {} 0 0 {} 0 ", POINTS_PER_MM, -POINTS_PER_MM)));
        assert!(content.contains("25 25 165 247 re W n"));
    }

    #[test]
    fn test_opacity_uses_ext_gstate() {
        let mut surface = PdfSurface::new(PageSpec::default());
        surface.begin_layer(0.5, None).unwrap();
        let stroke = Stroke::solid(Color::BLACK, 0.3).with_opacity(0.5);
        surface
            .line(&Segment::horizontal(10.0, 0.0, 10.0), &stroke)
            .unwrap();
        surface.end_layer().unwrap();
        assert_eq!(surface.alphas, vec![0.25]);

        let doc = surface.into_document().unwrap();
        assert!(content_of(&doc).contains("/GS0 gs"));
    }

    #[test]
    fn test_escape_pdf_text() {
        assert_eq!(escape_pdf_text("Slant 75° (x)"), "Slant 75\\260 \\(x\\)");
    }
}

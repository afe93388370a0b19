//! Printable HTML wrapper around the SVG output

use crate::options::SheetOptions;
use crate::types::Result;

use super::render_svg;

/// Render a sheet as an HTML page sized for printing at 1:1.
///
/// The `@page` rule sets the paper size and zero margins, so printing from
/// a browser reproduces the millimetre dimensions exactly.
pub fn render_print_html(options: &SheetOptions) -> Result<String> {
    let page = options.page_spec();
    let svg = render_svg(options)?;
    // Drop the XML declaration; it is not valid inside HTML
    let svg_body = svg
        .split_once("?>\n")
        .map_or(svg.as_str(), |(_, body)| body);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Handwriting Practice Sheet</title>
<style>
@page {{ size: {w}mm {h}mm; margin: 0; }}
html, body {{ margin: 0; padding: 0; }}
svg {{ display: block; width: {w}mm; height: {h}mm; }}
</style>
</head>
<body>
{svg}</body>
</html>
"#,
        w = page.width_mm,
        h = page.height_mm,
        svg = svg_body
    ))
}

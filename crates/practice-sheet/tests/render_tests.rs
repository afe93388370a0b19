use lopdf::Document;
use practice_sheet::*;
use std::path::Path;

#[test]
fn test_export_format_from_path() {
    assert_eq!(ExportFormat::from_path("sheet.svg"), Some(ExportFormat::Svg));
    assert_eq!(ExportFormat::from_path("sheet.PDF"), Some(ExportFormat::Pdf));
    assert_eq!(
        ExportFormat::from_path("out/sheet.htm"),
        Some(ExportFormat::PrintHtml)
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("sheet.html")),
        Some(ExportFormat::PrintHtml)
    );
    assert_eq!(ExportFormat::from_path("sheet.png"), None);
    assert_eq!(ExportFormat::from_path("sheet"), None);
}

#[test]
fn test_svg_draws_every_row() {
    let options = SheetOptions::default();
    let svg = render_svg(&options).unwrap();

    // The baseline is the only solid black line apart from the legend sample
    let baselines = svg
        .matches(r##"stroke="#000000" stroke-width="0.3"/>"##)
        .count();
    assert_eq!(baselines, 12 + 1);
}

#[test]
fn test_svg_labels_and_legend() {
    let mut options = SheetOptions::default();
    options.typography.display.show.line_labels = true;
    let svg = render_svg(&options).unwrap();

    assert!(svg.contains("Handwriting Practice Sheet"));
    assert!(svg.contains("A=Ascender, X=X-Height, B=Baseline, D=Descender"));
    assert!(svg.contains(r#"text-anchor="middle" font-weight="bold">B</text>"#));
}

#[test]
fn test_svg_legend_names_slant() {
    let svg = render_svg(&SheetOptions::default()).unwrap();
    assert!(svg.contains("Slant 75° from baseline"));
}

#[test]
fn test_hidden_legend() {
    let mut options = SheetOptions::default();
    options.typography.display.show.legend = false;
    let svg = render_svg(&options).unwrap();
    assert!(!svg.contains("Handwriting Practice Sheet"));
}

#[test]
fn test_dotted_grid_svg() {
    let mut options = SheetOptions::default();
    options.typography.display.show.grid = true;
    options.typography.display.grid_style = GridStyle::Dotted;
    let svg = render_svg(&options).unwrap();
    let geometry = compose_sheet(&options);
    assert_eq!(svg.matches("<circle ").count(), geometry.grid_dots.len());
}

#[test]
fn test_pdf_round_trips_through_lopdf() {
    let mut doc = render_pdf(&SheetOptions::default()).unwrap();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let loaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
}

#[tokio::test]
async fn test_export_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.svg");

    export_sheet(&SheetOptions::default(), ExportFormat::Svg, &path)
        .await
        .unwrap();

    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(contents.contains("<svg"));
}

#[tokio::test]
async fn test_export_pdf_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.pdf");

    export_sheet(&SheetOptions::default(), ExportFormat::Pdf, &path)
        .await
        .unwrap();

    let bytes = tokio::fs::read(&path).await.unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn test_export_print_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.html");

    export_sheet(&SheetOptions::default(), ExportFormat::PrintHtml, &path)
        .await
        .unwrap();

    let html = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(html.contains("@page { size: 210mm 297mm; margin: 0; }"));
}

#[tokio::test]
async fn test_save_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.pdf");

    let doc = render_pdf(&SheetOptions::default()).unwrap();
    save_pdf(doc, &path).await.unwrap();
    assert!(tokio::fs::metadata(&path).await.unwrap().len() > 0);
}

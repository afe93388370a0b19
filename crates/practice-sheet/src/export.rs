//! Writing rendered sheets to disk

use std::path::Path;

use lopdf::Document;

use crate::options::SheetOptions;
use crate::render::{render_pdf, render_print_html, render_svg};
use crate::types::*;

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Pdf,
    /// HTML page with print-ready `@page` sizing
    PrintHtml,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "svg" => Some(ExportFormat::Svg),
            "pdf" => Some(ExportFormat::Pdf),
            "html" | "htm" => Some(ExportFormat::PrintHtml),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::PrintHtml => "html",
        }
    }
}

/// Render a sheet and write it to `path`.
///
/// Rendering runs on a blocking task; the file is written asynchronously.
pub async fn export_sheet(
    options: &SheetOptions,
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref().to_owned();
    let options = *options;

    let bytes = tokio::task::spawn_blocking(move || match format {
        ExportFormat::Svg => render_svg(&options).map(String::into_bytes),
        ExportFormat::PrintHtml => render_print_html(&options).map(String::into_bytes),
        ExportFormat::Pdf => {
            let mut doc = render_pdf(&options)?;
            let mut writer = Vec::new();
            doc.save_to(&mut writer)?;
            Ok(writer)
        }
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;
    log::info!("Wrote {:?} sheet to {}", format, path.display());
    Ok(())
}

/// Save a rendered PDF document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, SheetError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

pub mod constants;
mod export;
pub mod layout;
mod options;
pub mod presets;
pub mod render;
mod sheet;
mod stats;
mod types;

pub use export::{ExportFormat, export_sheet, save_pdf};
pub use options::*;
pub use presets::{MarginPreset, TypographyPreset};
pub use render::{draw_sheet, render_pdf, render_print_html, render_svg};
pub use sheet::{SheetGeometry, compose_sheet};
pub use stats::calculate_statistics;
pub use types::*;

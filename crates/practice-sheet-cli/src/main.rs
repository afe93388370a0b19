use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Preset base size that keeps every preset inside the accepted metric ranges
const PRESET_BASE_SIZE_MM: f32 = 10.0;

#[derive(Parser)]
#[command(name = "psheet", about = "Handwriting practice sheet generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a practice sheet
    Generate {
        /// Output file (.svg, .pdf or .html)
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (inferred from the file extension by default)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        #[command(flatten)]
        sheet: SheetArgs,

        /// Show statistics only, don't write the sheet
        #[arg(long)]
        stats_only: bool,
    },

    /// Show layout statistics for a sheet
    Stats {
        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Write a configuration file to start from
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Typography preset to apply
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,

        /// Base size the preset is scaled to, in mm
        #[arg(long, default_value_t = PRESET_BASE_SIZE_MM)]
        base_size: f32,

        /// Also use the preset's line spacing as a fixed row pitch
        #[arg(long, requires = "preset")]
        preset_pitch: bool,

        /// Margin preset to apply
        #[arg(long, value_enum)]
        margin_preset: Option<MarginPresetArg>,
    },

    /// List the typography and margin presets
    Presets {
        /// Base size used to show preset metrics, in mm
        #[arg(long, default_value_t = PRESET_BASE_SIZE_MM)]
        base_size: f32,
    },
}

/// Sheet settings: a config file plus individual overrides
#[derive(Args)]
struct SheetArgs {
    /// Load settings from a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Custom page width in mm (requires --height)
    #[arg(long, requires = "height")]
    width: Option<f32>,

    /// Custom page height in mm (requires --width)
    #[arg(long, requires = "width")]
    height: Option<f32>,

    /// Typography preset
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Base size for the typography preset, in mm
    #[arg(long, default_value_t = PRESET_BASE_SIZE_MM)]
    base_size: f32,

    /// Also use the preset's line spacing as a fixed row pitch
    #[arg(long, requires = "preset")]
    preset_pitch: bool,

    /// Number of writing rows
    #[arg(long)]
    lines: Option<usize>,

    /// X-height in mm
    #[arg(long)]
    x_height: Option<f32>,

    /// Cap height in mm
    #[arg(long)]
    cap_height: Option<f32>,

    /// Ascender height in mm
    #[arg(long)]
    ascender: Option<f32>,

    /// Descender depth in mm
    #[arg(long)]
    descender: Option<f32>,

    /// Slant angle from the baseline in degrees (90 = upright)
    #[arg(long)]
    slant: Option<f32>,

    /// Distance between slant lines in mm
    #[arg(long)]
    slant_spacing: Option<f32>,

    /// Margin preset
    #[arg(long, value_enum)]
    margin_preset: Option<MarginPresetArg>,

    /// Uniform margin in mm (overrides the margin preset)
    #[arg(long)]
    margin: Option<f32>,

    /// Row distribution
    #[arg(long, value_enum)]
    distribution: Option<DistributionArg>,

    /// Baseline pitch in mm (implies fixed-pitch distribution)
    #[arg(long)]
    pitch: Option<f32>,

    /// Grid spacing in mm
    #[arg(long)]
    grid_spacing: Option<f32>,

    /// Grid style
    #[arg(long, value_enum)]
    grid_style: Option<GridStyleArg>,

    /// Show the grid
    #[arg(long)]
    grid: bool,

    /// Hide slant lines
    #[arg(long)]
    no_slant: bool,

    /// Show the cap-height line
    #[arg(long)]
    cap_line: bool,

    /// Show row labels
    #[arg(long)]
    labels: bool,

    /// Hide margin guides
    #[arg(long)]
    no_margins: bool,

    /// Hide the legend
    #[arg(long)]
    no_legend: bool,

    /// Pull out-of-range values into range instead of failing
    #[arg(long)]
    clamp: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Svg,
    Pdf,
    Print,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Italic,
    Copperplate,
    Spencerian,
    Modern,
    Minimal,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarginPresetArg {
    Standard,
    Minimal,
    Wide,
    Notebook,
}

#[derive(Clone, Copy, ValueEnum)]
enum DistributionArg {
    EqualGap,
    FillAvailable,
}

#[derive(Clone, Copy, ValueEnum)]
enum GridStyleArg {
    Lines,
    Dots,
}

impl From<FormatArg> for practice_sheet::ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Svg => Self::Svg,
            FormatArg::Pdf => Self::Pdf,
            FormatArg::Print => Self::PrintHtml,
        }
    }
}

impl From<PaperArg> for practice_sheet::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for practice_sheet::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<PresetArg> for practice_sheet::TypographyPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Italic => Self::Italic,
            PresetArg::Copperplate => Self::Copperplate,
            PresetArg::Spencerian => Self::Spencerian,
            PresetArg::Modern => Self::Modern,
            PresetArg::Minimal => Self::Minimal,
        }
    }
}

impl From<MarginPresetArg> for practice_sheet::MarginPreset {
    fn from(arg: MarginPresetArg) -> Self {
        match arg {
            MarginPresetArg::Standard => Self::Standard,
            MarginPresetArg::Minimal => Self::Minimal,
            MarginPresetArg::Wide => Self::Wide,
            MarginPresetArg::Notebook => Self::Notebook,
        }
    }
}

impl From<DistributionArg> for practice_sheet::DistributionMode {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::EqualGap => Self::EqualGap,
            DistributionArg::FillAvailable => Self::FillAvailable,
        }
    }
}

impl From<GridStyleArg> for practice_sheet::GridStyle {
    fn from(arg: GridStyleArg) -> Self {
        match arg {
            GridStyleArg::Lines => Self::Lines,
            GridStyleArg::Dots => Self::Dotted,
        }
    }
}

impl SheetArgs {
    /// Load the config file (or defaults) and layer the overrides on top
    async fn resolve(&self) -> Result<practice_sheet::SheetOptions> {
        let mut options = match &self.config {
            Some(path) => practice_sheet::SheetOptions::load(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => practice_sheet::SheetOptions::default(),
        };

        if let Some(paper) = self.paper {
            options = options.with_paper_size(paper.into());
        }
        if let Some(orientation) = self.orientation {
            options = options.with_orientation(orientation.into());
        }
        if let (Some(width), Some(height)) = (self.width, self.height) {
            options = options.with_custom_size(Some(practice_sheet::PageSpec::new(width, height)));
        }

        let mut typography = options.typography;
        if let Some(preset) = self.preset {
            typography = if self.preset_pitch {
                typography.with_preset_pitch(preset.into(), self.base_size)
            } else {
                typography.with_preset(preset.into(), self.base_size)
            };
        }
        if let Some(margin_preset) = self.margin_preset {
            typography = typography.with_margin_preset(margin_preset.into());
        }
        if let Some(margin) = self.margin {
            typography = typography.with_margins(practice_sheet::Margins::uniform(margin));
        }
        if let Some(lines) = self.lines {
            typography = typography.with_number_of_lines(lines);
        }
        if let Some(x_height) = self.x_height {
            typography.x_height_mm = x_height;
        }
        if let Some(cap_height) = self.cap_height {
            typography.cap_height_mm = cap_height;
        }
        if let Some(ascender) = self.ascender {
            typography.ascender_height_mm = ascender;
        }
        if let Some(descender) = self.descender {
            typography.descender_depth_mm = descender;
        }
        if let Some(slant) = self.slant {
            typography = typography.with_slant_angle(slant);
        }
        if let Some(spacing) = self.slant_spacing {
            typography.slant_line_spacing_mm = spacing;
        }
        if let Some(spacing) = self.grid_spacing {
            typography.grid_spacing_mm = spacing;
        }
        if let Some(distribution) = self.distribution {
            typography = typography.with_distribution(distribution.into());
        }
        if let Some(pitch_mm) = self.pitch {
            typography = typography
                .with_distribution(practice_sheet::DistributionMode::FixedPitch { pitch_mm });
        }

        let display = &mut typography.display;
        if let Some(style) = self.grid_style {
            display.grid_style = style.into();
        }
        display.show.grid |= self.grid;
        display.show.cap_height |= self.cap_line;
        display.show.line_labels |= self.labels;
        display.show.slant_lines &= !self.no_slant;
        display.show.margins &= !self.no_margins;
        display.show.legend &= !self.no_legend;

        options = options.with_typography(typography);
        if self.clamp {
            options = options.clamped();
        }

        options.validate()?;
        Ok(options)
    }
}

/// Build the options written by `init-config`, pulled into range if a
/// preset overshoots the accepted metrics
fn starter_options(
    preset: Option<PresetArg>,
    base_size: f32,
    preset_pitch: bool,
    margin_preset: Option<MarginPresetArg>,
) -> Result<practice_sheet::SheetOptions> {
    let mut options = practice_sheet::SheetOptions::default();
    if let Some(preset) = preset {
        options.typography = if preset_pitch {
            options.typography.with_preset_pitch(preset.into(), base_size)
        } else {
            options.typography.with_preset(preset.into(), base_size)
        };
    }
    if let Some(margin_preset) = margin_preset {
        options.typography = options.typography.with_margin_preset(margin_preset.into());
    }
    if let Err(e) = options.validate() {
        log::warn!("Pulling config into the accepted ranges: {}", e);
        options = options.clamped();
    }
    options.validate()?;
    Ok(options)
}

fn print_statistics(stats: &practice_sheet::SheetStatistics) {
    println!("Sheet Statistics:");
    println!(
        "  Page: {} x {} mm",
        stats.page.width_mm, stats.page.height_mm
    );
    println!(
        "  Writing area: {:.1} x {:.1} mm",
        stats.writing_width_mm, stats.writing_height_mm
    );
    println!(
        "  Rows: {} of {} requested",
        stats.produced_rows, stats.requested_rows
    );
    if let Some(pitch) = stats.row_pitch_mm {
        println!("  Row pitch: {:.2} mm", pitch);
    }
    if let Some(gap) = stats.inter_row_gap_mm {
        println!("  Gap between rows: {:.2} mm", gap);
    }
    println!("  Slant lines: {}", stats.slant_lines);
    println!(
        "  Grid lines: {} vertical, {} horizontal",
        stats.vertical_grid_lines, stats.horizontal_grid_lines
    );
    if stats.is_truncated() {
        println!("  Warning: not every requested row fits on the page");
    }
}

fn output_format(path: &Path, format: Option<FormatArg>) -> Result<practice_sheet::ExportFormat> {
    if let Some(format) = format {
        return Ok(format.into());
    }
    match practice_sheet::ExportFormat::from_path(path) {
        Some(format) => Ok(format),
        None => bail!(
            "Cannot tell the output format from {}; pass --format",
            path.display()
        ),
    }
}

fn print_presets(base_size: f32) {
    println!("Typography presets (base size {} mm):", base_size);
    for preset in practice_sheet::TypographyPreset::ALL {
        let m = preset.metrics(base_size);
        println!(
            "  {:<20} x {:.1}  cap {:.1}  asc {:.1}  desc {:.1}  slant {}°  pitch {:.1} mm",
            preset.name(),
            m.x_height_mm,
            m.cap_height_mm,
            m.ascender_height_mm,
            m.descender_depth_mm,
            m.slant_angle_degrees,
            m.line_pitch_mm
        );
    }

    println!("Margin presets (top/bottom/left/right mm):");
    for preset in practice_sheet::MarginPreset::ALL {
        let m = preset.margins();
        println!(
            "  {:<20} {}/{}/{}/{}",
            preset.name(),
            m.top_mm,
            m.bottom_mm,
            m.left_mm,
            m.right_mm
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output,
            format,
            sheet,
            stats_only,
        } => {
            let options = sheet.resolve().await?;

            let stats = practice_sheet::calculate_statistics(&options);
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }

            let format = output_format(&output, format)?;
            practice_sheet::export_sheet(&options, format, &output).await?;
            println!("Generated sheet → {}", output.display());
        }

        Commands::Stats { sheet } => {
            let options = sheet.resolve().await?;
            print_statistics(&practice_sheet::calculate_statistics(&options));
        }

        Commands::InitConfig {
            output,
            preset,
            base_size,
            preset_pitch,
            margin_preset,
        } => {
            let options = starter_options(preset, base_size, preset_pitch, margin_preset)?;
            options.save(&output).await?;
            println!("Wrote config → {}", output.display());
        }

        Commands::Presets { base_size } => print_presets(base_size),
    }

    Ok(())
}

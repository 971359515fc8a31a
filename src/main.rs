//! Waterfall layout demo driver - Entry Point

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use waterfall::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ResolvedConfig,
};
use waterfall::report::LayoutReport;
use waterfall::source::HeightSource;
use waterfall::{AppError, ItemIndex, Rect, WaterfallLayout};

/// Waterfall layout demo - balanced columns for variable-height items
#[derive(Parser, Debug)]
#[command(name = "waterfall")]
#[command(version)]
#[command(about = "Lay out variable-height items in balanced columns and query a viewport")]
pub struct Args {
    /// Number of columns
    #[arg(short, long)]
    pub columns: Option<usize>,

    /// Inset applied to every side of each item frame
    #[arg(short, long)]
    pub padding: Option<f64>,

    /// Total content width shared by the columns
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Number of items to lay out
    #[arg(short = 'n', long)]
    pub items: Option<usize>,

    /// Explicit item heights, comma-separated, repeated when there are more items
    #[arg(long, value_delimiter = ',')]
    pub heights: Vec<f64>,

    /// Viewport to query as x,y,width,height (defaults to the whole content)
    #[arg(long, allow_hyphen_values = true)]
    pub viewport: Option<Rect>,

    /// Item index to look up (repeatable)
    #[arg(short, long = "index")]
    pub index: Vec<usize>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Overrides for every flag the user set.
    fn overrides(&self) -> CliOverrides {
        let explicit_heights = !self.heights.is_empty();

        CliOverrides {
            columns: self.columns,
            cell_padding: self.padding,
            content_width: self.width,
            // Explicit heights without --items lay out each height once
            item_count: self
                .items
                .or_else(|| explicit_heights.then_some(self.heights.len())),
            heights: explicit_heights.then(|| HeightSource::Cycle {
                heights: self.heights.clone(),
            }),
            log_file_path: self.log_file.clone(),
        }
    }
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged)?;
    let config = apply_cli_overrides(with_env, args.overrides());
    config.validate()?;
    Ok(config)
}

/// Lay out the configured items and query them.
fn run(config: &ResolvedConfig, args: &Args) -> Result<LayoutReport, AppError> {
    let mut layout = WaterfallLayout::new(config.layout_parameters());
    layout.prepare(config.item_count, |index| config.heights.height_at(index))?;

    let extent = layout.content_extent();
    let viewport = args
        .viewport
        .unwrap_or_else(|| Rect::new(0.0, 0.0, extent.width, extent.height));
    let lookups: Vec<ItemIndex> = args.index.iter().copied().map(ItemIndex::new).collect();

    let report = LayoutReport::build(&layout, viewport, &lookups);
    info!(
        items = report.item_count,
        visible = report.visible.len(),
        content_height = report.content_size.height,
        "layout report ready"
    );
    Ok(report)
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    waterfall::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let report = run(&config, &args)?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", report.to_json()?)?;
    } else {
        write!(stdout, "{report}")?;
    }

    Ok(())
}

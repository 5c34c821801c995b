use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use pitchtag_config::{LogFormat, LoggingConfig, PendingPointPolicy, Roster, Settings};
use pitchtag_core::ImageExtent;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::state::AppState;

/// Tag player actions on a field image, one pair of clicks at a time
#[derive(Parser, Debug)]
#[command(name = "pitchtag", version)]
struct Cli {
    /// Directory relative paths are resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Field image (overrides PITCHTAG_IMAGE)
    #[arg(long)]
    image: Option<PathBuf>,

    /// CSV log file (overrides PITCHTAG_LOG)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Roster config file (overrides PITCHTAG_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image size as WIDTHxHEIGHT, instead of reading it from the image
    #[arg(long, value_parser = parse_extent)]
    extent: Option<ImageExtent>,

    /// What to do with a pending point when the selection changes: discard or keep
    #[arg(long)]
    pending_point: Option<PendingPointPolicy>,

    /// Log output format: pretty or json
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Print the resolved settings and exit
    #[arg(long)]
    print_settings: bool,
}

fn parse_extent(s: &str) -> Result<ImageExtent, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s}"))?;
    let width: u32 = w.trim().parse().map_err(|_| format!("invalid width: {w}"))?;
    let height: u32 = h.trim().parse().map_err(|_| format!("invalid height: {h}"))?;
    if width == 0 || height == 0 {
        return Err("image extent must be non-zero".to_string());
    }
    Ok(ImageExtent::new(width, height))
}

fn settings_from(cli: &Cli) -> Settings {
    let mut settings = Settings::new();

    if let Some(image) = &cli.image {
        settings.paths.image = image.clone();
    }
    if let Some(log) = &cli.log {
        settings.paths.log = log.clone();
    }
    if let Some(config) = &cli.config {
        settings.paths.config = config.clone();
    }
    if let Some(policy) = cli.pending_point {
        settings.recorder.pending_point = policy;
    }
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }

    settings.resolve_paths(&cli.base_dir)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_extent(image: &Path) -> anyhow::Result<ImageExtent> {
    let (width, height) = image::image_dimensions(image)
        .with_context(|| format!("Failed to read field image {}", image.display()))?;
    anyhow::ensure!(width > 0 && height > 0, "Field image {} is empty", image.display());
    Ok(ImageExtent::new(width, height))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = settings_from(&cli);

    if cli.print_settings {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    init_tracing(&settings.logging);

    // A missing or broken config is fatal at startup
    let roster = Roster::load(&settings.paths.config)
        .with_context(|| format!("Failed to load config {}", settings.paths.config.display()))?;

    let extent = match cli.extent {
        Some(extent) => extent,
        None => read_extent(&settings.paths.image)?,
    };
    tracing::info!(
        "Field image {}x{}, logging to {}",
        extent.width,
        extent.height,
        settings.paths.log.display()
    );

    let controller = AppController::new(settings.event_capacity);
    let state = AppState::new(settings, roster, extent);
    let tasks = controller.spawn_tasks(state);

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };
    controller.supervise(tasks, ctrl_c).await;

    Ok(())
}

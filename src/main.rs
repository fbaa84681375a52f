mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod roc;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{DirMetricSource, FileSystemWriter, StdoutPresenter};
use adapters::outbound::network::HttpMetricSource;
use application::factories::RendererFactory;
use application::use_cases::{DashboardOrchestrator, RefreshSnapshotUseCase};
use cli::{Args, OutputFormat};
use ports::outbound::{MetricSource, OutputPresenter};
use roc::domain::WindowPreset;
use shared::error::{ExitCode, RocError};
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Load config: explicit path, or auto-discovery in the working directory
    let config = match &args.config {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(Path::new("."))?,
    };
    let config = config.unwrap_or_default();

    // CLI flags take precedence over config values
    let url = args.url.clone().or(config.url);
    let data_dir = args.data_dir.clone().or(config.data_dir);
    let window = args
        .window
        .or(config.window_days.map(WindowPreset::from_days))
        .unwrap_or_default();
    let format = match args.format {
        Some(format) => format,
        None => match config.format.as_deref() {
            Some(value) => value.parse::<OutputFormat>().map_err(|message| {
                RocError::ConfigValidation { message }
            })?,
            None => OutputFormat::Console,
        },
    };
    let interval_secs = args.interval.or(config.interval_secs).unwrap_or(60);

    // Build the metric source (Dependency Injection)
    let source: Box<dyn MetricSource> = match (data_dir, url) {
        (Some(dir), _) => {
            let dir = PathBuf::from(dir);
            validate_data_dir(&dir)?;
            Box::new(DirMetricSource::new(dir))
        }
        (None, Some(url)) => Box::new(HttpMetricSource::new(url)?),
        (None, None) => {
            return Err(RocError::NoSourceConfigured {
                suggestion: "Pass --url or --data-dir, or set one in roc-dash.config.yml"
                    .to_string(),
            }
            .into())
        }
    };

    // Create the render seam
    let renderer = RendererFactory::create(format.renderer_type());
    let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = args.output {
        Box::new(FileSystemWriter::new(PathBuf::from(output_path)))
    } else {
        Box::new(StdoutPresenter::new())
    };

    let mut orchestrator = DashboardOrchestrator::new(renderer, presenter, window);
    let refresh = RefreshSnapshotUseCase::new(source, StderrProgressReporter::new());

    eprintln!("{}", RendererFactory::progress_message(format.renderer_type()));

    if args.watch {
        // Fixed-interval refresh cycle; a slow cycle delays the next tick
        // instead of letting ticks stack up behind it.
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let snapshot = refresh.execute().await;
            orchestrator.replace_snapshot(snapshot)?;
        }
    } else {
        let snapshot = refresh.execute().await;
        match orchestrator.replace_snapshot(snapshot)? {
            Some(frame) if frame.all_unavailable() => Ok(ExitCode::NoVisibility),
            _ => Ok(ExitCode::Success),
        }
    }
}

fn validate_data_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RocError::InvalidDataDir {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Reject symbolic links for the metric directory
    let metadata = std::fs::symlink_metadata(path).map_err(|e| RocError::InvalidDataDir {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(RocError::InvalidDataDir {
            path: path.to_path_buf(),
            reason: "Security: Metric directory is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(RocError::InvalidDataDir {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

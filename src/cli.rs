use clap::Parser;

use crate::application::factories::RendererType;
use crate::roc::domain::WindowPreset;

/// Output format selection for the rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'console' or 'json'",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Maps the CLI format to the application layer renderer type
    pub fn renderer_type(self) -> RendererType {
        match self {
            OutputFormat::Console => RendererType::Console,
            OutputFormat::Json => RendererType::Json,
        }
    }
}

/// Aggregate Risk Operations Center metrics over an analyst-selected date window
#[derive(Parser, Debug)]
#[command(name = "roc-dash")]
#[command(version)]
#[command(about = "Risk Operations Center dashboard engine", long_about = None)]
pub struct Args {
    /// Base URL of the metric document source (serves <name>.30d.json)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Local directory containing <name>.30d.json metric documents
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Trailing window in days: 7, 14, 30 or 90 (defaults to 30;
    /// anything else falls back to 30)
    #[arg(short, long)]
    pub window: Option<WindowPreset>,

    /// Output format: console or json (defaults to console)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Keep running, re-fetching and re-rendering on a fixed interval
    #[arg(long)]
    pub watch: bool,

    /// Refresh interval in seconds for --watch mode (defaults to 60)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Explicit config file path (default: ./roc-dash.config.yml if present)
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

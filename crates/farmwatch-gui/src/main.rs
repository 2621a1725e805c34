//! Farmwatch desktop dashboard binary.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use farmwatch_gui::config::Config;
use farmwatch_gui::gui::{self, GuiOptions};

/// Farmwatch - desktop dashboard for farm environmental monitoring
#[derive(Parser, Debug)]
#[command(name = "farmwatch", version, about)]
struct Args {
    /// Base URL of the farm monitoring service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Run with generated demo data instead of a live service
    #[arg(long)]
    demo: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    // When quiet mode is enabled, suppress info-level logging
    let filter = if args.quiet {
        EnvFilter::new("warn")
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load();
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    gui::run(config, GuiOptions { demo: args.demo })
}

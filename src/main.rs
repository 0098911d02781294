//! Hybrid Probe - deep-link router and platform capability probe
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hprobe_app::Probe;
use hprobe_core::prelude::*;
use hybrid_probe::headless::HeadlessEvent;
use hybrid_probe::Command;

/// Hybrid Probe - deep-link router and platform capability probe
#[derive(Parser, Debug)]
#[command(name = "hprobe")]
#[command(about = "Route deep links and probe platform capabilities", long_about = None)]
struct Args {
    /// Project directory holding .hprobe/config.toml
    #[arg(long, value_name = "PATH")]
    project: Option<PathBuf>,

    /// Run in headless mode (JSON output)
    #[arg(long)]
    headless: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route one or more deep links, e.g. 'myapp://product?id=100'
    Route {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },
    /// Run one or more capability probes (startup, camera, share, ...)
    Probe {
        #[arg(required = true, value_name = "NAME")]
        probes: Vec<Probe>,
    },
    /// Run the startup sequence, then every sample deep link
    Demo,
    /// Create .hprobe/config.toml with defaults
    Init,
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Route { urls } => Command::Route(urls),
            Commands::Probe { probes } => Command::Probe(probes),
            Commands::Demo => Command::Demo,
            Commands::Init => Command::Init,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    hprobe_core::logging::init()?;

    let project_path = args
        .project
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let result = hybrid_probe::run(&project_path, args.command.into(), args.headless).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
        if args.headless {
            HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
        }
        eprintln!(
            "See {} for details.",
            hprobe_core::logging::current_log_file().display()
        );
    }

    info!("Hybrid Probe exiting");
    result
}

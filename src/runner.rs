//! Command execution
//!
//! Builds an [`AppContext`] from the project's configuration, runs the
//! requested command and streams result entries to stdout as they appear.

use std::path::Path;

use hprobe_app::config::{init_config_dir, load_settings};
use hprobe_app::{AppContext, PlatformProvider, Probe, Step};
use hprobe_core::prelude::*;

use crate::output::{OutputMode, ResultSink};

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Route each URL in order
    Route(Vec<String>),
    /// Run each probe in order
    Probe(Vec<Probe>),
    /// Startup sequence followed by every sample deep link
    Demo,
    /// Write the default config file
    Init,
}

impl Command {
    /// Steps this command runs, in order
    pub fn steps(self) -> Vec<Step> {
        match self {
            Command::Route(urls) => urls.into_iter().map(Step::Route).collect(),
            Command::Probe(probes) => probes.into_iter().map(Step::Probe).collect(),
            Command::Demo => Step::demo(),
            Command::Init => Vec::new(),
        }
    }
}

/// Run `command` against the project at `project_path`
pub async fn run(project_path: &Path, command: Command, headless: bool) -> Result<()> {
    info!("Project: {}", project_path.display());
    info!("Command: {:?}", command);

    if command == Command::Init {
        let path = init_config_dir(project_path).context("initializing config")?;
        println!("Config file: {}", path.display());
        return Ok(());
    }

    let settings = load_settings(project_path);
    let mode = if headless {
        OutputMode::Headless
    } else {
        OutputMode::Text {
            show_timestamps: settings.results.show_timestamps,
        }
    };

    let mut ctx = AppContext::simulated(settings);
    let mut sink = ResultSink::new(mode);
    execute(&mut ctx, &mut sink, command).await;

    info!(
        "Finished with {} result entries ({} errors)",
        ctx.log.len(),
        ctx.log.error_count()
    );
    Ok(())
}

/// Drive `ctx` through `command`, flushing results after every step
pub async fn execute<P: PlatformProvider>(
    ctx: &mut AppContext<P>,
    sink: &mut ResultSink,
    command: Command,
) {
    for step in command.steps() {
        match &step {
            Step::Probe(probe) => sink.probe(probe.name()),
            Step::Route(url) => sink.deep_link(url),
        }
        ctx.step(&step).await;
        sink.flush(&ctx.log);
    }
}

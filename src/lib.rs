//! Hybrid Probe Library
//!
//! Command-line harness for hybrid mobile apps: routes synthetic deep links
//! and probes platform capabilities, printing every outcome.

pub mod headless;
pub mod output;
pub mod runner;

// Re-export main entry points
pub use runner::{run, Command};

//! Configuration file parsing for Hybrid Probe
//!
//! Supports:
//! - `.hprobe/config.toml` - Deep-link scheme, result log, demo payloads and
//!   simulated platform behaviour

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, read_settings};
pub use types::*;

//! Settings parser for .hprobe/config.toml

use super::types::Settings;
use hprobe_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const HPROBE_DIR: &str = ".hprobe";

const DEFAULT_CONFIG: &str = r#"# Hybrid Probe Configuration

[deep_link]
scheme = "myapp://"

[results]
max_entries = 1000
show_timestamps = true

[demo]
share_url = "https://example.com"
browser_url = "https://google.com"
notification_delay_ms = 1000
splash_hide_delay_ms = 2000
camera_quality = 90
camera_source = "prompt"  # prompt, camera or photos
toast_duration = "long"   # short or long

# Simulated platform provider
[platform]
name = "android"
unavailable = []          # e.g. ["camera", "in_app_browser"]
connected = true
connection_type = "wifi"
action_sheet_index = 0

[platform.failures]
# share = "Share canceled"

# Status changes the network listener receives during startup
# [[platform.network_changes]]
# connected = false
# connection_type = "none"
"#;

/// Path of the config file inside a project
pub fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(HPROBE_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `.hprobe/config.toml`
///
/// A missing or unparsable file yields defaults.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = config_path(project_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match read_settings(&config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(e) => {
            warn!("Failed to load {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Read and parse one settings file
pub fn read_settings(config_path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(config_path)?;
    Ok(toml::from_str(&content)?)
}

/// Create a default config file in the .hprobe/ directory
///
/// Existing files are left untouched.
pub fn init_config_dir(project_path: &Path) -> Result<PathBuf> {
    let hprobe_dir = project_path.join(HPROBE_DIR);

    if !hprobe_dir.exists() {
        std::fs::create_dir_all(&hprobe_dir)
            .map_err(|e| Error::config(format!("Failed to create .hprobe dir: {}", e)))?;
    }

    let config_path = hprobe_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Capability;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());

        assert_eq!(settings.deep_link.scheme, "myapp://");
        assert_eq!(settings.results.max_entries, 1000);
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let hprobe_dir = temp.path().join(".hprobe");
        std::fs::create_dir_all(&hprobe_dir).unwrap();

        let config = r#"
[deep_link]
scheme = "shop://"

[results]
max_entries = 50
show_timestamps = false

[platform]
name = "ios"
unavailable = ["toast"]
"#;
        std::fs::write(hprobe_dir.join("config.toml"), config).unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings.deep_link.scheme, "shop://");
        assert_eq!(settings.results.max_entries, 50);
        assert!(!settings.results.show_timestamps);
        assert_eq!(settings.platform.name, "ios");
        assert_eq!(settings.platform.unavailable, vec![Capability::Toast]);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let hprobe_dir = temp.path().join(".hprobe");
        std::fs::create_dir_all(&hprobe_dir).unwrap();

        std::fs::write(hprobe_dir.join("config.toml"), "not valid toml {{{{").unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings.deep_link.scheme, "myapp://");

        let err = read_settings(&config_path(temp.path())).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_read_settings_missing_file() {
        let temp = tempdir().unwrap();
        let err = read_settings(&config_path(temp.path())).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_init_config_dir() {
        let temp = tempdir().unwrap();

        let path = init_config_dir(temp.path()).unwrap();

        assert_eq!(path, config_path(temp.path()));
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let _: Settings = toml::from_str(&content).expect("Default config should be valid TOML");
    }

    #[test]
    fn test_init_config_dir_idempotent() {
        let temp = tempdir().unwrap();

        let path = init_config_dir(temp.path()).unwrap();
        std::fs::write(&path, "[deep_link]\nscheme = \"keep://\"\n").unwrap();

        init_config_dir(temp.path()).unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings.deep_link.scheme, "keep://");
    }
}

//! Configuration types for Hybrid Probe
//!
//! Defines `Settings` (the `.hprobe/config.toml` document) and its sections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::platform::{CameraSource, Capability, InAppBrowserEvent, NetworkStatus, ToastDuration};

/// Scheme prefix stripped from incoming deep links by default
pub const DEFAULT_SCHEME: &str = "myapp://";

/// Application settings (.hprobe/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub deep_link: DeepLinkSettings,

    #[serde(default)]
    pub results: ResultSettings,

    #[serde(default)]
    pub demo: DemoSettings,

    #[serde(default)]
    pub platform: PlatformSettings,
}

/// Deep-link routing settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeepLinkSettings {
    /// Custom URL scheme prefix, including `://`
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for DeepLinkSettings {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

/// Result log settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultSettings {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for ResultSettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            show_timestamps: true,
        }
    }
}

fn default_max_entries() -> usize {
    hprobe_core::DEFAULT_MAX_ENTRIES
}

fn default_true() -> bool {
    true
}

/// Payloads used by the demo probes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoSettings {
    #[serde(default = "default_share_title")]
    pub share_title: String,

    #[serde(default = "default_share_text")]
    pub share_text: String,

    #[serde(default = "default_share_url")]
    pub share_url: String,

    #[serde(default = "default_share_dialog_title")]
    pub share_dialog_title: String,

    #[serde(default = "default_browser_url")]
    pub browser_url: String,

    #[serde(default = "default_toast_text")]
    pub toast_text: String,

    /// `short` or `long`
    #[serde(default)]
    pub toast_duration: ToastDuration,

    #[serde(default = "default_notification_title")]
    pub notification_title: String,

    #[serde(default = "default_notification_body")]
    pub notification_body: String,

    /// How far ahead notifications are scheduled
    #[serde(default = "default_notification_delay_ms")]
    pub notification_delay_ms: u64,

    /// How long the splash screen stays up during startup
    #[serde(default = "default_splash_hide_delay_ms")]
    pub splash_hide_delay_ms: u64,

    #[serde(default = "default_camera_quality")]
    pub camera_quality: u8,

    /// `prompt`, `camera` or `photos`
    #[serde(default)]
    pub camera_source: CameraSource,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            share_title: default_share_title(),
            share_text: default_share_text(),
            share_url: default_share_url(),
            share_dialog_title: default_share_dialog_title(),
            browser_url: default_browser_url(),
            toast_text: default_toast_text(),
            toast_duration: ToastDuration::default(),
            notification_title: default_notification_title(),
            notification_body: default_notification_body(),
            notification_delay_ms: default_notification_delay_ms(),
            splash_hide_delay_ms: default_splash_hide_delay_ms(),
            camera_quality: default_camera_quality(),
            camera_source: CameraSource::default(),
        }
    }
}

fn default_share_title() -> String {
    "Share from the app".to_string()
}

fn default_share_text() -> String {
    "Check out this test app!".to_string()
}

fn default_share_url() -> String {
    "https://example.com".to_string()
}

fn default_share_dialog_title() -> String {
    "Share with".to_string()
}

fn default_browser_url() -> String {
    "https://google.com".to_string()
}

fn default_toast_text() -> String {
    "Hello! 🎉".to_string()
}

fn default_notification_title() -> String {
    "Test".to_string()
}

fn default_notification_body() -> String {
    "This is a native notification!".to_string()
}

fn default_notification_delay_ms() -> u64 {
    1000
}

fn default_splash_hide_delay_ms() -> u64 {
    2000
}

fn default_camera_quality() -> u8 {
    90
}

/// Behaviour of the simulated platform provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformSettings {
    /// Platform name reported by the provider (android, ios, web)
    #[serde(default = "default_platform_name")]
    pub name: String,

    /// Capabilities reported as not installed
    #[serde(default)]
    pub unavailable: Vec<Capability>,

    #[serde(default = "default_true")]
    pub connected: bool,

    #[serde(default = "default_connection_type")]
    pub connection_type: String,

    /// Status changes delivered to the network listener during startup
    #[serde(default)]
    pub network_changes: Vec<NetworkStatus>,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_photo_path")]
    pub photo_path: String,

    /// Capability -> provider error message returned instead of success
    #[serde(default)]
    pub failures: HashMap<Capability, String>,

    /// Button index the simulated action sheet "taps"
    #[serde(default)]
    pub action_sheet_index: usize,

    /// Scripted in-app browser events; a load start/stop/exit cycle when unset
    #[serde(default)]
    pub in_app_browser_events: Option<Vec<InAppBrowserEvent>>,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            name: default_platform_name(),
            unavailable: Vec::new(),
            connected: true,
            connection_type: default_connection_type(),
            network_changes: Vec::new(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            photo_path: default_photo_path(),
            failures: HashMap::new(),
            action_sheet_index: 0,
            in_app_browser_events: None,
        }
    }
}

fn default_platform_name() -> String {
    "android".to_string()
}

fn default_connection_type() -> String {
    "wifi".to_string()
}

fn default_latitude() -> f64 {
    55.7558
}

fn default_longitude() -> f64 {
    37.6173
}

fn default_photo_path() -> String {
    "http://localhost/_capacitor_file_/photo.jpeg".to_string()
}

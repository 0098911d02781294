//! Platform capability provider
//!
//! The native plugin bridge of the host runtime is abstracted behind the
//! [`PlatformProvider`] trait. Probes only ever talk to the trait; the
//! [`SimulatedPlatform`] implementation backs the CLI and the tests.
//!
//! Every call either succeeds with a payload or fails with a
//! [`ProviderError`] carrying the provider's own message. Whether a capability
//! is installed at all is asked separately through
//! [`LocalPlatformProvider::is_available`].

mod simulated;

pub use simulated::{ProviderCall, SimulatedPlatform};

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hprobe_core::Error;

/// Native capabilities the shell knows how to probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    SplashScreen,
    Network,
    Camera,
    Geolocation,
    Share,
    LocalNotifications,
    ActionSheet,
    Browser,
    Toast,
    InAppBrowser,
    NativeWebView,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::SplashScreen,
        Capability::Network,
        Capability::Camera,
        Capability::Geolocation,
        Capability::Share,
        Capability::LocalNotifications,
        Capability::ActionSheet,
        Capability::Browser,
        Capability::Toast,
        Capability::InAppBrowser,
        Capability::NativeWebView,
    ];

    /// Plugin name as registered with the host runtime
    pub fn plugin_name(&self) -> &'static str {
        match self {
            Capability::SplashScreen => "SplashScreen",
            Capability::Network => "Network",
            Capability::Camera => "Camera",
            Capability::Geolocation => "Geolocation",
            Capability::Share => "Share",
            Capability::LocalNotifications => "LocalNotifications",
            Capability::ActionSheet => "ActionSheet",
            Capability::Browser => "Browser",
            Capability::Toast => "Toast",
            Capability::InAppBrowser => "InAppBrowser",
            Capability::NativeWebView => "WebView",
        }
    }

    /// Provider message that means the user backed out, if the plugin has one
    pub fn cancellation_message(&self) -> Option<&'static str> {
        match self {
            Capability::Share => Some("Share canceled"),
            Capability::Camera => Some("User cancelled photos app"),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plugin_name())
    }
}

/// A rejected provider call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// True when the message is the capability's cancellation message
    pub fn is_cancellation(&self, capability: Capability) -> bool {
        capability.cancellation_message() == Some(self.message.as_str())
    }

    /// Attach the failing capability, producing an application error
    pub fn into_error(self, capability: Capability) -> Error {
        Error::provider(capability.plugin_name(), self.message)
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

// ─────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplashOptions {
    pub auto_hide: bool,
    pub fade_in_duration_ms: u64,
    pub fade_out_duration_ms: u64,
}

impl Default for SplashOptions {
    fn default() -> Self {
        Self {
            auto_hide: true,
            fade_in_duration_ms: 300,
            fade_out_duration_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkStatus {
    pub connected: bool,
    pub connection_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where the camera plugin takes the picture from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    /// Let the user pick camera or gallery
    #[default]
    Prompt,
    Camera,
    Photos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Photos are always returned by URI, see [`Photo::web_path`]
pub struct PhotoOptions {
    pub quality: u8,
    pub allow_editing: bool,
    pub source: CameraSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub web_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
    pub dialog_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRequest {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub schedule_at: DateTime<Local>,
    pub sound: String,
    /// Required on Android 8+
    pub channel_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Default,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSheetButton {
    pub title: String,
    pub style: ButtonStyle,
}

impl ActionSheetButton {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            style: ButtonStyle::Default,
        }
    }

    pub fn cancel(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            style: ButtonStyle::Cancel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSheetOptions {
    pub title: String,
    pub message: String,
    pub options: Vec<ActionSheetButton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionSheetResult {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    Short,
    #[default]
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastOptions {
    pub text: String,
    pub duration: ToastDuration,
}

/// Options for the Cordova-style in-app browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InAppBrowserOptions {
    pub entries: Vec<(&'static str, String)>,
}

impl Default for InAppBrowserOptions {
    fn default() -> Self {
        let yes_no = |on: bool| String::from(if on { "yes" } else { "no" });
        Self {
            entries: vec![
                ("location", yes_no(true)),
                ("hidden", yes_no(false)),
                ("toolbar", yes_no(true)),
                ("zoom", yes_no(true)),
                ("clearcache", yes_no(false)),
                ("clearsessioncache", yes_no(false)),
                ("closebuttoncaption", "Close".to_string()),
                ("disallowoverscroll", yes_no(false)),
                ("enableViewportScale", yes_no(false)),
                ("presentationstyle", "pagesheet".to_string()),
            ],
        }
    }
}

impl InAppBrowserOptions {
    /// `key=value` pairs joined with commas, as the plugin expects
    pub fn to_option_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Events reported by the in-app browser while it is open
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InAppBrowserEvent {
    LoadStart { url: String },
    LoadStop { url: String },
    LoadError { message: String },
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebViewOptions {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub toolbar_color: String,
    pub show_title: bool,
}

// ─────────────────────────────────────────────────────────────────
// Provider trait
// ─────────────────────────────────────────────────────────────────

/// Native capabilities exposed by the host runtime
///
/// Implement [`PlatformProvider`] (the `Send` variant); the local trait is
/// derived from it.
#[trait_variant::make(PlatformProvider: Send)]
pub trait LocalPlatformProvider {
    /// Platform the host reports (android, ios, web)
    fn platform(&self) -> String;

    /// Whether the plugin backing `capability` is installed
    fn is_available(&self, capability: Capability) -> bool;

    async fn show_splash(&self, options: SplashOptions) -> ProviderResult<()>;

    async fn hide_splash(&self) -> ProviderResult<()>;

    async fn network_status(&self) -> ProviderResult<NetworkStatus>;

    /// Next status change delivered to a network listener, `None` once idle
    async fn next_network_change(&self) -> ProviderResult<Option<NetworkStatus>>;

    async fn current_position(&self) -> ProviderResult<Position>;

    async fn take_photo(&self, options: PhotoOptions) -> ProviderResult<Photo>;

    async fn share(&self, payload: SharePayload) -> ProviderResult<()>;

    async fn schedule_notification(&self, request: NotificationRequest) -> ProviderResult<()>;

    async fn show_action_sheet(
        &self,
        options: ActionSheetOptions,
    ) -> ProviderResult<ActionSheetResult>;

    async fn open_browser(&self, url: String) -> ProviderResult<()>;

    async fn show_toast(&self, options: ToastOptions) -> ProviderResult<()>;

    /// Open the in-app browser and collect the events it reports until exit
    async fn open_in_app_browser(
        &self,
        url: String,
        options: InAppBrowserOptions,
    ) -> ProviderResult<Vec<InAppBrowserEvent>>;

    async fn open_native_webview(&self, options: WebViewOptions) -> ProviderResult<()>;
}

//! Capability probes
//!
//! Each probe checks that its capability is installed, calls the provider and
//! turns the outcome into result entries:
//!
//! - capability missing: one error entry, `"<Plugin> API unavailable"`
//! - success: one or more normal entries describing the result
//! - user cancellation (matched on the provider message): one neutral entry
//! - any other failure: one error entry with the provider message
//!
//! Nothing here returns an error; the result log is the only output.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use rand::Rng;
use url::Url;

use hprobe_core::prelude::*;
use hprobe_core::ResultLog;

use crate::config::DemoSettings;
use crate::platform::{
    Capability, InAppBrowserEvent, InAppBrowserOptions,
    NotificationRequest, PhotoOptions, PlatformProvider, ProviderError, SharePayload,
    SplashOptions, ToastOptions, WebViewOptions,
};

/// Message logged when the user backs out of a dialog or menu
pub const CANCELLED_MESSAGE: &str = "🚫 Action cancelled";

/// Probes runnable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Startup,
    Platform,
    Network,
    Toast,
    Geolocation,
    Browser,
    Camera,
    Share,
    Notification,
    Menu,
    InAppBrowser,
    WebView,
    DeepLinkMenu,
    Clear,
}

impl Probe {
    pub const ALL: [Probe; 14] = [
        Probe::Startup,
        Probe::Platform,
        Probe::Network,
        Probe::Toast,
        Probe::Geolocation,
        Probe::Browser,
        Probe::Camera,
        Probe::Share,
        Probe::Notification,
        Probe::Menu,
        Probe::InAppBrowser,
        Probe::WebView,
        Probe::DeepLinkMenu,
        Probe::Clear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Probe::Startup => "startup",
            Probe::Platform => "platform",
            Probe::Network => "network",
            Probe::Toast => "toast",
            Probe::Geolocation => "geolocation",
            Probe::Browser => "browser",
            Probe::Camera => "camera",
            Probe::Share => "share",
            Probe::Notification => "notification",
            Probe::Menu => "menu",
            Probe::InAppBrowser => "in-app-browser",
            Probe::WebView => "webview",
            Probe::DeepLinkMenu => "deep-link-menu",
            Probe::Clear => "clear",
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Probe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Probe::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::unknown_probe(s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Outcome reporting
// ─────────────────────────────────────────────────────────────────

/// Log the unavailable entry and return false when `capability` is missing
fn ensure_available<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    capability: Capability,
) -> bool {
    if provider.is_available(capability) {
        return true;
    }

    let err = Error::capability_unavailable(capability.plugin_name());
    warn!("{}", err);
    log.error(err.to_string());
    false
}

fn log_failure(log: &mut ResultLog, capability: Capability, err: ProviderError) {
    if err.is_cancellation(capability) {
        info!("{} cancelled by user", capability);
        log.info(CANCELLED_MESSAGE);
        return;
    }

    let message = format!("❌ {} error: {}", capability, err.message);
    warn!("{}", err.into_error(capability));
    log.error(message);
}

/// Parse a configured URL, logging an error entry when it is invalid
fn parse_url(log: &mut ResultLog, raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            let err = Error::invalid_url(raw, e.to_string());
            warn!("{}", err);
            log.error(format!("❌ {}", err));
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Startup
// ─────────────────────────────────────────────────────────────────

/// Splash, platform info and network status, then hide the splash
pub async fn startup<P: PlatformProvider>(provider: &P, log: &mut ResultLog, demo: &DemoSettings) {
    show_splash_screen(provider, log).await;
    display_platform_info(provider, log);
    check_network_status(provider, log).await;
    watch_network_changes(provider, log).await;

    tokio::time::sleep(Duration::from_millis(demo.splash_hide_delay_ms)).await;
    hide_splash_screen(provider, log).await;
}

pub async fn show_splash_screen<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    if !ensure_available(provider, log, Capability::SplashScreen) {
        return;
    }

    match provider.show_splash(SplashOptions::default()).await {
        Ok(()) => log.info("Native splash screen shown"),
        Err(e) => log_failure(log, Capability::SplashScreen, e),
    }
}

/// Hide the splash screen; a missing plugin only matters when showing it
pub async fn hide_splash_screen<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    if !provider.is_available(Capability::SplashScreen) {
        return;
    }

    match provider.hide_splash().await {
        Ok(()) => debug!("Splash screen hidden"),
        Err(e) => log_failure(log, Capability::SplashScreen, e),
    }
}

pub fn display_platform_info<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    log.info(format!("Platform: {}", provider.platform()));
}

// ─────────────────────────────────────────────────────────────────
// Individual capabilities
// ─────────────────────────────────────────────────────────────────

pub async fn check_network_status<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    if !ensure_available(provider, log, Capability::Network) {
        return;
    }

    match provider.network_status().await {
        Ok(status) => {
            let state = if status.connected {
                "✅ Connected"
            } else {
                "❌ Disconnected"
            };
            log.info(format!(
                "Network: {} (type: {})",
                state, status.connection_type
            ));
        }
        Err(e) => log_failure(log, Capability::Network, e),
    }
}

/// Re-check the network status for every change the listener receives
///
/// Silent when the Network plugin is missing; the initial check has already
/// reported that.
pub async fn watch_network_changes<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    if !provider.is_available(Capability::Network) {
        return;
    }

    loop {
        match provider.next_network_change().await {
            Ok(Some(status)) => {
                debug!("Network status changed: {:?}", status);
                check_network_status(provider, log).await;
            }
            Ok(None) => break,
            Err(e) => {
                log_failure(log, Capability::Network, e);
                break;
            }
        }
    }
}

/// Network status followed by a completion entry
pub async fn get_network_status<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    check_network_status(provider, log).await;
    log.info("Network check completed");
}

pub async fn show_toast<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::Toast) {
        return;
    }

    let options = ToastOptions {
        text: demo.toast_text.clone(),
        duration: demo.toast_duration,
    };
    match provider.show_toast(options).await {
        Ok(()) => log.info("Toast shown"),
        Err(e) => log_failure(log, Capability::Toast, e),
    }
}

pub async fn get_geolocation<P: PlatformProvider>(provider: &P, log: &mut ResultLog) {
    if !ensure_available(provider, log, Capability::Geolocation) {
        return;
    }

    match provider.current_position().await {
        Ok(position) => log.info(format!(
            "Geolocation: {}, {}",
            position.latitude, position.longitude
        )),
        Err(e) => log_failure(log, Capability::Geolocation, e),
    }
}

pub async fn open_browser<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::Browser) {
        return;
    }
    let Some(url) = parse_url(log, &demo.browser_url) else {
        return;
    };

    match provider.open_browser(url.to_string()).await {
        Ok(()) => log.info("Browser opened"),
        Err(e) => log_failure(log, Capability::Browser, e),
    }
}

pub async fn take_picture<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::Camera) {
        return;
    }

    let options = PhotoOptions {
        quality: demo.camera_quality.min(100),
        allow_editing: true,
        source: demo.camera_source,
    };
    match provider.take_photo(options).await {
        Ok(photo) => log.info(format!("Photo taken: {}", photo.web_path)),
        Err(e) => log_failure(log, Capability::Camera, e),
    }
}

pub async fn share_content<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::Share) {
        return;
    }
    let Some(url) = parse_url(log, &demo.share_url) else {
        return;
    };

    let payload = SharePayload {
        title: demo.share_title.clone(),
        text: demo.share_text.clone(),
        url: url.to_string(),
        dialog_title: demo.share_dialog_title.clone(),
    };
    match provider.share(payload).await {
        Ok(()) => log.info("Native share completed"),
        Err(e) => log_failure(log, Capability::Share, e),
    }
}

pub async fn show_notification<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::LocalNotifications) {
        return;
    }

    let Some(schedule_at) = schedule_after(demo.notification_delay_ms) else {
        warn!(
            "Notification delay {}ms out of range",
            demo.notification_delay_ms
        );
        log.error(format!(
            "❌ {} error: schedule time out of range",
            Capability::LocalNotifications
        ));
        return;
    };

    let request = NotificationRequest {
        id: rand::thread_rng().gen_range(1..=10_000),
        title: demo.notification_title.clone(),
        body: demo.notification_body.clone(),
        schedule_at,
        sound: "default".to_string(),
        channel_id: "default_channel".to_string(),
    };
    debug!("Scheduling notification #{}", request.id);

    match provider.schedule_notification(request).await {
        Ok(()) => log.info("Native notification scheduled"),
        Err(e) => log_failure(log, Capability::LocalNotifications, e),
    }
}

/// Local time `delay_ms` from now, if representable
fn schedule_after(delay_ms: u64) -> Option<DateTime<Local>> {
    let delay = TimeDelta::try_milliseconds(i64::try_from(delay_ms).ok()?)?;
    Local::now().checked_add_signed(delay)
}

/// Open the in-app browser and log each event it reports
pub async fn open_in_app_browser<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::InAppBrowser) {
        return;
    }
    let Some(url) = parse_url(log, &demo.browser_url) else {
        return;
    };

    let events = match provider
        .open_in_app_browser(url.to_string(), InAppBrowserOptions::default())
        .await
    {
        Ok(events) => events,
        Err(e) => {
            log_failure(log, Capability::InAppBrowser, e);
            return;
        }
    };

    for event in events {
        match event {
            InAppBrowserEvent::LoadStart { url } => log.info(format!("↗️ Loading: {}", url)),
            InAppBrowserEvent::LoadStop { url } => log.info(format!("✅ Loaded: {}", url)),
            InAppBrowserEvent::LoadError { message } => {
                log.error(format!("❌ Load error: {}", message))
            }
            InAppBrowserEvent::Exit => log.info("🔙 WebView closed by user"),
        }
    }
}

pub async fn open_native_webview<P: PlatformProvider>(
    provider: &P,
    log: &mut ResultLog,
    demo: &DemoSettings,
) {
    if !ensure_available(provider, log, Capability::NativeWebView) {
        return;
    }
    let Some(url) = parse_url(log, &demo.browser_url) else {
        return;
    };

    let options = WebViewOptions {
        url: url.to_string(),
        headers: vec![("X-Custom-Header".to_string(), "Value".to_string())],
        toolbar_color: "#667eea".to_string(),
        show_title: true,
    };
    match provider.open_native_webview(options).await {
        Ok(()) => log.info("Opened in native WebView"),
        Err(e) => log_failure(log, Capability::NativeWebView, e),
    }
}

//! In-process stand-in for the native plugin bridge

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::{
    ActionSheetOptions, ActionSheetResult, Capability, InAppBrowserEvent, InAppBrowserOptions,
    NetworkStatus, NotificationRequest, Photo, PhotoOptions, PlatformProvider, Position,
    ProviderError, ProviderResult, SharePayload, SplashOptions, ToastOptions, WebViewOptions,
};
use crate::config::PlatformSettings;

/// One recorded call against the simulated provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    ShowSplash(SplashOptions),
    HideSplash,
    NetworkStatus,
    NextNetworkChange,
    CurrentPosition,
    TakePhoto(PhotoOptions),
    Share(SharePayload),
    ScheduleNotification(NotificationRequest),
    ShowActionSheet(ActionSheetOptions),
    OpenBrowser(String),
    ShowToast(ToastOptions),
    OpenInAppBrowser { url: String, options: String },
    OpenNativeWebView(WebViewOptions),
}

/// Provider whose answers come from [`PlatformSettings`]
///
/// Unavailable capabilities are reported through `is_available`; calling them
/// anyway fails with a "not implemented" provider error, like a missing
/// plugin on a real host. Calls are recorded in order.
#[derive(Debug, Clone)]
pub struct SimulatedPlatform {
    platform: String,
    unavailable: HashSet<Capability>,
    network: Arc<Mutex<NetworkStatus>>,
    network_changes: Arc<Mutex<VecDeque<NetworkStatus>>>,
    position: Position,
    photo_path: String,
    failures: HashMap<Capability, String>,
    action_sheet_index: usize,
    in_app_browser_events: Option<Vec<InAppBrowserEvent>>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::from_settings(&PlatformSettings::default())
    }
}

impl SimulatedPlatform {
    pub fn from_settings(settings: &PlatformSettings) -> Self {
        Self {
            platform: settings.name.clone(),
            unavailable: settings.unavailable.iter().copied().collect(),
            network: Arc::new(Mutex::new(NetworkStatus {
                connected: settings.connected,
                connection_type: settings.connection_type.clone(),
            })),
            network_changes: Arc::new(Mutex::new(
                settings.network_changes.iter().cloned().collect(),
            )),
            position: Position {
                latitude: settings.latitude,
                longitude: settings.longitude,
            },
            photo_path: settings.photo_path.clone(),
            failures: settings.failures.clone(),
            action_sheet_index: settings.action_sheet_index,
            in_app_browser_events: settings.in_app_browser_events.clone(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Report `capability` as not installed
    pub fn without(mut self, capability: Capability) -> Self {
        self.unavailable.insert(capability);
        self
    }

    /// Make calls to `capability` fail with `message`
    pub fn failing(mut self, capability: Capability, message: impl Into<String>) -> Self {
        self.failures.insert(capability, message.into());
        self
    }

    /// Button index the action sheet returns
    pub fn selecting(mut self, index: usize) -> Self {
        self.action_sheet_index = index;
        self
    }

    pub fn with_network(mut self, connected: bool, connection_type: impl Into<String>) -> Self {
        self.network = Arc::new(Mutex::new(NetworkStatus {
            connected,
            connection_type: connection_type.into(),
        }));
        self
    }

    /// Status changes handed out one by one by `next_network_change`
    pub fn with_network_changes(mut self, changes: Vec<NetworkStatus>) -> Self {
        self.network_changes = Arc::new(Mutex::new(changes.into()));
        self
    }

    pub fn with_in_app_browser_events(mut self, events: Vec<InAppBrowserEvent>) -> Self {
        self.in_app_browser_events = Some(events);
        self
    }

    /// Calls made so far, oldest first
    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, capability: Capability, call: ProviderCall) -> ProviderResult<()> {
        debug!("Simulated {} call: {:?}", capability, call);
        self.calls.lock().await.push(call);

        if self.unavailable.contains(&capability) {
            return Err(ProviderError::new(format!(
                "\"{}\" plugin is not implemented on {}",
                capability, self.platform
            )));
        }

        match self.failures.get(&capability) {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl PlatformProvider for SimulatedPlatform {
    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn is_available(&self, capability: Capability) -> bool {
        !self.unavailable.contains(&capability)
    }

    async fn show_splash(&self, options: SplashOptions) -> ProviderResult<()> {
        self.record(Capability::SplashScreen, ProviderCall::ShowSplash(options))
            .await
    }

    async fn hide_splash(&self) -> ProviderResult<()> {
        self.record(Capability::SplashScreen, ProviderCall::HideSplash)
            .await
    }

    async fn network_status(&self) -> ProviderResult<NetworkStatus> {
        self.record(Capability::Network, ProviderCall::NetworkStatus)
            .await?;
        Ok(self.network.lock().await.clone())
    }

    async fn next_network_change(&self) -> ProviderResult<Option<NetworkStatus>> {
        self.record(Capability::Network, ProviderCall::NextNetworkChange)
            .await?;

        let Some(status) = self.network_changes.lock().await.pop_front() else {
            return Ok(None);
        };
        *self.network.lock().await = status.clone();
        Ok(Some(status))
    }

    async fn current_position(&self) -> ProviderResult<Position> {
        self.record(Capability::Geolocation, ProviderCall::CurrentPosition)
            .await?;
        Ok(self.position)
    }

    async fn take_photo(&self, options: PhotoOptions) -> ProviderResult<Photo> {
        self.record(Capability::Camera, ProviderCall::TakePhoto(options))
            .await?;
        Ok(Photo {
            web_path: self.photo_path.clone(),
        })
    }

    async fn share(&self, payload: SharePayload) -> ProviderResult<()> {
        self.record(Capability::Share, ProviderCall::Share(payload))
            .await
    }

    async fn schedule_notification(&self, request: NotificationRequest) -> ProviderResult<()> {
        self.record(
            Capability::LocalNotifications,
            ProviderCall::ScheduleNotification(request),
        )
        .await
    }

    async fn show_action_sheet(
        &self,
        options: ActionSheetOptions,
    ) -> ProviderResult<ActionSheetResult> {
        self.record(Capability::ActionSheet, ProviderCall::ShowActionSheet(options))
            .await?;
        Ok(ActionSheetResult {
            index: self.action_sheet_index,
        })
    }

    async fn open_browser(&self, url: String) -> ProviderResult<()> {
        self.record(Capability::Browser, ProviderCall::OpenBrowser(url))
            .await
    }

    async fn show_toast(&self, options: ToastOptions) -> ProviderResult<()> {
        self.record(Capability::Toast, ProviderCall::ShowToast(options))
            .await
    }

    async fn open_in_app_browser(
        &self,
        url: String,
        options: InAppBrowserOptions,
    ) -> ProviderResult<Vec<InAppBrowserEvent>> {
        self.record(
            Capability::InAppBrowser,
            ProviderCall::OpenInAppBrowser {
                url: url.clone(),
                options: options.to_option_string(),
            },
        )
        .await?;

        Ok(self.in_app_browser_events.clone().unwrap_or_else(|| {
            vec![
                InAppBrowserEvent::LoadStart { url: url.clone() },
                InAppBrowserEvent::LoadStop { url },
                InAppBrowserEvent::Exit,
            ]
        }))
    }

    async fn open_native_webview(&self, options: WebViewOptions) -> ProviderResult<()> {
        self.record(
            Capability::NativeWebView,
            ProviderCall::OpenNativeWebView(options),
        )
        .await
    }
}

//! Application context
//!
//! [`AppContext`] owns everything a probe or a routed deep link needs: the
//! settings, the result log, the router and the platform provider. It is built
//! explicitly and passed around; there is no process-wide instance. Mutating
//! methods take `&mut self`, so appends to the result log are serialized.

use hprobe_core::prelude::*;
use hprobe_core::ResultLog;

use crate::config::Settings;
use crate::deep_link::{DeepLinkRouter, SAMPLE_LINKS};
use crate::menu::{deep_link_menu_options, native_menu_options, DeepLinkChoice, MenuAction};
use crate::platform::{Capability, PlatformProvider, SimulatedPlatform};
use crate::probes::{self, Probe, CANCELLED_MESSAGE};

/// One unit of work driven through an [`AppContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Probe(Probe),
    Route(String),
}

impl Step {
    /// Startup followed by every sample deep link
    pub fn demo() -> Vec<Step> {
        std::iter::once(Step::Probe(Probe::Startup))
            .chain(SAMPLE_LINKS.iter().map(|link| Step::Route(link.to_string())))
            .collect()
    }
}

pub struct AppContext<P> {
    pub settings: Settings,
    pub log: ResultLog,
    pub router: DeepLinkRouter,
    pub provider: P,
}

impl AppContext<SimulatedPlatform> {
    /// Context backed by a provider simulated from `settings.platform`
    pub fn simulated(settings: Settings) -> Self {
        let provider = SimulatedPlatform::from_settings(&settings.platform);
        Self::new(settings, provider)
    }
}

impl<P: PlatformProvider> AppContext<P> {
    pub fn new(settings: Settings, provider: P) -> Self {
        let log = ResultLog::new(settings.results.max_entries);
        let router = DeepLinkRouter::new(settings.deep_link.scheme.clone());
        Self {
            settings,
            log,
            router,
            provider,
        }
    }

    /// Route one deep link into the result log
    pub fn route(&mut self, url: &str) {
        self.router.route(url, &mut self.log);
    }

    /// Empty the result log, leaving a single marker entry
    pub fn clear_results(&mut self) {
        self.log.clear();
        self.log.info("Results cleared");
    }

    /// Run one probe to completion
    pub async fn run(&mut self, probe: Probe) {
        info!("Running probe: {}", probe);

        let provider = &self.provider;
        let log = &mut self.log;
        let demo = &self.settings.demo;

        match probe {
            Probe::Startup => probes::startup(provider, log, demo).await,
            Probe::Platform => probes::display_platform_info(provider, log),
            Probe::Network => probes::get_network_status(provider, log).await,
            Probe::Toast => probes::show_toast(provider, log, demo).await,
            Probe::Geolocation => probes::get_geolocation(provider, log).await,
            Probe::Browser => probes::open_browser(provider, log, demo).await,
            Probe::Camera => probes::take_picture(provider, log, demo).await,
            Probe::Share => probes::share_content(provider, log, demo).await,
            Probe::Notification => probes::show_notification(provider, log, demo).await,
            Probe::InAppBrowser => probes::open_in_app_browser(provider, log, demo).await,
            Probe::WebView => probes::open_native_webview(provider, log, demo).await,
            Probe::Menu => self.show_native_menu().await,
            Probe::DeepLinkMenu => self.show_deep_link_menu().await,
            Probe::Clear => self.clear_results(),
        }
    }

    /// Run one step: a probe or a routed deep link
    pub async fn step(&mut self, step: &Step) {
        match step {
            Step::Probe(probe) => self.run(*probe).await,
            Step::Route(url) => self.route(url),
        }
    }

    /// Show the native action menu and run the selected action
    pub async fn show_native_menu(&mut self) {
        if !self.menu_available() {
            return;
        }

        match self.provider.show_action_sheet(native_menu_options()).await {
            Ok(result) => self.handle_menu_selection(result.index).await,
            Err(e) => {
                warn!("Native menu failed: {}", e);
                self.log.error(format!("❌ Menu error: {}", e));
            }
        }
    }

    pub async fn handle_menu_selection(&mut self, index: usize) {
        let Some(action) = MenuAction::from_index(index) else {
            debug!("Ignoring menu selection {}", index);
            return;
        };

        let provider = &self.provider;
        let log = &mut self.log;
        let demo = &self.settings.demo;

        match action {
            MenuAction::TakePhoto => probes::take_picture(provider, log, demo).await,
            MenuAction::Geolocation => probes::get_geolocation(provider, log).await,
            MenuAction::NetworkStatus => probes::get_network_status(provider, log).await,
            MenuAction::Cancel => log.info(CANCELLED_MESSAGE),
        }
    }

    /// Show the deep-link test menu and route the selected sample link
    pub async fn show_deep_link_menu(&mut self) {
        if !self.menu_available() {
            return;
        }

        match self
            .provider
            .show_action_sheet(deep_link_menu_options())
            .await
        {
            Ok(result) => self.handle_deep_link_selection(result.index),
            Err(e) => {
                warn!("Deep link menu failed: {}", e);
                self.log
                    .error(format!("❌ Deep link menu error: {}", e));
            }
        }
    }

    pub fn handle_deep_link_selection(&mut self, index: usize) {
        match DeepLinkChoice::from_index(index) {
            Some(DeepLinkChoice::Link(link)) => self.route(link),
            Some(DeepLinkChoice::Cancel) => self.log.info(CANCELLED_MESSAGE),
            None => debug!("Ignoring deep link selection {}", index),
        }
    }

    fn menu_available(&mut self) -> bool {
        if self.provider.is_available(Capability::ActionSheet) {
            return true;
        }
        let err = Error::capability_unavailable(Capability::ActionSheet.plugin_name());
        warn!("{}", err);
        self.log.error(err.to_string());
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ProviderCall;

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.demo.splash_hide_delay_ms = 0;
        settings
    }

    fn context(provider: SimulatedPlatform) -> AppContext<SimulatedPlatform> {
        AppContext::new(settings(), provider)
    }

    #[test]
    fn test_route_uses_configured_scheme() {
        let mut settings = settings();
        settings.deep_link.scheme = "shop://".to_string();
        let mut ctx = AppContext::simulated(settings);

        ctx.route("shop://product?id=9");

        assert_eq!(ctx.log.messages(), vec!["📦 Opened Product #9"]);
    }

    #[test]
    fn test_log_capacity_from_settings() {
        let mut settings = settings();
        settings.results.max_entries = 2;
        let mut ctx = AppContext::simulated(settings);

        ctx.route("myapp://settings?theme=dark&lang=ru");

        assert_eq!(ctx.log.len(), 2);
        assert_eq!(ctx.log.messages(), vec!["🎨 Theme: dark", "🌐 Language: ru"]);
    }

    #[test]
    fn test_clear_results() {
        let mut ctx = context(SimulatedPlatform::default());
        ctx.route("myapp://home");
        ctx.clear_results();

        assert_eq!(ctx.log.messages(), vec!["Results cleared"]);
    }

    #[tokio::test]
    async fn test_native_menu_runs_selected_action() {
        let mut ctx = context(SimulatedPlatform::default().selecting(1));

        ctx.run(Probe::Menu).await;

        assert_eq!(ctx.log.messages(), vec!["Geolocation: 55.7558, 37.6173"]);
        let calls = ctx.provider.calls().await;
        assert!(matches!(calls[0], ProviderCall::ShowActionSheet(_)));
        assert_eq!(calls[1], ProviderCall::CurrentPosition);
    }

    #[tokio::test]
    async fn test_native_menu_cancel() {
        let mut ctx = context(SimulatedPlatform::default().selecting(3));

        ctx.run(Probe::Menu).await;

        assert_eq!(ctx.log.messages(), vec![CANCELLED_MESSAGE]);
    }

    #[tokio::test]
    async fn test_native_menu_out_of_range_does_nothing() {
        let mut ctx = context(SimulatedPlatform::default().selecting(42));

        ctx.run(Probe::Menu).await;

        assert!(ctx.log.is_empty());
    }

    #[tokio::test]
    async fn test_menu_unavailable() {
        let mut ctx = context(SimulatedPlatform::default().without(Capability::ActionSheet));

        ctx.run(Probe::DeepLinkMenu).await;

        assert_eq!(ctx.log.messages(), vec!["ActionSheet API unavailable"]);
        assert_eq!(ctx.log.error_count(), 1);
    }

    #[tokio::test]
    async fn test_menu_failure_is_logged() {
        let mut ctx =
            context(SimulatedPlatform::default().failing(Capability::ActionSheet, "dismissed"));

        ctx.run(Probe::Menu).await;

        assert_eq!(ctx.log.messages(), vec!["❌ Menu error: dismissed"]);
    }

    #[tokio::test]
    async fn test_deep_link_menu_routes_selected_link() {
        let mut ctx = context(SimulatedPlatform::default().selecting(2));

        ctx.run(Probe::DeepLinkMenu).await;

        assert_eq!(ctx.log.messages(), vec!["👤 Opened user Profile: 456"]);
    }

    #[tokio::test]
    async fn test_deep_link_menu_cancel() {
        let mut ctx = context(SimulatedPlatform::default().selecting(SAMPLE_LINKS.len()));

        ctx.run(Probe::DeepLinkMenu).await;

        assert_eq!(ctx.log.messages(), vec![CANCELLED_MESSAGE]);
    }

    #[tokio::test]
    async fn test_demo_steps() {
        let mut ctx = context(SimulatedPlatform::default());
        assert_eq!(Step::demo().len(), SAMPLE_LINKS.len() + 1);

        for step in Step::demo() {
            ctx.step(&step).await;
        }

        let messages = ctx.log.messages();
        assert_eq!(messages[0], "Native splash screen shown");
        assert!(messages.contains(&"📦 Opened Product #100"));
        assert!(messages.contains(&"❓ Unknown path: unknown/path"));
        assert_eq!(ctx.log.error_count(), 0);
    }

    #[tokio::test]
    async fn test_run_clear_probe() {
        let mut ctx = context(SimulatedPlatform::default());
        ctx.run(Probe::Platform).await;
        ctx.run(Probe::Clear).await;

        assert_eq!(ctx.log.messages(), vec!["Results cleared"]);
    }
}

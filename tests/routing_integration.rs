//! Integration tests driving Hybrid Probe through its public API
//!
//! Run with: cargo test --test routing_integration

use hprobe_app::config::{init_config_dir, load_settings};
use hprobe_app::{AppContext, Capability, Probe, SimulatedPlatform, Step, SAMPLE_LINKS};
use hybrid_probe::output::{OutputMode, ResultSink};
use hybrid_probe::runner::execute;
use hybrid_probe::Command;
use tempfile::tempdir;

// ─────────────────────────────────────────────────────────
// Test Data Helpers
// ─────────────────────────────────────────────────────────

fn quiet_context() -> AppContext<SimulatedPlatform> {
    let mut settings = hprobe_app::Settings::default();
    settings.demo.splash_hide_delay_ms = 0;
    AppContext::simulated(settings)
}

fn text_sink() -> ResultSink {
    ResultSink::new(OutputMode::Text {
        show_timestamps: false,
    })
}

fn write_config(dir: &std::path::Path, content: &str) {
    let hprobe_dir = dir.join(".hprobe");
    std::fs::create_dir_all(&hprobe_dir).unwrap();
    std::fs::write(hprobe_dir.join("config.toml"), content).unwrap();
}

// ─────────────────────────────────────────────────────────
// Deep links
// ─────────────────────────────────────────────────────────

#[test]
fn test_route_command_routes_in_order() {
    let mut ctx = quiet_context();
    let mut sink = text_sink();

    tokio_test::block_on(execute(
        &mut ctx,
        &mut sink,
        Command::Route(vec![
            "myapp://home?section=news".to_string(),
            "myapp://product".to_string(),
            "myapp://profile?id=456".to_string(),
        ]),
    ));

    assert_eq!(
        ctx.log.messages(),
        vec![
            "🏠 Opened Home page",
            "📂 Section: news",
            "❌ Product ID not specified",
            "👤 Opened user Profile: 456",
        ]
    );
    assert_eq!(ctx.log.error_count(), 1);
}

#[test]
fn test_unknown_route_lists_parameters() {
    let mut ctx = quiet_context();

    ctx.route("myapp://unknown/path?param=test");

    let messages = ctx.log.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].ends_with("unknown/path"));
    assert!(messages[1].contains(r#""param":"test""#));
}

#[test]
fn test_scheme_from_config_file() {
    let temp = tempdir().unwrap();
    write_config(temp.path(), "[deep_link]\nscheme = \"shop://\"\n");

    let mut ctx = AppContext::simulated(load_settings(temp.path()));
    ctx.route("shop://home");
    ctx.route("myapp://home");

    let messages = ctx.log.messages();
    assert_eq!(messages[0], "🏠 Opened Home page");
    assert_eq!(messages[1], "❓ Unknown path: myapp://home");
}

// ─────────────────────────────────────────────────────────
// Probes
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_command_with_missing_plugins() {
    let temp = tempdir().unwrap();
    write_config(
        temp.path(),
        r#"
[demo]
splash_hide_delay_ms = 0

[platform]
name = "web"
unavailable = ["camera", "share"]

[platform.failures]
geolocation = "Location services disabled"
"#,
    );

    let mut ctx = AppContext::simulated(load_settings(temp.path()));
    let mut sink = text_sink();

    execute(
        &mut ctx,
        &mut sink,
        Command::Probe(vec![
            Probe::Platform,
            Probe::Camera,
            Probe::Share,
            Probe::Geolocation,
            Probe::Toast,
        ]),
    )
    .await;

    assert_eq!(
        ctx.log.messages(),
        vec![
            "Platform: web",
            "Camera API unavailable",
            "Share API unavailable",
            "❌ Geolocation error: Location services disabled",
            "Toast shown",
        ]
    );
    assert_eq!(ctx.log.error_count(), 3);
}

#[test]
fn test_command_steps() {
    assert_eq!(Command::Demo.steps(), Step::demo());
    assert!(Command::Init.steps().is_empty());
    assert_eq!(
        Command::Probe(vec![Probe::Toast, Probe::Clear]).steps(),
        vec![Step::Probe(Probe::Toast), Step::Probe(Probe::Clear)]
    );
    assert_eq!(
        Command::Route(vec!["myapp://home".to_string()]).steps(),
        vec![Step::Route("myapp://home".to_string())]
    );
}

#[tokio::test]
async fn test_demo_command_routes_every_sample() {
    let mut ctx = quiet_context();
    let mut sink = text_sink();

    execute(&mut ctx, &mut sink, Command::Demo).await;

    let calls = ctx.provider.calls().await;
    assert!(!calls.is_empty());
    assert_eq!(ctx.log.error_count(), 0);
    assert!(ctx.log.len() > SAMPLE_LINKS.len());
}

#[tokio::test]
async fn test_startup_reports_missing_network_plugin() {
    let mut settings = hprobe_app::Settings::default();
    settings.demo.splash_hide_delay_ms = 0;
    let provider = SimulatedPlatform::from_settings(&settings.platform).without(Capability::Network);
    let mut ctx = AppContext::new(settings, provider);

    ctx.run(Probe::Startup).await;

    assert!(ctx
        .log
        .messages()
        .contains(&"Network API unavailable"));
}

// ─────────────────────────────────────────────────────────
// Init
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_init_command_writes_loadable_config() {
    let temp = tempdir().unwrap();

    hybrid_probe::run(temp.path(), Command::Init, false)
        .await
        .unwrap();

    assert!(temp.path().join(".hprobe/config.toml").exists());
    let settings = load_settings(temp.path());
    assert_eq!(settings.deep_link.scheme, "myapp://");

    // Running init again keeps the file
    let path = init_config_dir(temp.path()).unwrap();
    assert!(path.exists());
}

//! hprobe-app - Deep-link routing and platform probes for Hybrid Probe
//!
//! This crate holds the deep-link router, the platform provider abstraction
//! with its simulated implementation, the capability probes and menus, the
//! configuration loader, and the [`AppContext`] tying them together.

pub mod config;
pub mod context;
pub mod deep_link;
pub mod menu;
pub mod platform;
pub mod probes;

// Re-export primary types
pub use config::Settings;
pub use context::{AppContext, Step};
pub use deep_link::{DeepLinkRouter, QueryParams, Route, RouteRequest, SAMPLE_LINKS};
pub use platform::{Capability, PlatformProvider, ProviderError, SimulatedPlatform};
pub use probes::Probe;

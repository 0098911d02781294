//! Headless mode - JSON event output for scripting
//!
//! Instead of human-readable lines, headless mode writes structured JSON
//! events to stdout so test scripts can assert on results without scraping
//! text.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"deep_link_received","url":"myapp://product","timestamp":1704700001000}
//! {"event":"result","message":"❌ Product ID not specified","error":true,"timestamp":1704700001001}
//! ```

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use hprobe_core::ResultEntry;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// A deep link is about to be routed
    DeepLinkReceived { url: String, timestamp: i64 },

    /// A probe is about to run
    ProbeStarted { probe: String, timestamp: i64 },

    /// One entry appended to the result log
    Result {
        message: String,
        error: bool,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let Some(json) = self.to_json() else {
            return;
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                None
            }
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn deep_link_received(url: &str) -> Self {
        Self::DeepLinkReceived {
            url: url.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn probe_started(probe: &str) -> Self {
        Self::ProbeStarted {
            probe: probe.to_string(),
            timestamp: Self::now(),
        }
    }

    /// Result event carrying the entry's own timestamp
    pub fn result(entry: &ResultEntry) -> Self {
        Self::Result {
            message: entry.message.clone(),
            error: entry.is_error,
            timestamp: entry.timestamp.timestamp_millis(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

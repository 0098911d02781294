//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Platform Provider Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{capability} API unavailable")]
    CapabilityUnavailable { capability: String },

    #[error("{capability} call failed: {message}")]
    Provider { capability: String, message: String },

    #[error("Unknown probe: {name}")]
    UnknownProbe { name: String },

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn capability_unavailable(capability: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability: capability.into(),
        }
    }

    pub fn provider(capability: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            capability: capability.into(),
            message: message.into(),
        }
    }

    pub fn unknown_probe(name: impl Into<String>) -> Self {
        Self::UnknownProbe { name: name.into() }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are reported in the result log and the shell keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CapabilityUnavailable { .. }
                | Error::Provider { .. }
                | Error::InvalidUrl { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Terminal { .. } | Error::Logging { .. } | Error::UnknownProbe { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::capability_unavailable("Camera");
        assert_eq!(err.to_string(), "Camera API unavailable");

        let err = Error::provider("Share", "Share canceled");
        assert_eq!(err.to_string(), "Share call failed: Share canceled");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not valid {{").unwrap_err();
        let err: Error = toml_err.into();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::terminal("no tty").is_fatal());
        assert!(Error::unknown_probe("teleport").is_fatal());
        assert!(Error::logging("subscriber already set").is_fatal());
        assert!(!Error::provider("Camera", "busy").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::capability_unavailable("Toast").is_recoverable());
        assert!(Error::provider("Geolocation", "timeout").is_recoverable());
        assert!(Error::invalid_url("::", "relative URL without a base").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
    }

    #[test]
    fn test_invalid_url_mentions_input() {
        let err = Error::invalid_url("not a url", "relative URL without a base");
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_result_ext_context_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("writing config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

//! # hprobe-core - Core Domain Types
//!
//! Foundation crate for Hybrid Probe. Provides error handling, diagnostic
//! logging setup and the user-visible result log.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Result Log (`types`)
//! - [`ResultLog`] - Ordered, append-only log of timestamped entries
//! - [`ResultEntry`] - One entry, flagged normal or error-highlighted
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use hprobe_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all Hybrid Probe crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use types::{ResultEntry, ResultLog, DEFAULT_MAX_ENTRIES};

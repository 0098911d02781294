//! Deep-link routing
//!
//! Turns a `myapp://path?key=value` string into a [`Route`] and logs what the
//! route "opened" into the [`ResultLog`]. Routing is total: every input string
//! produces at least one result entry and nothing is ever propagated as an
//! error.
//!
//! Parsing steps:
//! 1. strip the scheme prefix (no-op when absent)
//! 2. split on the first `?` into path and query
//! 3. split the query on `&`, each pair on the first `=`, percent-decode
//! 4. dispatch on the exact, case-sensitive path

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use tracing::{debug, info};

use hprobe_core::ResultLog;

use crate::config::DEFAULT_SCHEME;

/// Profile id shown when the link does not name a user
pub const CURRENT_USER: &str = "current";

/// Sample links offered by the deep-link test menu
pub const SAMPLE_LINKS: &[&str] = &[
    "myapp://home",
    "myapp://product?id=100&name=iPhone15",
    "myapp://profile?id=456&username=user",
    "myapp://settings?theme=dark&lang=ru",
    "myapp://unknown/path?param=test",
];

/// Decoded query parameters of a deep link
///
/// Keys are unique; a repeated key keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Parse a raw query string (the part after `?`)
    pub fn parse(query: &str) -> Self {
        let mut params = BTreeMap::new();

        if query.is_empty() {
            return Self(params);
        }

        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(pair), String::new()),
            };
            params.insert(key, value);
        }

        Self(params)
    }

    /// Value of `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` when present and non-empty
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Value of `key`, or `default` when absent or empty
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_non_empty(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the mapping as a JSON object, keys sorted
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Percent-decode one key or value.
///
/// Invalid escapes such as `%zz` are kept literally. If the decoded bytes are
/// not valid UTF-8 the raw substring is returned unchanged.
fn decode_component(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!("Keeping raw query component {:?}: {}", raw, e);
            raw.to_string()
        }
    }
}

/// A single parsed deep link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub path: String,
    pub params: QueryParams,
}

impl RouteRequest {
    /// Parse `url`, stripping `scheme` when it is a prefix
    pub fn parse(url: &str, scheme: &str) -> Self {
        let rest = url.strip_prefix(scheme).unwrap_or(url);

        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        Self {
            path: path.to_string(),
            params: QueryParams::parse(query),
        }
    }
}

/// Known deep-link destinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home {
        section: Option<String>,
    },
    /// `id` is required; `None` is logged as an error
    Product {
        id: Option<String>,
        name: Option<String>,
    },
    /// `id` falls back to the current user
    Profile {
        id: String,
        tab: Option<String>,
    },
    Settings {
        theme: Option<String>,
        lang: Option<String>,
    },
    Unknown {
        path: String,
        params: QueryParams,
    },
}

impl From<RouteRequest> for Route {
    fn from(request: RouteRequest) -> Self {
        let RouteRequest { path, params } = request;

        // Empty values count as absent
        let param = |key: &str| params.get_non_empty(key).map(str::to_string);

        let known = match path.as_str() {
            "home" => Some(Route::Home {
                section: param("section"),
            }),
            "product" => Some(Route::Product {
                id: param("id"),
                name: param("name"),
            }),
            "profile" => Some(Route::Profile {
                id: params.get_or("id", CURRENT_USER).to_string(),
                tab: param("tab"),
            }),
            "settings" => Some(Route::Settings {
                theme: param("theme"),
                lang: param("lang"),
            }),
            _ => None,
        };

        known.unwrap_or(Route::Unknown { path, params })
    }
}

impl Route {
    /// Short route name for diagnostics
    pub fn name(&self) -> &str {
        match self {
            Route::Home { .. } => "home",
            Route::Product { .. } => "product",
            Route::Profile { .. } => "profile",
            Route::Settings { .. } => "settings",
            Route::Unknown { .. } => "unknown",
        }
    }

    /// Log what this route opened
    pub fn handle(&self, log: &mut ResultLog) {
        match self {
            Route::Home { section } => {
                log.info("🏠 Opened Home page");
                if let Some(section) = section {
                    log.info(format!("📂 Section: {}", section));
                }
            }
            Route::Product { id, name } => match id {
                Some(id) => {
                    log.info(format!("📦 Opened Product #{}", id));
                    if let Some(name) = name {
                        log.info(format!("📛 Name: {}", name));
                    }
                }
                None => log.error("❌ Product ID not specified"),
            },
            Route::Profile { id, tab } => {
                log.info(format!("👤 Opened user Profile: {}", id));
                if let Some(tab) = tab {
                    log.info(format!("📑 Tab: {}", tab));
                }
            }
            Route::Settings { theme, lang } => {
                log.info("⚙️ Opened Settings");
                if let Some(theme) = theme {
                    log.info(format!("🎨 Theme: {}", theme));
                }
                if let Some(lang) = lang {
                    log.info(format!("🌐 Language: {}", lang));
                }
            }
            Route::Unknown { path, params } => {
                log.info(format!("❓ Unknown path: {}", path));
                log.info(format!("🔍 Parameters: {}", params.to_json()));
            }
        }
    }
}

/// Dispatches deep links for one URL scheme
#[derive(Debug, Clone)]
pub struct DeepLinkRouter {
    scheme: String,
}

impl Default for DeepLinkRouter {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME)
    }
}

impl DeepLinkRouter {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Parse `url` into a route without logging anything
    pub fn resolve(&self, url: &str) -> Route {
        Route::from(RouteRequest::parse(url, &self.scheme))
    }

    /// Parse `url`, dispatch it and log the outcome
    pub fn route(&self, url: &str, log: &mut ResultLog) {
        info!("Received deep link: {}", url);

        let route = self.resolve(url);
        debug!("Deep link {:?} resolved to {:?}", url, route);

        route.handle(log);
    }
}

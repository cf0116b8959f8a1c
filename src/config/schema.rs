//! Configuration schema definitions.
//!
//! Declarative faux-server setup: dispatch switches plus canned routes.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::{Handler, Pattern, PatternError, ANY_METHOD};
use crate::sync::request::SyncMethod;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FauxConfig {
    /// Faux dispatch on/off.
    pub enabled: bool,

    /// Sync method for entities without an override.
    pub default_sync: SyncMethod,

    /// When set, installs a default handler replying with this value.
    pub default_response: Option<Value>,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Canned routes, registered in file order.
    pub routes: Vec<RouteConfig>,
}

impl Default for FauxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_sync: SyncMethod::FauxServer,
            default_response: None,
            observability: ObservabilityConfig::default(),
            routes: Vec::new(),
        }
    }
}

/// A route whose handler replies with a fixed value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route name (unique).
    pub name: String,

    /// URL template. Exclusive with `regex`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Raw regular expression. Exclusive with `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    /// Verb filter (default: any).
    #[serde(default = "default_method")]
    pub method: String,

    /// Handler reply. A string is an error message; absent succeeds with no payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

fn default_method() -> String {
    ANY_METHOD.to_string()
}

impl RouteConfig {
    /// Compile this route's pattern. A template wins if both are present.
    pub fn pattern(&self) -> Result<Pattern, PatternError> {
        match (&self.url, &self.regex) {
            (Some(url), _) => Ok(Pattern::template(url)),
            (None, Some(expr)) => Pattern::try_regex(expr),
            (None, None) => Ok(Pattern::template("")),
        }
    }

    pub fn handler(&self) -> Handler {
        Handler::fixed(self.response.clone().unwrap_or(Value::Null))
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

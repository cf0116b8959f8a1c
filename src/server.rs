//! The faux server: route registry plus process-wide configuration.
//!
//! # Responsibilities
//! - Own the route registry and the dispatch configuration
//! - Hold the native transport and completion scheduler collaborators
//! - Provide a lazily created process-wide default instance
//!
//! # Design Decisions
//! - Constructible, so tests get isolated instances
//! - Configuration is an immutable snapshot swapped atomically on change
//! - No implicit reset: state lives until explicitly changed

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

use crate::config::{validate_config, ConfigError, FauxConfig};
use crate::routing::{Handler, MatchedRoute, Pattern, Route, RouteRegistry, RouteSpec};
use crate::sync::entity::{Completion, Immediate, NativeSync};
use crate::sync::request::SyncMethod;

/// Dispatch configuration.
#[derive(Clone)]
pub struct ProcessConfig {
    /// When false every attempt goes to the native transport.
    pub enabled: bool,
    /// Serves attempts no route matches.
    pub default_handler: Option<Handler>,
    /// Used when an entity has no override.
    pub default_sync: SyncMethod,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_handler: None,
            default_sync: SyncMethod::FauxServer,
        }
    }
}

impl fmt::Debug for ProcessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessConfig")
            .field("enabled", &self.enabled)
            .field("default_handler", &self.default_handler.is_some())
            .field("default_sync", &self.default_sync)
            .finish()
    }
}

/// External collaborators used during dispatch.
#[derive(Clone)]
pub(crate) struct Collaborators {
    /// `None` until a host installs its transport.
    pub(crate) native: Option<Arc<dyn NativeSync>>,
    pub(crate) completion: Arc<dyn Completion>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            native: None,
            completion: Arc::new(Immediate),
        }
    }
}

/// A simulated REST backend.
pub struct FauxServer {
    pub(crate) registry: RouteRegistry,
    pub(crate) config: ArcSwap<ProcessConfig>,
    pub(crate) collaborators: ArcSwap<Collaborators>,
}

static GLOBAL: Lazy<FauxServer> = Lazy::new(FauxServer::new);

/// The process-wide default instance.
pub fn global() -> &'static FauxServer {
    &GLOBAL
}

impl Default for FauxServer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FauxServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FauxServer")
            .field("routes", &self.registry.len())
            .field("config", &*self.config.load())
            .finish()
    }
}

impl FauxServer {
    pub fn new() -> Self {
        Self {
            registry: RouteRegistry::new(),
            config: ArcSwap::from_pointee(ProcessConfig::default()),
            collaborators: ArcSwap::from_pointee(Collaborators::default()),
        }
    }

    /// Use `native` as the fallback transport.
    pub fn with_native(self, native: impl NativeSync + 'static) -> Self {
        self.set_native(native);
        self
    }

    /// Use `completion` to deliver callbacks.
    pub fn with_completion(self, completion: impl Completion + 'static) -> Self {
        self.set_completion(completion);
        self
    }

    pub fn set_native(&self, native: impl NativeSync + 'static) {
        let native: Arc<dyn NativeSync> = Arc::new(native);
        self.collaborators.rcu(|current| Collaborators {
            native: Some(native.clone()),
            completion: current.completion.clone(),
        });
    }

    pub fn set_completion(&self, completion: impl Completion + 'static) {
        let completion: Arc<dyn Completion> = Arc::new(completion);
        self.collaborators.rcu(|current| Collaborators {
            native: current.native.clone(),
            completion: completion.clone(),
        });
    }

    // --- Routes ---

    pub fn routes(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn add_route(
        &self,
        name: impl Into<String>,
        url_exp: impl Into<Pattern>,
        http_method: impl Into<String>,
        handler: Handler,
    ) {
        self.registry.add_route(name, url_exp, http_method, handler);
    }

    pub fn add_routes<I, N>(&self, routes: I)
    where
        I: IntoIterator<Item = (N, RouteSpec)>,
        N: Into<String>,
    {
        self.registry.add_routes(routes);
    }

    pub fn remove_route(&self, name: &str) {
        self.registry.remove_route(name);
    }

    pub fn remove_routes(&self) {
        self.registry.remove_routes();
    }

    pub fn get_route(&self, name: &str) -> Option<Route> {
        self.registry.get_route(name)
    }

    pub fn get_matching_route(&self, url: &str, http_method: Option<&str>) -> Option<MatchedRoute> {
        self.registry.get_matching_route(url, http_method)
    }

    // --- Configuration ---

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Arc<ProcessConfig> {
        self.config.load_full()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.load().enabled
    }

    /// Turn faux dispatch on or off.
    pub fn enable(&self, enabled: bool) {
        self.update_config(|c| c.enabled = enabled);
        tracing::info!(enabled, "Faux server toggled");
    }

    /// Set or clear the handler used when no route matches.
    pub fn set_default_handler(&self, handler: Option<Handler>) {
        tracing::debug!(installed = handler.is_some(), "Default handler updated");
        self.update_config(|c| c.default_handler = handler.clone());
    }

    /// Set the default sync method; `None` restores `faux-server`.
    pub fn set_default_sync(&self, method: Option<SyncMethod>) {
        let method = method.unwrap_or_default();
        tracing::debug!(method = %method, "Default sync method updated");
        self.update_config(|c| c.default_sync = method);
    }

    /// Build a server from declarative configuration.
    pub fn from_config(config: &FauxConfig) -> Result<Self, ConfigError> {
        let server = Self::new();
        server.apply_config(config)?;
        Ok(server)
    }

    /// Apply switches and register canned routes, in file order.
    ///
    /// Existing routes with other names are kept.
    pub fn apply_config(&self, config: &FauxConfig) -> Result<(), ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        for route in &config.routes {
            self.registry.add_route(
                route.name.clone(),
                route.pattern()?,
                route.method.clone(),
                route.handler(),
            );
        }
        self.update_config(|c| {
            c.enabled = config.enabled;
            c.default_sync = config.default_sync;
            c.default_handler = config.default_response.clone().map(Handler::fixed);
        });
        tracing::info!(
            routes = config.routes.len(),
            enabled = config.enabled,
            default_sync = %config.default_sync,
            "Configuration applied"
        );
        Ok(())
    }

    fn update_config(&self, mut f: impl FnMut(&mut ProcessConfig)) {
        self.config.rcu(|current| {
            let mut next = ProcessConfig::clone(current);
            f(&mut next);
            next
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let server = FauxServer::new();
        let config = server.config();
        assert!(config.enabled);
        assert!(config.default_handler.is_none());
        assert_eq!(config.default_sync, SyncMethod::FauxServer);
    }

    #[test]
    fn test_config_setters() {
        let server = FauxServer::new();
        server.enable(false);
        assert!(!server.is_enabled());
        server.enable(true);
        assert!(server.is_enabled());

        server.set_default_sync(Some(SyncMethod::Native));
        assert_eq!(server.config().default_sync, SyncMethod::Native);
        server.set_default_sync(None);
        assert_eq!(server.config().default_sync, SyncMethod::FauxServer);

        server.set_default_handler(Some(Handler::noop()));
        assert!(server.config().default_handler.is_some());
        server.set_default_handler(None);
        assert!(server.config().default_handler.is_none());
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let server = FauxServer::new();
        let before = server.config();
        server.enable(false);
        assert!(before.enabled);
        assert!(!server.config().enabled);
    }

    #[test]
    fn test_from_config() {
        let config = crate::config::parse_config(
            r#"
            default_sync = "native"
            default_response = "no such resource"

            [[routes]]
            name = "readBooks"
            url = "library-app/books"
            method = "GET"
            response = [{ id = "one" }, { id = "two" }]
            "#,
        )
        .unwrap();
        let server = FauxServer::from_config(&config).unwrap();

        assert_eq!(server.config().default_sync, SyncMethod::Native);
        assert!(server.config().default_handler.is_some());
        let route = server.get_route("readBooks").unwrap();
        assert_eq!(route.http_method, "GET");
        assert!(server.get_matching_route("library-app/books", Some("GET")).is_some());
    }

    #[test]
    fn test_apply_invalid_config_changes_nothing() {
        let server = FauxServer::new();
        let mut config = FauxConfig::default();
        config.enabled = false;
        config.routes.push(crate::config::RouteConfig {
            name: "bad".into(),
            url: None,
            regex: Some("(".into()),
            method: "*".into(),
            response: None,
        });

        assert!(matches!(server.apply_config(&config), Err(ConfigError::Validation(_))));
        assert!(server.is_enabled());
        assert!(server.routes().is_empty());
    }

    #[test]
    fn test_global_instance_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}

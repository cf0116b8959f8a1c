//! Named route storage.
//!
//! # Responsibilities
//! - Store compiled routes keyed by name
//! - Overwrite on re-registration, advancing the route's sequence
//! - Remove single routes or clear everything
//!
//! # Design Decisions
//! - Storage order is irrelevant; `sequence` carries recency for matching
//! - Lookups hand out clones so handlers may mutate the registry while running
//! - Sequences are drawn under the entry lock, so the route stored last for a
//!   name always carries the newest sequence
//! - An empty verb filter is stored as `*`

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::pattern::Pattern;
use crate::sync::request::SyncContext;

/// Verb filter that accepts every method.
pub const ANY_METHOD: &str = "*";

type HandlerFn = dyn Fn(&SyncContext, &[String]) -> Value + Send + Sync;

/// A route handler.
///
/// Receives the request context and the parameters extracted from the URL.
/// The returned value is interpreted by [`Outcome::from_reply`]:
/// `Null` succeeds without a payload, an object succeeds with attributes,
/// an array succeeds with a member list.
///
/// Any string return value is an error message, even if it was meant as a
/// successful payload.
///
/// [`Outcome::from_reply`]: crate::sync::response::Outcome::from_reply
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&SyncContext, &[String]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A handler that always returns a clone of `reply`.
    pub fn fixed(reply: Value) -> Self {
        Self::new(move |_, _| reply.clone())
    }

    /// A handler that succeeds without touching anything.
    pub fn noop() -> Self {
        Self::fixed(Value::Null)
    }

    pub fn call(&self, ctx: &SyncContext, params: &[String]) -> Value {
        (self.0)(ctx, params)
    }

    /// True if both handles point at the same handler.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// A named binding of a URL pattern and verb filter to a handler.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub pattern: Arc<Pattern>,
    /// Exact verb, or `*` for any.
    pub http_method: String,
    pub handler: Handler,
    /// Registration order of the latest (re-)registration.
    pub sequence: u64,
}

impl Route {
    /// True if the route accepts every verb.
    pub fn is_any_method(&self) -> bool {
        self.http_method == ANY_METHOD
    }
}

/// Bulk registration entry.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub url_exp: Pattern,
    pub http_method: String,
    pub handler: Handler,
}

impl RouteSpec {
    pub fn new(
        url_exp: impl Into<Pattern>,
        http_method: impl Into<String>,
        handler: Handler,
    ) -> Self {
        Self {
            url_exp: url_exp.into(),
            http_method: http_method.into(),
            handler,
        }
    }
}

/// Store of named routes.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: DashMap<String, Route>,
    next_sequence: AtomicU64,
}

fn normalize_method(method: String) -> String {
    if method.is_empty() {
        ANY_METHOD.to_string()
    } else {
        method
    }
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the route called `name`.
    pub fn add_route(
        &self,
        name: impl Into<String>,
        url_exp: impl Into<Pattern>,
        http_method: impl Into<String>,
        handler: Handler,
    ) {
        let name = name.into();
        let pattern = Arc::new(url_exp.into());
        let http_method = normalize_method(http_method.into());

        let entry = self.routes.entry(name.clone());
        let replaced = matches!(entry, Entry::Occupied(_));
        let route = entry.insert(Route {
            name,
            pattern,
            http_method,
            handler,
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
        });
        tracing::debug!(
            route = %route.name,
            method = %route.http_method,
            pattern = ?route.pattern,
            sequence = route.sequence,
            replaced,
            "Route registered"
        );
        drop(route);

        if !replaced {
            metrics::record_route_added();
        }
    }

    /// Register every entry in iteration order.
    pub fn add_routes<I, N>(&self, routes: I)
    where
        I: IntoIterator<Item = (N, RouteSpec)>,
        N: Into<String>,
    {
        for (name, spec) in routes {
            self.add_route(name, spec.url_exp, spec.http_method, spec.handler);
        }
    }

    pub fn remove_route(&self, name: &str) {
        if self.routes.remove(name).is_some() {
            tracing::debug!(route = %name, "Route removed");
            metrics::record_routes_removed(1);
        }
    }

    pub fn remove_routes(&self) {
        let mut removed = 0;
        self.routes.retain(|_, _| {
            removed += 1;
            false
        });
        tracing::debug!(removed, "All routes removed");
        metrics::record_routes_removed(removed);
    }

    pub fn get_route(&self, name: &str) -> Option<Route> {
        self.routes.get(name).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Snapshot of every route, in no particular order.
    pub fn routes(&self) -> Vec<Route> {
        self.routes.iter().map(|r| r.value().clone()).collect()
    }
}

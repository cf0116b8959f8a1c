//! Verb-aware route lookup.
//!
//! # Responsibilities
//! - Find every route whose pattern matches a URL
//! - Filter by verb compatibility
//! - Rank the survivors and return the winner with its parameters
//!
//! # Design Decisions
//! - An exact verb match always outranks an any-verb route
//! - Within the same rank, the most recently (re-)registered route wins
//! - Explicit `None` on no match; fallback policy belongs to the caller

use crate::routing::registry::{Route, RouteRegistry};

/// A resolved route plus the parameters extracted from the URL.
#[derive(Debug, Clone)]
pub struct MatchedRoute {
    pub route: Route,
    pub handler_params: Vec<String>,
}

/// Returns true if `route` may serve a request with `http_method`.
fn accepts(route: &Route, http_method: Option<&str>) -> bool {
    match http_method {
        None => true,
        Some(method) => route.is_any_method() || route.http_method == method,
    }
}

/// Rank key: exact verb match first, then recency.
fn rank(route: &Route, http_method: Option<&str>) -> (bool, u64) {
    let exact = http_method.is_some_and(|m| route.http_method == m);
    (exact, route.sequence)
}

impl RouteRegistry {
    /// Highest-precedence route matching `url` and, when given, `http_method`.
    pub fn get_matching_route(&self, url: &str, http_method: Option<&str>) -> Option<MatchedRoute> {
        let best = self
            .routes()
            .into_iter()
            .filter(|route| accepts(route, http_method))
            .filter_map(|route| {
                let params = route.pattern.captures(url)?;
                Some((rank(&route, http_method), route, params))
            })
            .max_by_key(|(key, _, _)| *key)?;

        let (_, route, handler_params) = best;
        tracing::trace!(
            route = %route.name,
            url = %url,
            method = ?http_method,
            "Route matched"
        );
        Some(MatchedRoute {
            route,
            handler_params,
        })
    }
}

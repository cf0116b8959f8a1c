//! Dispatch metrics.
//!
//! # Metrics
//! - `faux_sync_dispatch_total` (counter): attempts by `dispatch` (faux, default, native)
//! - `faux_sync_errors_total` (counter): handler-signalled errors by `route`
//! - `faux_routes_added_total` (counter): route names newly registered
//! - `faux_routes_removed_total` (counter): route names removed
//!
//! Route counters are summed over every registry in the process; added minus
//! removed is the number of live routes.

/// Count a dispatch decision.
pub fn record_dispatch(dispatch: &'static str) {
    ::metrics::counter!("faux_sync_dispatch_total", "dispatch" => dispatch).increment(1);
}

/// Count a handler that returned an error message.
pub fn record_handler_error(route: &str) {
    ::metrics::counter!("faux_sync_errors_total", "route" => route.to_string()).increment(1);
}

pub fn record_route_added() {
    ::metrics::counter!("faux_routes_added_total").increment(1);
}

pub fn record_routes_removed(count: usize) {
    if count > 0 {
        ::metrics::counter!("faux_routes_removed_total").increment(count as u64);
    }
}

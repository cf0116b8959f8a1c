//! Sync interception and dispatch.
//!
//! # Responsibilities
//! - Build the request descriptor for a persistence attempt
//! - Compute the effective verb (with POST emulation)
//! - Pick faux or native servicing
//! - Invoke the matched route, the default handler, or the native transport
//! - Translate the reply and complete the caller's callbacks
//!
//! # Design Decisions
//! - Never fails for a routing miss; misses fall back to native
//! - Config and collaborators are snapshotted once per attempt, so handlers
//!   may reconfigure the server while running
//! - The native transport receives the attempt unmodified and owns its callbacks
//! - Without a native transport, misses fail through the configured completion

use crate::observability::metrics;
use crate::server::{Collaborators, FauxServer};
use crate::sync::entity::{Entity, SyncOptions};
use crate::sync::request::{Action, RequestDescriptor, SyncContext, SyncMethod};
use crate::sync::response::Outcome;

/// Error reported when an attempt needs the native transport and none is installed.
pub const NO_NATIVE_TRANSPORT: &str = "no native transport configured";

/// Build the descriptor for `action` on `entity`.
pub fn build_request(
    action: Action,
    entity: &dyn Entity,
    options: &SyncOptions,
) -> RequestDescriptor {
    let url = options.url.clone().unwrap_or_else(|| entity.url());
    let data = action
        .carries_data()
        .then(|| options.attrs.clone().unwrap_or_else(|| entity.attributes()));
    RequestDescriptor { action, url, data }
}

impl FauxServer {
    /// Service a persistence attempt.
    ///
    /// The returned outcome is also delivered to the success or error
    /// callback in `options`.
    pub fn sync(&self, action: Action, entity: &dyn Entity, options: SyncOptions) -> Outcome {
        let config = self.config.load_full();
        let collaborators = self.collaborators.load_full();

        let request = build_request(action, entity, &options);
        let ctx = SyncContext::new(&request, options.emulate_http);
        let method = entity.sync_method().unwrap_or(config.default_sync);

        if !config.enabled || method == SyncMethod::Native {
            tracing::debug!(
                action = %action,
                url = %ctx.url,
                enabled = config.enabled,
                sync_method = %method,
                dispatch = "native",
                "Faux dispatch bypassed"
            );
            metrics::record_dispatch("native");
            return native_sync(&collaborators, action, entity, &ctx.url, options);
        }

        let matched = self.registry.get_matching_route(&ctx.url, Some(ctx.http_method));
        let (source, reply) = match matched {
            Some(matched) => {
                tracing::debug!(
                    route = %matched.route.name,
                    method = ctx.http_method,
                    url = %ctx.url,
                    params = ?matched.handler_params,
                    dispatch = "faux",
                    "Dispatching to route handler"
                );
                metrics::record_dispatch("faux");
                let reply = matched.route.handler.call(&ctx, &matched.handler_params);
                (matched.route.name, reply)
            }
            None => match &config.default_handler {
                Some(handler) => {
                    tracing::debug!(
                        method = ctx.http_method,
                        url = %ctx.url,
                        dispatch = "default",
                        "No route matched, using default handler"
                    );
                    metrics::record_dispatch("default");
                    ("<default>".to_string(), handler.call(&ctx, &[]))
                }
                None => {
                    tracing::debug!(
                        method = ctx.http_method,
                        url = %ctx.url,
                        dispatch = "native",
                        "No route matched, falling back to native sync"
                    );
                    metrics::record_dispatch("native");
                    return native_sync(&collaborators, action, entity, &ctx.url, options);
                }
            },
        };

        let outcome = Outcome::from_reply(reply);
        if let Some(message) = outcome.error_message() {
            tracing::debug!(route = %source, error = %message, "Handler signalled error");
            metrics::record_handler_error(&source);
        }
        options.complete(&outcome, collaborators.completion.as_ref());
        outcome
    }
}

fn native_sync(
    collaborators: &Collaborators,
    action: Action,
    entity: &dyn Entity,
    url: &str,
    options: SyncOptions,
) -> Outcome {
    if let Some(native) = &collaborators.native {
        return native.sync(action, entity, options);
    }
    tracing::warn!(
        action = %action,
        url = %url,
        "Native sync requested but no native transport configured"
    );
    let outcome = Outcome::Error(NO_NATIVE_TRANSPORT.to_string());
    options.complete(&outcome, collaborators.completion.as_ref());
    outcome
}

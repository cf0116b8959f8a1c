//! Boundary with the host entity framework.
//!
//! # Responsibilities
//! - Describe what the interceptor reads from an entity (URL, attributes, sync override)
//! - Carry per-call options and completion callbacks
//! - Abstract the native transport and callback scheduling
//!
//! # Design Decisions
//! - Entities are read, never written, by the interceptor
//! - Callbacks are delivered through a [`Completion`] so hosts that defer
//!   completion to a later turn keep that contract

use std::fmt;

use crate::sync::request::{Action, Attributes, SyncMethod};
use crate::sync::response::Outcome;

/// A persistable model or collection.
pub trait Entity {
    /// Resolved resource URL: the collection URL, or the item URL including its id.
    fn url(&self) -> String;

    /// Snapshot of the current attributes.
    fn attributes(&self) -> Attributes;

    /// Per-entity override of the default sync method.
    fn sync_method(&self) -> Option<SyncMethod> {
        None
    }
}

pub type SuccessCallback = Box<dyn FnOnce(Outcome) + Send>;
pub type ErrorCallback = Box<dyn FnOnce(String) + Send>;

/// Options accompanying a single persistence attempt.
#[derive(Default)]
pub struct SyncOptions {
    /// Send non-GET verbs as POST with the real verb alongside.
    pub emulate_http: bool,
    /// Overrides the entity URL.
    pub url: Option<String>,
    /// Overrides the attribute payload for create/update/patch.
    pub attrs: Option<Attributes>,
    pub success: Option<SuccessCallback>,
    pub error: Option<ErrorCallback>,
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emulate_http(mut self, emulate: bool) -> Self {
        self.emulate_http = emulate;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = Some(attrs);
        self
    }

    pub fn on_success(mut self, f: impl FnOnce(Outcome) + Send + 'static) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnOnce(String) + Send + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    /// Deliver `outcome` to the matching callback through `completion`.
    pub fn complete(self, outcome: &Outcome, completion: &dyn Completion) {
        match outcome {
            Outcome::Error(message) => {
                if let Some(error) = self.error {
                    let message = message.clone();
                    completion.defer(Box::new(move || error(message)));
                }
            }
            _ => {
                if let Some(success) = self.success {
                    let outcome = outcome.clone();
                    completion.defer(Box::new(move || success(outcome)));
                }
            }
        }
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("emulate_http", &self.emulate_http)
            .field("url", &self.url)
            .field("attrs", &self.attrs)
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

/// The real transport used when an attempt is not serviced by a faux route.
pub trait NativeSync: Send + Sync {
    fn sync(&self, action: Action, entity: &dyn Entity, options: SyncOptions) -> Outcome;
}

/// Schedules completion callbacks.
pub trait Completion: Send + Sync {
    fn defer(&self, task: Box<dyn FnOnce() + Send>);
}

/// Runs callbacks inline.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Completion for Immediate {
    fn defer(&self, task: Box<dyn FnOnce() + Send>) {
        task()
    }
}

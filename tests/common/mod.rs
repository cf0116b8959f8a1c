//! Shared entity and transport doubles for integration tests.

#![allow(dead_code)]

use faux_server::{
    Action, Attributes, Completion, Entity, FauxServer, Immediate, NativeSync, Outcome,
    SyncMethod, SyncOptions,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A minimal model: attributes, a URL root and an optional sync override.
#[derive(Debug, Clone)]
pub struct Model {
    pub attrs: Attributes,
    pub url_root: String,
    pub sync_method: Option<SyncMethod>,
}

impl Model {
    pub fn new(url_root: &str, attrs: Value) -> Self {
        Self {
            attrs: self::attrs(attrs),
            url_root: url_root.to_string(),
            sync_method: None,
        }
    }

    pub fn id(&self) -> Option<String> {
        self.attrs.get("id").and_then(Value::as_str).map(str::to_string)
    }

    pub fn is_new(&self) -> bool {
        self.id().is_none()
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.attrs.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn save(&mut self, server: &FauxServer, options: SyncOptions) -> Outcome {
        let action = if self.is_new() { Action::Create } else { Action::Update };
        self.run(server, action, options)
    }

    pub fn fetch(&mut self, server: &FauxServer, options: SyncOptions) -> Outcome {
        self.run(server, Action::Read, options)
    }

    pub fn destroy(&mut self, server: &FauxServer, options: SyncOptions) -> Outcome {
        self.run(server, Action::Delete, options)
    }

    fn run(&mut self, server: &FauxServer, action: Action, options: SyncOptions) -> Outcome {
        let outcome = server.sync(action, &*self, options);
        outcome.apply(action, &mut self.attrs);
        outcome
    }
}

impl Entity for Model {
    fn url(&self) -> String {
        match self.id() {
            Some(id) => format!("{}/{}", self.url_root, id),
            None => self.url_root.clone(),
        }
    }

    fn attributes(&self) -> Attributes {
        self.attrs.clone()
    }

    fn sync_method(&self) -> Option<SyncMethod> {
        self.sync_method
    }
}

/// A collection populated by fetch.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub url: String,
    pub models: Vec<Attributes>,
}

impl Collection {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            models: Vec::new(),
        }
    }

    pub fn fetch(&mut self, server: &FauxServer, options: SyncOptions) -> Outcome {
        let outcome = server.sync(Action::Read, &*self, options);
        if let Outcome::SuccessList(members) = &outcome {
            self.models = members.clone();
        }
        outcome
    }
}

impl Entity for Collection {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn attributes(&self) -> Attributes {
        Attributes::new()
    }
}

/// The usual test book.
pub fn dummy_book(id: Option<&str>) -> Model {
    let mut book = Model::new(
        "library-app/books",
        json!({
            "title": "The Catcher in the Rye",
            "author": "J. D. Salinger",
            "pubDate": "July 16, 1951"
        }),
    );
    if let Some(id) = id {
        book.set("id", json!(id));
    }
    book
}

/// Native transport that records every call and succeeds.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<(Action, String)>>>,
}

impl RecordingTransport {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Action, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl NativeSync for RecordingTransport {
    fn sync(&self, action: Action, entity: &dyn Entity, options: SyncOptions) -> Outcome {
        let url = options.url.clone().unwrap_or_else(|| entity.url());
        self.calls.lock().unwrap().push((action, url));
        let outcome = Outcome::Success(None);
        options.complete(&outcome, &Immediate);
        outcome
    }
}

type Task = Box<dyn FnOnce() + Send>;

/// Completion that holds callbacks until explicitly drained.
#[derive(Clone, Default)]
pub struct QueuedCompletion {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl QueuedCompletion {
    pub fn pending(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn run_pending(&self) {
        let tasks: Vec<Task> = std::mem::take(&mut *self.tasks.lock().unwrap());
        for task in tasks {
            task();
        }
    }
}

impl Completion for QueuedCompletion {
    fn defer(&self, task: Task) {
        self.tasks.lock().unwrap().push(task);
    }
}

/// A server wired to a fresh recording transport.
pub fn server() -> (FauxServer, RecordingTransport) {
    let transport = RecordingTransport::default();
    let server = FauxServer::new().with_native(transport.clone());
    (server, transport)
}

/// Shared slot for values captured inside handlers.
pub fn slot<T>() -> Arc<Mutex<Option<T>>> {
    Arc::new(Mutex::new(None))
}

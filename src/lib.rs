//! Faux REST server for entity sync.
//!
//! Lets model/collection code persist and load itself against in-process
//! route handlers instead of a real network transport.
//!
//! # Architecture Overview
//!
//! ```text
//!     entity.save() ──▶ sync::interceptor ──▶ routing::resolver ──▶ route handler
//!                            │    ▲                  │                    │
//!                            │    │           routing::registry           │
//!                            │    │           routing::pattern            ▼
//!                            │    └──────────── sync::response ◀──── reply (JSON)
//!                            ▼
//!                      NativeSync (disabled, native method, or no match)
//! ```
//!
//! # Example
//!
//! ```
//! use faux_server::{Action, Attributes, Entity, FauxServer, Handler, Outcome, SyncOptions};
//! use serde_json::json;
//!
//! struct Book;
//!
//! impl Entity for Book {
//!     fn url(&self) -> String {
//!         "library-app/books/42".into()
//!     }
//!
//!     fn attributes(&self) -> Attributes {
//!         Attributes::new()
//!     }
//! }
//!
//! let server = FauxServer::new();
//! server.add_route(
//!     "readBook",
//!     "library-app/books/:id",
//!     "GET",
//!     Handler::new(|_ctx, params| json!({ "id": params[0], "title": "Dune" })),
//! );
//!
//! let outcome = server.sync(Action::Read, &Book, SyncOptions::new());
//! assert!(matches!(outcome, Outcome::Success(Some(_))));
//! ```

// Core subsystems
pub mod routing;
pub mod server;
pub mod sync;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::{load_config, FauxConfig};
pub use routing::{Handler, MatchedRoute, Pattern, Route, RouteRegistry, RouteSpec};
pub use server::{global, FauxServer, ProcessConfig};
pub use sync::{
    Action, Attributes, Completion, Entity, Immediate, NativeSync, Outcome, SyncContext,
    SyncMethod, SyncOptions,
};

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     add_route(name, template | regex, verb, handler)
//!     → pattern.rs (compile template to anchored regex)
//!     → registry.rs (store by name, stamp sequence)
//!
//! Lookup:
//!     (url, verb?)
//!     → resolver.rs (match patterns, filter verbs, rank)
//!     → Return: MatchedRoute { route, handler_params } or None
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once, at registration
//! - Exact verb beats any-verb; recency breaks ties within a rank
//! - Deterministic: same registry and input always resolve the same route

pub mod pattern;
pub mod registry;
pub mod resolver;

pub use pattern::{Pattern, PatternError, PatternSource};
pub use registry::{Handler, Route, RouteRegistry, RouteSpec, ANY_METHOD};
pub use resolver::MatchedRoute;

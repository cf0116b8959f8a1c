//! Sync interception subsystem.
//!
//! # Data Flow
//! ```text
//! entity.save() / fetch() / destroy()
//!     → interceptor.rs (action → verb, emulation, url, payload)
//!     → sync method resolution (entity override, default, enabled flag)
//!     → routing (matched route) | default handler | NativeSync
//!     → response.rs (reply → Outcome)
//!     → entity.rs (callbacks delivered via Completion)
//! ```
//!
//! # Design Decisions
//! - The host framework calls in explicitly; nothing is patched globally
//! - Handler replies are interpreted once, into a tagged `Outcome`
//! - Faux completion follows the same callback contract as the native transport

pub mod entity;
pub mod interceptor;
pub mod request;
pub mod response;

pub use entity::{Completion, Entity, Immediate, NativeSync, SyncOptions};
pub use interceptor::{build_request, NO_NATIVE_TRANSPORT};
pub use request::{Action, Attributes, RequestDescriptor, SyncContext, SyncMethod};
pub use response::Outcome;

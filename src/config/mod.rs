//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FauxConfig (validated, immutable)
//!     → FauxServer::apply_config (switches + canned routes)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Canned routes reply with fixed JSON; code-defined routes cover the rest

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FauxConfig, ObservabilityConfig, RouteConfig};
pub use validation::{validate_config, ValidationError};

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route names present and unique
//! - Exactly one of `url` / `regex` per route, and regexes compile
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FauxConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is applied to a server

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::FauxConfig;
use crate::routing::Pattern;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route `{0}` is defined more than once")]
    DuplicateRouteName(String),

    #[error("route `{0}` needs either `url` or `regex`")]
    MissingPattern(String),

    #[error("route `{0}` sets both `url` and `regex`")]
    AmbiguousPattern(String),

    #[error("route `{route}`: {message}")]
    InvalidRegex { route: String, message: String },
}

pub fn validate_config(config: &FauxConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        match (&route.url, &route.regex) {
            (None, None) => errors.push(ValidationError::MissingPattern(route.name.clone())),
            (Some(_), Some(_)) => {
                errors.push(ValidationError::AmbiguousPattern(route.name.clone()))
            }
            (None, Some(expr)) => {
                if let Err(e) = Pattern::try_regex(expr) {
                    errors.push(ValidationError::InvalidRegex {
                        route: route.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
            (Some(_), None) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

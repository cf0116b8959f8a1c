//! Structured logging setup.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Installing twice is an error, not a panic, so tests can call it freely

use thiserror::Error;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{filter}`: {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Build the filter for `config`, preferring `RUST_LOG` when set.
pub fn filter(config: &ObservabilityConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = format!("faux_server={}", config.log_level);
    EnvFilter::try_new(&directive).map_err(|source| LoggingError::Filter {
        filter: directive,
        source,
    })
}

/// Install a fmt subscriber for the process.
pub fn init(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(filter(config)?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

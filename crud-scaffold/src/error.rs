//! Crate-level error type
//!
//! Request-path failures are [`ApiError`](crate::handlers::ApiError) and
//! [`RepositoryError`]; this type covers startup and wiring: configuration,
//! binding the listener, serving.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration parsed but is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Structured repository error with operation context
    #[error("{0}")]
    Database(#[from] RepositoryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

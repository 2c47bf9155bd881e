//! # crud-scaffold
//!
//! Generic CRUD over PostgreSQL: one handler definition and one data-access
//! definition, instantiated per entity type.
//!
//! ## Features
//!
//! - **Shape-driven persistence**: an entity declares its table, key and
//!   field-to-column mapping once; every statement is generated from it
//! - **Uniform outcomes**: absent data is *not found*, rejected writes are
//!   *bad request*, store faults keep their kind up to the HTTP boundary
//! - **Scoped connections**: one short-lived connection per operation, released
//!   on every exit path
//! - **Structured logging**: every operation logs intent and outcome under an
//!   injected `tracing` span
//! - **Graceful shutdown**: proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use crud_scaffold::prelude::*;
//! use crud_scaffold::registrant::Registrant;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config);
//!
//!     let repository = PgRepository::<Registrant>::from_config(&config.database)?;
//!     let handler = CrudHandler::<Registrant, _>::new(repository)
//!         .with_empty_list_policy(config.handlers.empty_list);
//!
//!     let app = Router::new()
//!         .nest("/api/registrants", crud_router::<Registrant, _>(Arc::new(handler)));
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod registrant;
pub mod repository;
pub mod routes;
pub mod server;

#[cfg(test)]
mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, HandlerConfig, ServiceConfig};
    pub use crate::database::ConnectionDescriptor;
    pub use crate::entity::{Entity, EntityBase, EntityId, EntityShape, FieldMapping, SqlValue};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        ApiError, ApiErrorKind, ApiOperation, CollectionHandler, CrudHandler, EmptyListPolicy,
        ItemResponse,
    };
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        PgRepository, Repository, RepositoryError, RepositoryErrorKind, RepositoryOperation,
        RepositoryResult,
    };
    pub use crate::routes::crud_router;
    pub use crate::server::Server;

    pub use axum::Router;
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, trace, warn, Span};
}

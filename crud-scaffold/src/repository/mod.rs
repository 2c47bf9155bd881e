//! Generic data-access layer
//!
//! A single [`Repository`] contract and a single PostgreSQL implementation,
//! [`PgRepository`], instantiated per entity type from its
//! [`EntityShape`](crate::entity::EntityShape).
//!
//! # Features
//!
//! - **Shape-driven SQL**: [`Statements`] are generated once per entity type
//! - **Scoped connections**: every operation opens and releases its own connection
//! - **Absence as `Option`**: missing rows and empty tables are never errors
//! - **Loud gaps**: operations an implementation omits fail with
//!   [`RepositoryErrorKind::Unimplemented`]
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_scaffold::registrant::Registrant;
//! use crud_scaffold::repository::{ConnectionDescriptor, PgRepository, Repository};
//!
//! let repository = PgRepository::<Registrant>::new(ConnectionDescriptor::new(url));
//!
//! let id = repository
//!     .create(&Registrant::new(100, "alice", 200, "alice#1"))
//!     .await?
//!     .expect("store assigned an id");
//! let stored = repository.find_by_id(id).await?;
//! ```

mod error;
mod postgres;
mod sql;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use postgres::PgRepository;
pub use sql::Statements;
pub use traits::{Repository, RepositoryResult};

pub use crate::database::ConnectionDescriptor;

//! Repository trait definition
//!
//! The trait uses RPITIT (Return Position Impl Trait In Traits) so async
//! methods need no boxing and no `async_trait`.
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_scaffold::repository::{Repository, RepositoryResult};
//!
//! struct TeamRepository { /* ... */ }
//!
//! impl Repository<Team> for TeamRepository {
//!     async fn create(&self, entity: &Team) -> RepositoryResult<Option<EntityId>> {
//!         // Insert and return the generated key
//!         todo!()
//!     }
//!
//!     // find_by_id, find_all and count are required;
//!     // update, delete and exists fall back to an unimplemented error
//! }
//! ```

use std::future::Future;

use super::error::{RepositoryError, RepositoryOperation};
use crate::entity::{Entity, EntityId};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence contract for one entity type
///
/// Absence is modelled with `Option`: a missing row, an empty table or an
/// insert that produced no key are all `Ok(None)`. Errors are reserved for
/// faults and for operations an implementation does not support.
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert a new entity and return its store-assigned identifier
    ///
    /// Any `id` already present on the entity is ignored. Returns `Ok(None)`
    /// when the store assigned no identifier.
    fn create(&self, entity: &E) -> impl Future<Output = RepositoryResult<Option<EntityId>>> + Send;

    /// Find an entity by its identifier
    fn find_by_id(&self, id: EntityId) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    /// Fetch every entity, unordered and unfiltered
    ///
    /// Returns `Ok(None)` when the table holds no rows, never an empty vector.
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Option<Vec<E>>>> + Send;

    /// Number of rows in the entity table
    fn count(&self) -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Replace every mapped field of the entity addressed by its identifier
    ///
    /// Returns the number of affected rows.
    fn update(&self, entity: &E) -> impl Future<Output = RepositoryResult<u64>> + Send {
        let _ = entity;
        async {
            Err(RepositoryError::unimplemented(RepositoryOperation::Update).with_entity_type(E::NAME))
        }
    }

    /// Delete an entity by its identifier (hard delete)
    ///
    /// Returns the number of affected rows.
    fn delete(&self, id: EntityId) -> impl Future<Output = RepositoryResult<u64>> + Send {
        let _ = id;
        async {
            Err(RepositoryError::unimplemented(RepositoryOperation::Delete).with_entity_type(E::NAME))
        }
    }

    /// Check whether an entity with the identifier exists
    fn exists(&self, id: EntityId) -> impl Future<Output = RepositoryResult<bool>> + Send {
        let _ = id;
        async {
            Err(RepositoryError::unimplemented(RepositoryOperation::Exists).with_entity_type(E::NAME))
        }
    }
}

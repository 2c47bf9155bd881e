//! Handler trait definition
//!
//! [`CollectionHandler`] is the seam between the HTTP routes and the
//! handler logic. It uses RPITIT (Return Position Impl Trait In Traits), so
//! implementations are plain `async fn`s.

use std::future::Future;

use super::error::ApiError;
use super::response::ItemResponse;
use crate::entity::{Entity, EntityId};

/// Standard CRUD handler over one entity type
///
/// [`CrudHandler`](super::CrudHandler) is the generic implementation; the
/// router in [`crate::routes`] accepts any implementation.
pub trait CollectionHandler<E: Entity>: Send + Sync {
    /// Every stored entity
    fn list(&self) -> impl Future<Output = Result<ItemResponse<Vec<E>>, ApiError>> + Send;

    /// One entity by id
    fn get(&self, id: EntityId) -> impl Future<Output = Result<ItemResponse<E>, ApiError>> + Send;

    /// Store a new entity and return its generated id
    fn create(
        &self,
        entity: E,
    ) -> impl Future<Output = Result<ItemResponse<EntityId>, ApiError>> + Send;

    /// Replace an existing entity and return the affected-row count
    fn update(&self, entity: E) -> impl Future<Output = Result<ItemResponse<u64>, ApiError>> + Send;

    /// Delete an entity by id and return the affected-row count
    fn delete(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<ItemResponse<u64>, ApiError>> + Send;
}

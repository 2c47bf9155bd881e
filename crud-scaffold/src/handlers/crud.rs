//! Generic CRUD handler
//!
//! One [`CrudHandler`] is instantiated per entity type. It never looks at
//! entity-specific fields: it logs intent and outcome under its injected
//! span and turns repository results into the handler vocabulary.
//!
//! | Operation | Absent / zero result | Message |
//! |---|---|---|
//! | list | not found | `No entities exist` |
//! | get | not found | `No entity exists with that id` |
//! | create | bad request | `Failed to create entity` |
//! | update | bad request | `Failed to update entity` |
//! | delete | bad request | `Failed to delete entity` |

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{Instrument, Span};

use super::error::{ApiError, ApiOperation};
use super::response::ItemResponse;
use super::traits::CollectionHandler;
use crate::entity::{Entity, EntityId};
use crate::repository::Repository;

const NO_ENTITIES: &str = "No entities exist";
const NO_ENTITY_WITH_ID: &str = "No entity exists with that id";
const CREATE_FAILED: &str = "Failed to create entity";
const UPDATE_FAILED: &str = "Failed to update entity";
const DELETE_FAILED: &str = "Failed to delete entity";

/// What `list` answers when the table holds no rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyListPolicy {
    /// Report not found
    #[default]
    NotFound,
    /// Succeed with an empty collection
    Empty,
}

/// Handler for one entity type over one repository
///
/// # Example
///
/// ```rust,ignore
/// use crud_scaffold::handlers::{CollectionHandler, CrudHandler};
/// use crud_scaffold::registrant::Registrant;
/// use crud_scaffold::repository::PgRepository;
///
/// let handler = CrudHandler::<Registrant, _>::new(PgRepository::new(descriptor));
/// let created = handler.create(Registrant::new(100, "alice", 200, "alice#1")).await?;
/// ```
pub struct CrudHandler<E, R> {
    repository: R,
    span: Span,
    empty_list: EmptyListPolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> CrudHandler<E, R>
where
    E: Entity,
    R: Repository<E>,
{
    /// Handler logging under a span named after the entity
    pub fn new(repository: R) -> Self {
        Self::with_span(
            repository,
            tracing::info_span!("crud_handler", entity = E::NAME),
        )
    }

    /// Handler logging under the given span
    pub fn with_span(repository: R, span: Span) -> Self {
        Self {
            repository,
            span,
            empty_list: EmptyListPolicy::default(),
            _entity: PhantomData,
        }
    }

    /// Choose what an empty table lists as
    #[must_use]
    pub fn with_empty_list_policy(mut self, policy: EmptyListPolicy) -> Self {
        self.empty_list = policy;
        self
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<E, R> CollectionHandler<E> for CrudHandler<E, R>
where
    E: Entity,
    R: Repository<E>,
{
    async fn list(&self) -> Result<ItemResponse<Vec<E>>, ApiError> {
        async {
            tracing::info!(entity = E::NAME, "Fetching all entities of type {}", E::NAME);

            let entities = match self.repository.find_all().await? {
                Some(entities) => entities,
                None if self.empty_list == EmptyListPolicy::Empty => Vec::new(),
                None => {
                    tracing::warn!(entity = E::NAME, "No entities of type {} found", E::NAME);
                    return Err(ApiError::not_found(ApiOperation::List, NO_ENTITIES)
                        .with_entity_type(E::NAME));
                }
            };

            tracing::info!(
                entity = E::NAME,
                count = entities.len(),
                "Successfully fetched all entities of type {}",
                E::NAME
            );
            Ok(ItemResponse::new(entities))
        }
        .instrument(self.span.clone())
        .await
    }

    async fn get(&self, id: EntityId) -> Result<ItemResponse<E>, ApiError> {
        async {
            tracing::info!(entity = E::NAME, id, "Fetching entity of type {} with id {}", E::NAME, id);

            let Some(entity) = self.repository.find_by_id(id).await? else {
                tracing::warn!(entity = E::NAME, id, "No entity of type {} with id {} found", E::NAME, id);
                return Err(ApiError::not_found(ApiOperation::Get, NO_ENTITY_WITH_ID)
                    .with_entity(E::NAME, id.to_string()));
            };

            tracing::info!(
                entity = E::NAME,
                id,
                "Successfully fetched entity of type {} with id {}",
                E::NAME,
                id
            );
            Ok(ItemResponse::new(entity))
        }
        .instrument(self.span.clone())
        .await
    }

    async fn create(&self, entity: E) -> Result<ItemResponse<EntityId>, ApiError> {
        async {
            tracing::info!(entity = E::NAME, "Creating entity of type {}", E::NAME);

            let Some(id) = self.repository.create(&entity).await? else {
                tracing::error!(entity = E::NAME, "Failed to create entity of type {}", E::NAME);
                return Err(ApiError::bad_request(ApiOperation::Create, CREATE_FAILED)
                    .with_entity_type(E::NAME));
            };

            tracing::info!(entity = E::NAME, id, "Successfully created entity of type {}", E::NAME);
            Ok(ItemResponse::new(id))
        }
        .instrument(self.span.clone())
        .await
    }

    async fn update(&self, entity: E) -> Result<ItemResponse<u64>, ApiError> {
        async {
            let id = entity.id();
            tracing::info!(entity = E::NAME, id, "Updating entity of type {}", E::NAME);

            let rows_affected = self.repository.update(&entity).await?;
            if rows_affected == 0 {
                tracing::error!(entity = E::NAME, id, "Failed to update entity of type {}", E::NAME);
                let error = ApiError::bad_request(ApiOperation::Update, UPDATE_FAILED);
                return Err(match id {
                    Some(id) => error.with_entity(E::NAME, id.to_string()),
                    None => error.with_entity_type(E::NAME),
                });
            }

            tracing::info!(
                entity = E::NAME,
                id,
                rows_affected,
                "Successfully updated entity of type {}",
                E::NAME
            );
            Ok(ItemResponse::new(rows_affected))
        }
        .instrument(self.span.clone())
        .await
    }

    async fn delete(&self, id: EntityId) -> Result<ItemResponse<u64>, ApiError> {
        async {
            tracing::info!(entity = E::NAME, id, "Deleting entity of type {} with id {}", E::NAME, id);

            let rows_affected = self.repository.delete(id).await?;
            if rows_affected == 0 {
                tracing::error!(
                    entity = E::NAME,
                    id,
                    "Failed to delete entity of type {} with id {}",
                    E::NAME,
                    id
                );
                return Err(ApiError::bad_request(ApiOperation::Delete, DELETE_FAILED)
                    .with_entity(E::NAME, id.to_string()));
            }

            tracing::info!(
                entity = E::NAME,
                id,
                rows_affected,
                "Successfully deleted entity of type {} with id {}",
                E::NAME,
                id
            );
            Ok(ItemResponse::new(rows_affected))
        }
        .instrument(self.span.clone())
        .await
    }
}

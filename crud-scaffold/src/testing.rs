//! In-memory repositories for handler and router tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::entity::{Entity, EntityId};
use crate::repository::{Repository, RepositoryError, RepositoryOperation, RepositoryResult};

/// Map-backed repository with store-like id and timestamp assignment
pub(crate) struct MemoryRepository<E> {
    rows: Mutex<BTreeMap<EntityId, E>>,
    next_id: Mutex<EntityId>,
}

impl<E> MemoryRepository<E> {
    pub(crate) fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
        }
    }
}

impl<E: Entity + Clone> Repository<E> for MemoryRepository<E> {
    async fn create(&self, entity: &E) -> RepositoryResult<Option<EntityId>> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };
        let mut stored = entity.clone();
        let base = stored.base_mut();
        base.id = Some(id);
        base.created_at = Some(Utc::now());
        base.updated_at = None;
        self.rows.lock().unwrap().insert(id, stored);
        Ok(Some(id))
    }

    async fn find_by_id(&self, id: EntityId) -> RepositoryResult<Option<E>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Option<Vec<E>>> {
        let rows = self.rows.lock().unwrap();
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.values().cloned().collect()))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn update(&self, entity: &E) -> RepositoryResult<u64> {
        let Some(id) = entity.id() else {
            return Ok(0);
        };
        let mut rows = self.rows.lock().unwrap();
        let Some(current) = rows.get_mut(&id) else {
            return Ok(0);
        };
        let created_at = current.base().created_at;
        *current = entity.clone();
        let base = current.base_mut();
        base.created_at = created_at;
        base.updated_at = Some(Utc::now());
        Ok(1)
    }

    async fn delete(&self, id: EntityId) -> RepositoryResult<u64> {
        Ok(u64::from(self.rows.lock().unwrap().remove(&id).is_some()))
    }

    async fn exists(&self, id: EntityId) -> RepositoryResult<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }
}

/// Repository whose store is never reachable
pub(crate) struct FailingRepository;

impl FailingRepository {
    fn refused(operation: RepositoryOperation) -> RepositoryError {
        RepositoryError::connection_failed(operation, "connection refused")
    }
}

impl<E: Entity> Repository<E> for FailingRepository {
    async fn create(&self, _entity: &E) -> RepositoryResult<Option<EntityId>> {
        Err(Self::refused(RepositoryOperation::Create))
    }

    async fn find_by_id(&self, id: EntityId) -> RepositoryResult<Option<E>> {
        Err(Self::refused(RepositoryOperation::FindById).with_entity(E::NAME, id.to_string()))
    }

    async fn find_all(&self) -> RepositoryResult<Option<Vec<E>>> {
        Err(Self::refused(RepositoryOperation::FindAll))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Err(Self::refused(RepositoryOperation::Count))
    }
}

/// Repository that stores nothing and leaves writes to the trait defaults
pub(crate) struct ReadOnlyRepository;

impl<E: Entity> Repository<E> for ReadOnlyRepository {
    async fn create(&self, _entity: &E) -> RepositoryResult<Option<EntityId>> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: EntityId) -> RepositoryResult<Option<E>> {
        Ok(None)
    }

    async fn find_all(&self) -> RepositoryResult<Option<Vec<E>>> {
        Ok(None)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(0)
    }
}

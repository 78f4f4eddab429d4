//! Entity service: delegates to the repository, choosing insert or update on save.

use crate::domain::Entity;
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};
use crate::repository::{InMemoryRepository, PgRepository, Repository};
use sqlx::PgPool;
use std::sync::Arc;

pub struct CrudService<E> {
    repo: Arc<dyn Repository<E>>,
}

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        CrudService {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        CrudService { repo }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgRepository::<E>::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::<E>::new()))
    }

    pub fn repository(&self) -> &Arc<dyn Repository<E>> {
        &self.repo
    }

    /// Insert when the entity has no identity, otherwise overwrite the stored row.
    pub async fn save(&self, entity: E) -> Result<E, AppError> {
        tracing::debug!(entity = E::DESCRIPTOR.entity_name, value = ?entity, "request to save");
        match entity.id() {
            None => self.repo.insert(entity).await,
            Some(id) => self.repo.update(entity).await?.ok_or(AppError::NotFound {
                entity: E::DESCRIPTOR.entity_name,
                id,
            }),
        }
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<E>, AppError> {
        tracing::debug!(entity = E::DESCRIPTOR.entity_name, page = request.page, size = request.size, "request to get a page");
        self.repo.find_page(request).await
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<E>, AppError> {
        tracing::debug!(entity = E::DESCRIPTOR.entity_name, id, "request to get");
        self.repo.find_by_id(id).await
    }

    /// Idempotent: deleting an absent identity is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(entity = E::DESCRIPTOR.entity_name, id, "request to delete");
        if !self.repo.delete_by_id(id).await? {
            tracing::debug!(entity = E::DESCRIPTOR.entity_name, id, "nothing to delete");
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Title;

    #[tokio::test]
    async fn save_without_identity_inserts() {
        let service = CrudService::<Title>::in_memory();
        let saved = service.save(Title::new("Engineer")).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_with_identity_overwrites() {
        let service = CrudService::<Title>::in_memory();
        let mut saved = service.save(Title::new("Engineer")).await.unwrap();
        saved.name = "Manager".into();
        service.save(saved.clone()).await.unwrap();

        let found = service.find_one(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "Manager");
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_identity_is_not_found() {
        let service = CrudService::<Title>::in_memory();
        let mut ghost = Title::new("ghost");
        ghost.id = Some(404);
        let err = service.save(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "title", id: 404 }));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = CrudService::<Title>::in_memory();
        let saved = service.save(Title::new("Engineer")).await.unwrap();
        let id = saved.id.unwrap();
        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();
        assert_eq!(service.count().await.unwrap(), 0);
    }
}

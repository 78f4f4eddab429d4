//! Persistence seam: one repository per entity type.

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

use crate::domain::Entity;
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every stored entity in identity order.
    async fn find_all(&self) -> Result<Vec<E>, AppError>;

    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError>;

    /// Store a new entity; the identity on `entity` is ignored and a fresh one assigned.
    async fn insert(&self, entity: E) -> Result<E, AppError>;

    /// Overwrite the stored entity with the same identity. `None` when no such row exists.
    async fn update(&self, entity: E) -> Result<Option<E>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<u64, AppError>;
}

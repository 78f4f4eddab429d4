//! Shared application state: one service per exposed entity.

use crate::domain::{Company, Title};
use crate::service::CrudService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    /// Present when backed by PostgreSQL; used by the readiness check.
    pub pool: Option<PgPool>,
    pub titles: CrudService<Title>,
    pub companies: CrudService<Company>,
}

impl AppState {
    pub fn postgres(pool: PgPool) -> Self {
        AppState {
            titles: CrudService::postgres(pool.clone()),
            companies: CrudService::postgres(pool.clone()),
            pool: Some(pool),
        }
    }

    pub fn in_memory() -> Self {
        AppState {
            pool: None,
            titles: CrudService::in_memory(),
            companies: CrudService::in_memory(),
        }
    }
}

//! Generic CRUD execution against PostgreSQL.

use super::Repository;
use crate::domain::Entity;
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::marker::PhantomData;

pub struct PgRepository<E> {
    pool: PgPool,
    _marker: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        PgRepository {
            pool,
            _marker: PhantomData,
        }
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        PgRepository {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Entity> PgRepository<E> {
    async fn fetch_many(&self, q: &QueryBuf) -> Result<Vec<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, E>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, E>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        self.fetch_many(&sql::select_all(&E::DESCRIPTOR)).await
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError> {
        let q = sql::select_page(&E::DESCRIPTOR, &request.sort, request.size, request.offset());
        let content = self.fetch_many(&q).await?;
        let total = self.count().await?;
        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        let mut q = sql::select_by_id(&E::DESCRIPTOR);
        q.params.push(Value::Number(id.into()));
        self.fetch_optional(&q).await
    }

    async fn insert(&self, entity: E) -> Result<E, AppError> {
        let q = sql::insert(&E::DESCRIPTOR, entity.column_values());
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(&self, entity: E) -> Result<Option<E>, AppError> {
        let Some(id) = entity.id() else {
            return Ok(None);
        };
        let q = sql::update(&E::DESCRIPTOR, id, entity.column_values());
        self.fetch_optional(&q).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(&E::DESCRIPTOR);
        tracing::debug!(sql = %q.sql, id, "query");
        let result = sqlx::query(&q.sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, AppError> {
        let q = sql::count(&E::DESCRIPTOR);
        tracing::debug!(sql = %q.sql, "query");
        let n: i64 = sqlx::query_scalar(&q.sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }
}

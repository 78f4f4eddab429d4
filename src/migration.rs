//! Create entity tables on startup. Idempotent: every statement is `IF NOT EXISTS`.

use crate::domain::{Company, Entity, EntityDescriptor, Title};
use crate::error::AppError;
use crate::sql::create_table;
use sqlx::PgPool;

/// Descriptors of every table the application owns, in creation order.
pub const ENTITY_TABLES: &[EntityDescriptor] = &[Title::DESCRIPTOR, Company::DESCRIPTOR];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for entity in ENTITY_TABLES {
        let ddl = create_table(entity);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        tracing::info!(table = entity.table_name, "table ready");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_and_path_names_are_unique() {
        let tables: HashSet<_> = ENTITY_TABLES.iter().map(|e| e.table_name).collect();
        let paths: HashSet<_> = ENTITY_TABLES.iter().map(|e| e.path_segment).collect();
        assert_eq!(tables.len(), ENTITY_TABLES.len());
        assert_eq!(paths.len(), ENTITY_TABLES.len());
    }
}

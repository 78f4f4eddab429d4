//! Entity types and the static descriptors the SQL builder, validator and routes work from.

mod company;
mod title;

pub use company::Company;
pub use title::Title;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::postgres::PgRow;

/// Name of the identity column shared by every entity table.
pub const ID_COLUMN: &str = "id";

/// Per-column request rules, checked before a body is deserialized.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub pattern: Option<&'static str>,
}

impl ValidationRule {
    pub const NONE: ValidationRule = ValidationRule {
        required: false,
        max_length: None,
        min_length: None,
        pattern: None,
    };
}

/// A non-identity column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    /// Column type used in `CREATE TABLE`.
    pub sql_type: &'static str,
    pub rule: ValidationRule,
}

#[derive(Clone, Copy, Debug)]
pub struct EntityDescriptor {
    /// Singular name used in alert headers and log lines (e.g. "title").
    pub entity_name: &'static str,
    /// REST collection segment under `/api` (e.g. "titles").
    pub path_segment: &'static str,
    pub table_name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl EntityDescriptor {
    /// Whether `name` is the identity column or one of the declared columns.
    pub fn has_property(&self, name: &str) -> bool {
        name == ID_COLUMN || self.columns.iter().any(|c| c.name == name)
    }

    pub fn collection_path(&self) -> String {
        format!("/api/{}", self.path_segment)
    }
}

/// A persisted record type exposed through the CRUD endpoints.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static + for<'r> sqlx::FromRow<'r, PgRow>
{
    const DESCRIPTOR: EntityDescriptor;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Values of the non-identity columns, in descriptor order.
    fn column_values(&self) -> Vec<Value>;
}

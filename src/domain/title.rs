use super::{ColumnDef, Entity, EntityDescriptor, ValidationRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A job title.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Title {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

impl Title {
    pub fn new(name: impl Into<String>) -> Self {
        Title { id: None, name: name.into() }
    }
}

/// Identity equality: only two persisted titles with the same id are equal.
impl PartialEq for Title {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

impl Entity for Title {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        entity_name: "title",
        path_segment: "titles",
        table_name: "title",
        columns: &[ColumnDef {
            name: "name",
            sql_type: "VARCHAR(255) NOT NULL",
            rule: ValidationRule {
                required: true,
                max_length: Some(255),
                ..ValidationRule::NONE
            },
        }],
    };

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn column_values(&self) -> Vec<Value> {
        vec![Value::String(self.name.clone())]
    }
}

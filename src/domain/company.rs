use super::{ColumnDef, Entity, EntityDescriptor, ValidationRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Company {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Company { id: None, name: name.into() }
    }
}

impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

impl Entity for Company {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        entity_name: "company",
        path_segment: "companies",
        table_name: "company",
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

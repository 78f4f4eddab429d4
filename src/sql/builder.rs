//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and DDL from an entity descriptor.

use crate::domain::{EntityDescriptor, ID_COLUMN};
use crate::pagination::{Direction, SortOrder};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Identity first, then the declared columns in order.
fn select_column_list(entity: &EntityDescriptor) -> String {
    std::iter::once(ID_COLUMN)
        .chain(entity.columns.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by identity. Caller binds the id as `$1`.
pub fn select_by_id(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(entity),
        quoted(entity.table_name),
        quoted(ID_COLUMN)
    );
    q
}

/// SELECT every row in identity order.
pub fn select_all(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} ASC",
        select_column_list(entity),
        quoted(entity.table_name),
        quoted(ID_COLUMN)
    );
    q
}

/// SELECT one page. Sort properties must already be checked against the descriptor;
/// identity is appended as the final key so pages are stable.
pub fn select_page(entity: &EntityDescriptor, sort: &[SortOrder], limit: u32, offset: u64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut order: Vec<String> = sort
        .iter()
        .filter(|s| entity.has_property(&s.property))
        .map(|s| {
            let dir = match s.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!("{} {}", quoted(&s.property), dir)
        })
        .collect();
    if !sort.iter().any(|s| s.property == ID_COLUMN) {
        order.push(format!("{} ASC", quoted(ID_COLUMN)));
    }
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(entity),
        quoted(entity.table_name),
        order.join(", "),
        limit,
        offset
    );
    q
}

pub fn count(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(entity.table_name));
    q
}

/// INSERT the declared columns; identity comes from the sequence. Returns the stored row.
pub fn insert(entity: &EntityDescriptor, values: Vec<Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols: Vec<String> = entity.columns.iter().map(|c| quoted(c.name)).collect();
    let placeholders: Vec<String> = values.into_iter().map(|v| format!("${}", q.push_param(v))).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(entity.table_name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(entity)
    );
    q
}

/// UPDATE every declared column of the row with the given identity. Returns the stored row.
pub fn update(entity: &EntityDescriptor, id: i64, values: Vec<Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = entity
        .columns
        .iter()
        .zip(values)
        .map(|(c, v)| format!("{} = ${}", quoted(c.name), q.push_param(v)))
        .collect();
    let id_param = q.push_param(Value::Number(id.into()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(entity.table_name),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param,
        select_column_list(entity)
    );
    q
}

/// DELETE by identity. Caller binds the id as `$1`.
pub fn delete(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(entity.table_name),
        quoted(ID_COLUMN)
    );
    q
}

pub fn create_table(entity: &EntityDescriptor) -> String {
    let mut defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted(ID_COLUMN))];
    defs.extend(entity.columns.iter().map(|c| format!("{} {}", quoted(c.name), c.sql_type)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(entity.table_name),
        defs.join(", ")
    )
}

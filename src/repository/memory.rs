//! In-process store used when no database is configured, and by tests.

use super::Repository;
use crate::domain::{Entity, ID_COLUMN};
use crate::error::AppError;
use crate::pagination::{Direction, Page, PageRequest, SortOrder};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Rows<E> {
    by_id: BTreeMap<i64, E>,
    next_id: i64,
}

pub struct InMemoryRepository<E> {
    rows: RwLock<Rows<E>>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        InMemoryRepository {
            rows: RwLock::new(Rows {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Nulls first, then numbers, strings, booleans; mixed kinds fall back to kind order.
fn compare_json(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or_default()
            .partial_cmp(&y.as_f64().unwrap_or_default())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn sort_rows<E: Entity>(rows: &mut [(Value, E)], sort: &[SortOrder]) {
    rows.sort_by(|(a, _), (b, _)| {
        for s in sort {
            let ord = compare_json(&a[s.property.as_str()], &b[s.property.as_str()]);
            let ord = match s.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        compare_json(&a[ID_COLUMN], &b[ID_COLUMN])
    });
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>, AppError> {
        let guard = self.rows.read().await;
        let total = guard.by_id.len() as u64;
        let mut keyed = Vec::with_capacity(guard.by_id.len());
        for e in guard.by_id.values() {
            let json = serde_json::to_value(e).unwrap_or(Value::Null);
            keyed.push((json, e.clone()));
        }
        drop(guard);

        sort_rows(&mut keyed, &request.sort);
        let content = keyed
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .map(|(_, e)| e)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn insert(&self, mut entity: E) -> Result<E, AppError> {
        let mut guard = self.rows.write().await;
        let id = guard.next_id;
        guard.next_id += 1;
        entity.set_id(id);
        guard.by_id.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<Option<E>, AppError> {
        let Some(id) = entity.id() else {
            return Ok(None);
        };
        let mut guard = self.rows.write().await;
        match guard.by_id.get_mut(&id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.write().await.by_id.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.rows.read().await.by_id.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Title;

    async fn seeded(names: &[&str]) -> InMemoryRepository<Title> {
        let repo = InMemoryRepository::new();
        for name in names {
            repo.insert(Title::new(*name)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = seeded(&["a", "b"]).await;
        let ids: Vec<_> = repo.find_all().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[tokio::test]
    async fn insert_ignores_caller_identity() {
        let repo = InMemoryRepository::new();
        let mut t = Title::new("a");
        t.set_id(99);
        let saved = repo.insert(t).await.unwrap();
        assert_eq!(saved.id, Some(1));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = seeded(&["a"]).await;
        assert!(repo.delete_by_id(1).await.unwrap());
        let saved = repo.insert(Title::new("b")).await.unwrap();
        assert_eq!(saved.id, Some(2));
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let repo = seeded(&["a"]).await;
        let mut ghost = Title::new("ghost");
        ghost.set_id(42);
        assert!(repo.update(ghost).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn page_honours_sort_and_window() {
        let repo = seeded(&["delta", "alpha", "charlie", "bravo"]).await;
        let request = PageRequest {
            page: 1,
            size: 2,
            sort: vec![SortOrder {
                property: "name".into(),
                direction: Direction::Asc,
            }],
        };
        let page = repo.find_page(&request).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["charlie", "delta"]);
        assert_eq!(page.total_elements, 4);
    }

    #[tokio::test]
    async fn page_sorted_by_id_descending() {
        let repo = seeded(&["a", "b", "c"]).await;
        let request = PageRequest {
            sort: vec![SortOrder {
                property: "id".into(),
                direction: Direction::Desc,
            }],
            ..PageRequest::default()
        };
        let page = repo.find_page(&request).await.unwrap();
        let ids: Vec<_> = page.content.iter().map(|t| t.id.unwrap()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn nulls_sort_first() {
        assert_eq!(compare_json(&Value::Null, &Value::from(1)), Ordering::Less);
        assert_eq!(compare_json(&Value::from("b"), &Value::from("a")), Ordering::Greater);
    }
}

//! Detail view: follows a route-parameter channel and keeps the entity for the
//! current id loaded. Dropping the view releases the route subscription.

use crate::domain::Entity;
use crate::error::AppError;
use crate::service::CrudService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where the view fetches entities from.
#[async_trait]
pub trait EntitySource<E>: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<E>, AppError>;
}

#[async_trait]
impl<E: Entity> EntitySource<E> for CrudService<E> {
    async fn find(&self, id: i64) -> Result<Option<E>, AppError> {
        self.find_one(id).await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailState<E> {
    /// No id in the route.
    Idle,
    Loading(i64),
    Loaded(E),
    Missing(i64),
    Failed(String),
}

pub struct EntityDetail<E> {
    view: watch::Receiver<DetailState<E>>,
    task: JoinHandle<()>,
}

impl<E: Entity> EntityDetail<E> {
    /// Subscribe to `route` and load the entity for every id it carries, starting with the current one.
    pub fn attach(mut route: watch::Receiver<Option<i64>>, source: Arc<dyn EntitySource<E>>) -> Self {
        let (tx, view) = watch::channel(DetailState::Idle);
        let task = tokio::spawn(async move {
            loop {
                let current = *route.borrow_and_update();
                let next = match current {
                    None => DetailState::Idle,
                    Some(id) => {
                        tx.send_replace(DetailState::Loading(id));
                        match source.find(id).await {
                            Ok(Some(entity)) => DetailState::Loaded(entity),
                            Ok(None) => DetailState::Missing(id),
                            Err(e) => {
                                tracing::warn!(entity = E::DESCRIPTOR.entity_name, id, error = %e, "detail load failed");
                                DetailState::Failed(e.public_message())
                            }
                        }
                    }
                };
                tx.send_replace(next);
                if route.changed().await.is_err() {
                    break;
                }
            }
        });
        EntityDetail { view, task }
    }

    pub fn state(&self) -> DetailState<E> {
        self.view.borrow().clone()
    }

    /// Wait for the next state change. `false` once the view has stopped.
    pub async fn changed(&mut self) -> bool {
        self.view.changed().await.is_ok()
    }

    /// Wait until the state satisfies `f`, returning it. `None` if the view stops first.
    pub async fn wait_for<F>(&mut self, mut f: F) -> Option<DetailState<E>>
    where
        F: FnMut(&DetailState<E>) -> bool,
    {
        self.view.wait_for(|s| f(s)).await.ok().map(|s| s.clone())
    }

    pub fn is_attached(&self) -> bool {
        !self.task.is_finished()
    }
}

impl<E> Drop for EntityDetail<E> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

//! Entity CRUD routes. Each entity type gets its own router bound to its service.

use crate::domain::Entity;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::service::CrudService;
use axum::{routing::get, Router};

/// `/<segment>` (GET list, POST create, PUT update) and `/<segment>/:id` (GET, DELETE).
pub fn entity_routes<E: Entity>(service: CrudService<E>) -> Router {
    let segment = E::DESCRIPTOR.path_segment;
    Router::new()
        .route(
            &format!("/{}", segment),
            get(list::<E>).post(create::<E>).put(update::<E>),
        )
        .route(
            &format!("/{}/:id", segment),
            get(read::<E>).delete(delete_handler::<E>),
        )
        .with_state(service)
}

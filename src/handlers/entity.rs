//! Entity CRUD handlers, generic over the entity type: create, update, list, read, delete.

use crate::domain::Entity;
use crate::error::AppError;
use crate::pagination::{pagination_headers, PageRequest};
use crate::response::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use crate::service::{CrudService, RequestValidator};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

fn body_to_map(entity: &'static str, value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::validation(entity, "body must be a JSON object")),
    }
}

/// Body rejections go through `AppError` so they carry the failure alert headers.
fn json_body<E: Entity>(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(AppError::PayloadTooLarge),
        Err(rejection) => Err(AppError::validation(E::DESCRIPTOR.entity_name, rejection.body_text())),
    }
}

/// Validate the raw body, then deserialize it into the entity.
fn parse_body<E: Entity>(body: Value) -> Result<E, AppError> {
    let name = E::DESCRIPTOR.entity_name;
    let map = body_to_map(name, body)?;
    RequestValidator::validate(&map, &E::DESCRIPTOR)?;
    serde_json::from_value(Value::Object(map)).map_err(|e| AppError::validation(name, e.to_string()))
}

async fn create_entity<E: Entity>(service: &CrudService<E>, entity: E) -> Result<Response, AppError> {
    let name = E::DESCRIPTOR.entity_name;
    if entity.id().is_some() {
        return Err(AppError::id_exists(name));
    }
    let saved = service.save(entity).await?;
    let id = saved.id().ok_or(AppError::Db(sqlx::Error::RowNotFound))?;

    let mut headers: HeaderMap = entity_creation_alert(name, id);
    let location = format!("{}/{}", E::DESCRIPTOR.collection_path(), id);
    if let Ok(v) = HeaderValue::from_str(&location) {
        headers.insert(LOCATION, v);
    }
    Ok((StatusCode::CREATED, headers, Json(saved)).into_response())
}

pub async fn create<E: Entity>(
    State(service): State<CrudService<E>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let body = json_body::<E>(body)?;
    tracing::debug!(entity = E::DESCRIPTOR.entity_name, body = %body, "REST request to save");
    let entity = parse_body::<E>(body)?;
    create_entity(&service, entity).await
}

/// PUT without an identity behaves as create.
pub async fn update<E: Entity>(
    State(service): State<CrudService<E>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let body = json_body::<E>(body)?;
    tracing::debug!(entity = E::DESCRIPTOR.entity_name, body = %body, "REST request to update");
    let entity = parse_body::<E>(body)?;
    let Some(id) = entity.id() else {
        return create_entity(&service, entity).await;
    };
    let saved = service.save(entity).await?;
    let headers = entity_update_alert(E::DESCRIPTOR.entity_name, id);
    Ok((StatusCode::OK, headers, Json(saved)).into_response())
}

pub async fn list<E: Entity>(
    State(service): State<CrudService<E>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::DESCRIPTOR.entity_name, "REST request to get a page");
    let request = PageRequest::from_query(&params, &E::DESCRIPTOR)?;
    let page = service.find_all(&request).await?;
    let headers = pagination_headers(&page, &E::DESCRIPTOR.collection_path());
    Ok((StatusCode::OK, headers, Json(page.content)).into_response())
}

pub async fn read<E: Entity>(
    State(service): State<CrudService<E>>,
    Path(id): Path<i64>,
) -> Result<Json<E>, AppError> {
    tracing::debug!(entity = E::DESCRIPTOR.entity_name, id, "REST request to get");
    service.find_one(id).await?.map(Json).ok_or(AppError::NotFound {
        entity: E::DESCRIPTOR.entity_name,
        id,
    })
}

pub async fn delete<E: Entity>(
    State(service): State<CrudService<E>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::DESCRIPTOR.entity_name, id, "REST request to delete");
    service.delete(id).await?;
    Ok((StatusCode::OK, entity_deletion_alert(E::DESCRIPTOR.entity_name, id)).into_response())
}

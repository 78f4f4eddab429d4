//! Typed errors and HTTP mapping.

use crate::response::failure_alert;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Rejected request; carries the entity name and error key for the failure alert headers.
    #[error("{message}")]
    BadRequest {
        entity: &'static str,
        error_key: &'static str,
        message: String,
    },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn id_exists(entity: &'static str) -> Self {
        AppError::BadRequest {
            entity,
            error_key: "idexists",
            message: format!("A new {} cannot already have an ID", entity),
        }
    }

    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            entity,
            error_key: "validation",
            message: message.into(),
        }
    }

    /// Text safe to hand to a client. Database and configuration failures are not described.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Db(_) | AppError::Config(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::BadRequest { entity, error_key, message } => (
                StatusCode::BAD_REQUEST,
                *error_key,
                message.clone(),
                Some(serde_json::json!({ "entityName": entity })),
            ),
            AppError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                "not_found",
                self.to_string(),
                Some(serde_json::json!({ "entityName": entity })),
            ),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", self.to_string(), None),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", self.public_message(), None)
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", self.public_message(), None)
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        match &self {
            AppError::BadRequest { entity, message, .. } => {
                (status, failure_alert(entity, message), Json(body)).into_response()
            }
            _ => (status, Json(body)).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_to_response(err: AppError) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, headers, json)
    }

    #[tokio::test]
    async fn id_exists_maps_to_400_with_failure_alert() {
        let (status, headers, json) = error_to_response(AppError::id_exists("title")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "idexists");
        assert_eq!(json["error"]["message"], "A new title cannot already have an ID");
        assert_eq!(json["error"]["details"]["entityName"], "title");
        assert_eq!(
            headers.get("x-jobdetailsapp-error").unwrap(),
            "A new title cannot already have an ID"
        );
        assert_eq!(headers.get("x-jobdetailsapp-params").unwrap(), "title");
    }

    #[tokio::test]
    async fn not_found_maps_to_404_without_alert() {
        let (status, headers, json) = error_to_response(AppError::NotFound { entity: "title", id: 7 }).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "title 7 not found");
        assert!(headers.get("x-jobdetailsapp-error").is_none());
    }

    #[tokio::test]
    async fn database_error_is_sanitized() {
        let (status, _, json) = error_to_response(AppError::Db(sqlx::Error::PoolTimedOut)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "database_error");
        assert_eq!(json["error"]["message"], "internal server error");
    }

    #[test]
    fn public_message_hides_database_detail() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.public_message(), "internal server error");
        assert_eq!(AppError::validation("title", "name is required").public_message(), "name is required");
    }
}

//! jobdetails: REST backend for job titles and companies.

pub mod config;
pub mod detail;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod pagination;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::AppConfig;
pub use detail::{DetailState, EntityDetail, EntitySource};
pub use domain::{Company, Entity, Title};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use pagination::{Page, PageRequest};
pub use repository::{InMemoryRepository, PgRepository, Repository};
pub use routes::{api_routes, app_router, common_routes, entity_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, ensure_database_exists};

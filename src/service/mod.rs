//! CrudService: per-entity pass-through over a repository.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;

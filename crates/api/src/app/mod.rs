//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services/`: use-case layer over the employee and company repositories
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs` / `mapper.rs`: JSON shapes and their conversion to domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod mapper;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an already-wired service set.
pub fn build_router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_logging)))
}

/// Build the router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(
    config: &workforce_infra::AppConfig,
) -> Result<Router, workforce_infra::RepoError> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(build_router(services))
}

pub use services::AppServices;

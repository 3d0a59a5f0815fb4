use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use workforce_core::CompanyId;

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::common::{extract_json, extract_query, parse_id};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/:id/employees", get(list_company_employees))
}

pub async fn list_companies(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::CompanyListQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match extract_query(query) {
        Ok(q) => q,
        Err(res) => return res,
    };

    let result = match query.page() {
        Ok(Some((number, size))) => services.companies.find_by_page(number, size).await,
        Ok(None) => services.companies.find_all().await,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match result {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CompanyId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.companies.find_by_id(id).await {
        Ok(company) => (StatusCode::OK, Json(company)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_company_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CompanyId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.companies.find_employees_by_company_id(id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_company(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CompanyRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match extract_json(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    match services.companies.create(body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::CompanyUpdateRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: CompanyId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match extract_json(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    match services.companies.update(id, body).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CompanyId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.companies.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

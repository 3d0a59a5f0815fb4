use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use workforce_core::EmployeeId;

use crate::app::dto;
use crate::app::errors;
use crate::app::routes::common::{extract_json, extract_query, parse_id};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::EmployeeListQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match extract_query(query) {
        Ok(q) => q,
        Err(res) => return res,
    };

    let page = match query.page() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let employees = &services.employees;
    let result = match (query.gender.as_deref(), page) {
        (Some(gender), Some((number, size))) => {
            employees.find_by_gender_page(gender, number, size).await
        }
        (Some(gender), None) => employees.find_all_by_gender(gender).await,
        (None, Some((number, size))) => employees.find_by_page(number, size).await,
        (None, None) => employees.find_all().await,
    };

    match result {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EmployeeId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.employees.find_by_id(id).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::EmployeeRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match extract_json(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    match services.employees.create(body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::EmployeeUpdateRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: EmployeeId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let body = match extract_json(body) {
        Ok(b) => b,
        Err(res) => return res,
    };

    match services.employees.update(id, body).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EmployeeId = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.employees.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

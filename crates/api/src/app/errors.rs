use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use workforce_core::DomainError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Repository(e) => {
            tracing::error!(error = %e, "repository operation failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        service_error_to_response(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_infra::RepoError;

    #[test]
    fn not_found_maps_to_404() {
        let res = service_error_to_response(DomainError::not_found("employee", 7).into());
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let res = service_error_to_response(DomainError::validation("pageSize must be >= 1").into());
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let res = service_error_to_response(RepoError::Unavailable("pool closed".to_string()).into());
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

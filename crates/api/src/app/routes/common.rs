use core::str::FromStr;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;

use workforce_core::DomainError;

use crate::app::errors;

/// Parse a numeric path id, answering 400 when it is not one.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}

/// Unwrap a JSON body, turning extractor rejections into the error envelope.
pub fn extract_json<T>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, axum::response::Response> {
    result
        .map(|Json(v)| v)
        .map_err(|err| errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", err.body_text()))
}

/// Unwrap a query string, turning extractor rejections into the error envelope.
pub fn extract_query<T>(
    result: Result<Query<T>, QueryRejection>,
) -> Result<T, axum::response::Response> {
    result
        .map(|Query(v)| v)
        .map_err(|err| errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", err.body_text()))
}

use crate::transport::http::error::ApiError;
use crate::transport::http::types::{ApiResponse, WELCOME_MESSAGE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = ApiResponse)
    )
)]
pub async fn welcome_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success().with_message(WELCOME_MESSAGE)),
    )
}

#[utoipa::path(
    get,
    path = "/favicon.ico",
    responses(
        (status = 204, description = "No favicon; empty body")
    )
)]
pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn route_not_found_handler() -> ApiError {
    ApiError::RouteNotFound
}

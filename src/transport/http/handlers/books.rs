use crate::domain::{parse_payload, validate, BookFilter, PayloadMode, ValidationError};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{ApiResponse, AppState, BookPayload, ListBooksQuery};
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Books matching the filters, as {id, name, publisher}", body = ApiResponse)
    )
)]
pub async fn list_books_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(pairs)) => ListBooksQuery::from_pairs(pairs),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparseable query string");
            ListBooksQuery::default()
        }
    };
    let filter = BookFilter::from_query(
        query.name.as_deref(),
        query.reading.as_deref(),
        query.finished.as_deref(),
    );

    let catalog = state.catalog.lock().await;
    let books = catalog.list(&filter);
    drop(catalog);

    (
        StatusCode::OK,
        Json(ApiResponse::success().with_data(json!({ "books": books }))),
    )
}

#[utoipa::path(
    post,
    path = "/books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added; data.bookId holds the new id", body = ApiResponse),
        (status = 400, description = "Empty, malformed or invalid payload", body = ApiResponse),
        (status = 500, description = "Catalog could not be saved", body = ApiResponse)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mode = PayloadMode::Create;
    let body = body.map_err(|e| ApiError::body_rejected(mode, e))?;
    let payload = parse_payload(&body).map_err(|e| ApiError::invalid(mode, e))?;
    let fields = validate(&payload, mode).map_err(|e| ApiError::invalid(mode, e))?;

    let mut catalog = state.catalog.lock().await;
    let book = catalog
        .insert(fields)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Book not found", mode.failure_prefix()))?;
    drop(catalog);

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success()
                .with_message("Book added successfully")
                .with_data(json!({ "bookId": book.id })),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The full book record under data.book", body = ApiResponse),
        (status = 404, description = "No book with this id", body = ApiResponse)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(ApiError::path_rejected)?;
    let catalog = state.catalog.lock().await;
    let book = catalog
        .get(&id)
        .cloned()
        .ok_or(ApiError::BookNotFound("Book not found"))?;
    drop(catalog);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success().with_data(json!({ "book": book }))),
    ))
}

#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse),
        (status = 400, description = "Empty, malformed or invalid payload", body = ApiResponse),
        (status = 404, description = "No book with this id", body = ApiResponse),
        (status = 500, description = "Catalog could not be saved", body = ApiResponse)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const NOT_FOUND: &str = "Failed to update book. Id not found";
    let mode = PayloadMode::Update;
    let Path(id) = id.map_err(ApiError::path_rejected)?;
    let body = body.map_err(|e| ApiError::body_rejected(mode, e))?;

    // An empty body is reported before the id is looked up.
    if body.is_empty() {
        return Err(ApiError::invalid(mode, ValidationError::EmptyBody));
    }

    let mut catalog = state.catalog.lock().await;
    if !catalog.contains(&id) {
        return Err(ApiError::BookNotFound(NOT_FOUND));
    }
    let payload = parse_payload(&body).map_err(|e| ApiError::invalid(mode, e))?;
    let fields = validate(&payload, mode).map_err(|e| ApiError::invalid(mode, e))?;
    catalog
        .update(&id, fields)
        .await
        .map_err(|e| ApiError::from_catalog(e, NOT_FOUND, mode.failure_prefix()))?;
    drop(catalog);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success().with_message("Book updated successfully")),
    ))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = ApiResponse),
        (status = 404, description = "No book with this id", body = ApiResponse),
        (status = 500, description = "Catalog could not be saved", body = ApiResponse)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(ApiError::path_rejected)?;
    let mut catalog = state.catalog.lock().await;
    catalog.delete(&id).await.map_err(|e| {
        ApiError::from_catalog(
            e,
            "Failed to delete book. Id not found",
            "Failed to delete book.",
        )
    })?;
    drop(catalog);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success().with_message("Book deleted successfully")),
    ))
}

/// Any method other than the ones routed on a `/books` path.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}

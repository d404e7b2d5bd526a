//! Failure responses for the HTTP layer.

use crate::app::CatalogError;
use crate::domain::{PayloadMode, ValidationError};
use crate::storage::StorageError;
use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{} {error}", .mode.failure_prefix())]
    Invalid {
        mode: PayloadMode,
        error: ValidationError,
    },
    #[error("{0}")]
    BookNotFound(&'static str),
    #[error("{context} Could not save the catalog")]
    Persistence {
        context: &'static str,
        #[source]
        source: StorageError,
    },
    /// A request the extractors refused before it reached the catalog
    /// (undecodable path, oversized body).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Not Found")]
    RouteNotFound,
}

impl ApiError {
    pub fn invalid(mode: PayloadMode, error: ValidationError) -> Self {
        ApiError::Invalid { mode, error }
    }

    pub fn path_rejected(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }

    pub fn body_rejected(mode: PayloadMode, rejection: BytesRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: format!("{} {}", mode.failure_prefix(), rejection.body_text()),
        }
    }

    /// Maps a repository failure, using `not_found` as the 404 message and
    /// `context` as the leading sentence of a persistence failure.
    pub fn from_catalog(err: CatalogError, not_found: &'static str, context: &'static str) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::BookNotFound(not_found),
            CatalogError::Persistence(source) => ApiError::Persistence { context, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Invalid { .. } => StatusCode::BAD_REQUEST,
            ApiError::BookNotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Persistence { source, .. } => {
                tracing::error!(error = %source, "request failed while saving catalog")
            }
            ApiError::Invalid { error, .. } => tracing::debug!(%error, "rejected payload"),
            _ => {}
        }
        (status, Json(ApiResponse::fail(self.to_string()))).into_response()
    }
}

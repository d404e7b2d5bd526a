use crate::app::BookCatalog;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Mutex<BookCatalog>>,
}

impl AppState {
    pub fn new(catalog: BookCatalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

/// Envelope wrapping every JSON response body.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
}

impl ApiResponse {
    pub fn success() -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }
}

/// Filters for `GET /books`. Unknown parameters are ignored.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Case-insensitive substring of the book name.
    pub name: Option<String>,
    /// `1` for books being read, `0` for the rest.
    pub reading: Option<String>,
    /// `1` for finished books, `0` for the rest.
    pub finished: Option<String>,
}

impl ListBooksQuery {
    /// Keeps the first value of each known parameter; repeats and unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Body accepted by `POST /books` and `PUT /books/{id}`.
///
/// Documentation only: handlers validate the raw JSON object field by field.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct BookPayload {
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u64,
    pub read_page: u64,
    pub reading: bool,
}

pub const WELCOME_MESSAGE: &str = "Welcome to Bookshelf API! Use /books to access the API.";

//! Catalog persistence.

pub mod json_file;
#[cfg(test)]
pub mod memory;

pub use json_file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;

use crate::domain::book::{self, Book};
use async_trait::async_trait;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Loads and saves the whole catalog as one document.
///
/// `load` never fails: a missing or unreadable document degrades to the
/// configured fallback catalog. `save` replaces the document wholesale.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn load(&self) -> Vec<Book>;

    async fn save(&self, books: &[Book]) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize catalog")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write catalog to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog store is unavailable: {0}")]
    Unavailable(String),
}

/// What a store starts with when there is no usable document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackCatalog {
    /// No records.
    Empty,
    /// A single "Sample Book" record. Also replaces a document holding an empty array.
    #[default]
    Sample,
}

impl FallbackCatalog {
    pub fn books(self) -> Vec<Book> {
        match self {
            FallbackCatalog::Empty => Vec::new(),
            FallbackCatalog::Sample => vec![Book::sample(book::now())],
        }
    }

    /// Whether a successfully parsed document should still be replaced.
    pub fn replaces(self, books: &[Book]) -> bool {
        self == FallbackCatalog::Sample && books.is_empty()
    }
}

impl FromStr for FallbackCatalog {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(FallbackCatalog::Empty),
            "sample" => Ok(FallbackCatalog::Sample),
            other => Err(format!("expected `empty` or `sample`, got `{}`", other)),
        }
    }
}

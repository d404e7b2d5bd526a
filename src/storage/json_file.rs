//! Catalog stored as a pretty-printed JSON array on disk.

use crate::domain::book::Book;
use crate::storage::{CatalogStore, FallbackCatalog, StorageError};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    path: PathBuf,
    fallback: FallbackCatalog,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, fallback: FallbackCatalog) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the catalog is written to before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("catalog"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_document(&self) -> Option<Vec<Book>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "catalog file not found");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "catalog file unreadable");
                return None;
            }
        };
        match serde_json::from_slice::<Vec<Book>>(&bytes) {
            Ok(books) => Some(books),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "catalog file is malformed");
                None
            }
        }
    }
}

#[async_trait]
impl CatalogStore for JsonFileStore {
    async fn load(&self) -> Vec<Book> {
        if let Some(books) = self.read_document().await {
            if !self.fallback.replaces(&books) {
                tracing::info!(path = %self.path.display(), books = books.len(), "catalog loaded");
                return books;
            }
        }

        let books = self.fallback.books();
        tracing::info!(fallback = ?self.fallback, "starting from fallback catalog");
        if let Err(e) = self.save(&books).await {
            tracing::warn!(error = %e, "could not persist fallback catalog");
        }
        books
    }

    async fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        let document =
            serde_json::to_vec_pretty(books).map_err(|source| StorageError::Serialize { source })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let staging = self.staging_path();
        tokio::fs::write(&staging, &document)
            .await
            .map_err(|source| StorageError::Write {
                path: staging.clone(),
                source,
            })?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), books = books.len(), "catalog saved");
        Ok(())
    }
}

//! The book catalog repository.
//!
//! Owns the ordered, in-memory list of books and mirrors every mutation to
//! its [`CatalogStore`] by rewriting the whole catalog. If the rewrite fails
//! the in-memory change is undone, so memory never runs ahead of disk.

use crate::domain::book::{self, Book, BookFields, BookFilter, BookSummary};
use crate::domain::id::generate_unique_id;
use crate::storage::{CatalogStore, StorageError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("book `{0}` not found")]
    NotFound(String),
    #[error("failed to persist catalog: {0}")]
    Persistence(#[from] StorageError),
}

pub struct BookCatalog {
    books: Vec<Book>,
    store: Arc<dyn CatalogStore>,
}

impl BookCatalog {
    /// Loads the catalog from `store`.
    pub async fn open(store: Arc<dyn CatalogStore>) -> Self {
        let books = store.load().await;
        Self { books, store }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Projections of the books matching `filter`, in catalog order.
    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .iter()
            .filter(|b| filter.matches(b))
            .map(Book::projection)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub async fn insert(&mut self, fields: BookFields) -> Result<Book, CatalogError> {
        let id = generate_unique_id(|candidate| self.contains(candidate));
        let book = Book::new(id, fields, book::now());
        self.books.push(book.clone());

        if let Err(e) = self.persist().await {
            self.books.pop();
            return Err(e);
        }
        tracing::info!(id = %book.id, name = %book.name, "book added");
        Ok(book)
    }

    pub async fn update(&mut self, id: &str, fields: BookFields) -> Result<Book, CatalogError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let previous = self.books[idx].clone();
        self.books[idx].apply(fields, book::now());

        if let Err(e) = self.persist().await {
            self.books[idx] = previous;
            return Err(e);
        }
        tracing::info!(id = %id, "book updated");
        Ok(self.books[idx].clone())
    }

    pub async fn delete(&mut self, id: &str) -> Result<Book, CatalogError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let removed = self.books.remove(idx);

        if let Err(e) = self.persist().await {
            self.books.insert(idx, removed);
            return Err(e);
        }
        tracing::info!(id = %id, "book deleted");
        Ok(removed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    async fn persist(&self) -> Result<(), CatalogError> {
        self.store.save(&self.books).await.map_err(|e| {
            tracing::error!(error = %e, "catalog save failed");
            CatalogError::from(e)
        })
    }
}

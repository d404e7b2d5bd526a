//! In-memory store for unit tests, with save counting and failure injection.

use crate::domain::book::Book;
use crate::storage::{CatalogStore, StorageError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Makes every following `save` fail until switched off again.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Book> {
        self.books.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn load(&self) -> Vec<Book> {
        self.snapshot()
    }

    async fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("saves disabled".to_string()));
        }
        let mut guard = self
            .books
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".to_string()))?;
        *guard = books.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

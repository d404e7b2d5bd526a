pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{BookCatalog, CatalogError};
pub use domain::{Book, BookFields, BookFilter, BookSummary};
pub use infra::config::Settings;
pub use storage::{CatalogStore, FallbackCatalog, JsonFileStore};

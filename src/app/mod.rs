pub mod catalog;

pub use catalog::{BookCatalog, CatalogError};

//! Domain types for the book catalog: records, payload validation and ids.

pub mod book;
pub mod id;
pub mod validate;

pub use book::{Book, BookFields, BookFilter, BookSummary};
pub use validate::{parse_payload, validate, PayloadMode, ValidationError};

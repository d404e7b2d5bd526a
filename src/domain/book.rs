//! The book record and its projections.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored catalog entry.
///
/// Serialized with the camelCase field names used both on the wire and in the
/// persisted catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u64,
    pub read_page: u64,
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub inserted_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a new record from validated fields, stamping both timestamps with `now`.
    pub fn new(id: String, fields: BookFields, now: DateTime<Utc>) -> Self {
        let finished = fields.is_finished();
        Self {
            id,
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            finished,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field. `id` and `insertedAt` are kept.
    pub fn apply(&mut self, fields: BookFields, now: DateTime<Utc>) {
        self.finished = fields.is_finished();
        self.name = fields.name;
        self.year = fields.year;
        self.author = fields.author;
        self.summary = fields.summary;
        self.publisher = fields.publisher;
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.reading = fields.reading;
        // Clocks can step backwards; updatedAt must not.
        self.updated_at = now.max(self.updated_at);
    }

    /// The seeded record used when the catalog file is missing or corrupt.
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self::new(
            "1".to_string(),
            BookFields {
                name: "Sample Book".to_string(),
                year: 2023,
                author: "Sample Author".to_string(),
                summary: "A sample book summary.".to_string(),
                publisher: "Sample Publisher".to_string(),
                page_count: 200,
                read_page: 0,
                reading: false,
            },
            now,
        )
    }

    pub fn projection(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Validated, normalized client input for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u64,
    pub read_page: u64,
    pub reading: bool,
}

impl BookFields {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// List projection. Full records are only exposed one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

/// Filters accepted by the list operation. `None` means "don't filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub name_contains: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    /// Builds a filter from raw query values.
    ///
    /// An empty `name` does not filter; `reading`/`finished` only filter on
    /// `"1"` and `"0"`, any other value is ignored.
    pub fn from_query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> Self {
        Self {
            name_contains: name.filter(|n| !n.is_empty()).map(str::to_string),
            reading: reading.and_then(parse_flag),
            finished: finished.and_then(parse_flag),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        if let Some(needle) = self.name_contains.as_deref() {
            if !book.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if self.reading.is_some_and(|r| r != book.reading) {
            return false;
        }
        if self.finished.is_some_and(|f| f != book.finished) {
            return false;
        }
        true
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Current time at millisecond precision, so timestamps survive a round-trip
/// through the catalog file unchanged.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 with millisecond precision and a `Z` suffix (`2024-05-01T10:00:00.000Z`).
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

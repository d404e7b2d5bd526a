//! Create/update payload validation.
//!
//! Payloads arrive as an untyped JSON object. Each rule is checked in a fixed
//! order and the first violation wins; only a payload that passes every rule
//! is turned into [`BookFields`].

use crate::domain::book::BookFields;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Fields every create/update payload must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "year",
    "author",
    "summary",
    "publisher",
    "pageCount",
    "readPage",
    "reading",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    Create,
    Update,
}

impl PayloadMode {
    /// Leading sentence of every failure message for this operation.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            PayloadMode::Create => "Failed to add book.",
            PayloadMode::Update => "Failed to update book.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must not be empty")]
    EmptyBody,
    #[error("Invalid JSON format: {0}")]
    MalformedBody(String),
    #[error("Property \"id\" is not allowed, it is generated by the server")]
    ClientSuppliedId,
    #[error("The following properties must not be empty: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Please provide the book name")]
    InvalidName,
    #[error("year must be an integer")]
    InvalidYear,
    #[error("author must be a non-empty string")]
    InvalidAuthor,
    #[error("summary must be a string")]
    InvalidSummary,
    #[error("publisher must be a string")]
    InvalidPublisher,
    #[error("pageCount must be a non-negative integer")]
    InvalidPageCount,
    #[error("readPage must be a non-negative integer")]
    InvalidReadPage,
    #[error("reading must be a boolean")]
    InvalidReading,
    #[error("readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount,
}

/// Parses a raw request body into a JSON object.
///
/// An empty body is reported separately from one that fails to parse.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, JsonValue>, ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::EmptyBody);
    }
    let text = std::str::from_utf8(body)
        .map_err(|e| ValidationError::MalformedBody(format!("body is not valid UTF-8 ({})", e)))?;
    match serde_json::from_str::<JsonValue>(text) {
        Ok(JsonValue::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::MalformedBody(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(ValidationError::MalformedBody(e.to_string())),
    }
}

/// Checks a payload against the book rules and returns the normalized fields.
///
/// In update mode an `id` property is ignored; the id always comes from the path.
pub fn validate(
    payload: &Map<String, JsonValue>,
    mode: PayloadMode,
) -> Result<BookFields, ValidationError> {
    if mode == PayloadMode::Create && payload.contains_key("id") {
        return Err(ValidationError::ClientSuppliedId);
    }

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !payload.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let name = non_blank_string(&payload["name"]).ok_or(ValidationError::InvalidName)?;
    let year = as_integer(&payload["year"]).ok_or(ValidationError::InvalidYear)?;
    let author = non_blank_string(&payload["author"]).ok_or(ValidationError::InvalidAuthor)?;
    let summary = payload["summary"]
        .as_str()
        .ok_or(ValidationError::InvalidSummary)?;
    let publisher = payload["publisher"]
        .as_str()
        .ok_or(ValidationError::InvalidPublisher)?;
    let page_count =
        as_non_negative_integer(&payload["pageCount"]).ok_or(ValidationError::InvalidPageCount)?;
    let read_page =
        as_non_negative_integer(&payload["readPage"]).ok_or(ValidationError::InvalidReadPage)?;
    let reading = payload["reading"]
        .as_bool()
        .ok_or(ValidationError::InvalidReading)?;

    if read_page > page_count {
        return Err(ValidationError::ReadPageExceedsPageCount);
    }

    Ok(BookFields {
        name,
        year,
        author,
        summary: summary.to_string(),
        publisher: publisher.to_string(),
        page_count,
        read_page,
        reading,
    })
}

fn non_blank_string(v: &JsonValue) -> Option<String> {
    let trimmed = v.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Integral JSON numbers, including float literals without a fractional part (`2020.0`).
/// Values outside `i64` are rejected.
fn as_integer(v: &JsonValue) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}

/// Like [`as_integer`], bounded to `u64`.
fn as_non_negative_integer(v: &JsonValue) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    (f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: JsonValue) -> Map<String, JsonValue> {
        match v {
            JsonValue::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn valid() -> JsonValue {
        json!({
            "name": "  A  ",
            "year": 2020,
            "author": " X ",
            "summary": "",
            "publisher": "",
            "pageCount": 100,
            "readPage": 25,
            "reading": true
        })
    }

    fn with(key: &str, value: JsonValue) -> Map<String, JsonValue> {
        let mut p = payload(valid());
        p.insert(key.to_string(), value);
        p
    }

    #[test]
    fn accepts_and_normalizes_valid_payload() {
        let fields = validate(&payload(valid()), PayloadMode::Create).unwrap();
        assert_eq!(fields.name, "A");
        assert_eq!(fields.author, "X");
        assert_eq!(fields.summary, "");
        assert_eq!(fields.page_count, 100);
        assert_eq!(fields.read_page, 25);
        assert!(!fields.is_finished());
    }

    #[test]
    fn empty_body_is_distinct_from_malformed() {
        assert_eq!(parse_payload(b""), Err(ValidationError::EmptyBody));
        assert!(matches!(
            parse_payload(b"{not json"),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_payload(b"[1, 2]"),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_payload(&[0xff, 0xfe]),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn create_rejects_client_id_before_anything_else() {
        let p = payload(json!({ "id": "x" }));
        assert_eq!(
            validate(&p, PayloadMode::Create),
            Err(ValidationError::ClientSuppliedId)
        );
    }

    #[test]
    fn update_ignores_id_property() {
        let p = with("id", json!("whatever"));
        assert!(validate(&p, PayloadMode::Update).is_ok());
    }

    #[test]
    fn lists_every_missing_field_in_order() {
        let p = payload(json!({ "name": "A", "summary": "s" }));
        let err = validate(&p, PayloadMode::Create).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                "year",
                "author",
                "publisher",
                "pageCount",
                "readPage",
                "reading"
            ])
        );
        assert_eq!(
            err.to_string(),
            "The following properties must not be empty: year, author, publisher, pageCount, readPage, reading"
        );
    }

    #[test]
    fn null_counts_as_present_but_invalid() {
        assert_eq!(
            validate(&with("year", JsonValue::Null), PayloadMode::Create),
            Err(ValidationError::InvalidYear)
        );
    }

    #[test]
    fn per_field_rules() {
        let cases = [
            ("name", json!("   "), ValidationError::InvalidName),
            ("name", json!(5), ValidationError::InvalidName),
            ("year", json!(2020.5), ValidationError::InvalidYear),
            ("year", json!("2020"), ValidationError::InvalidYear),
            ("author", json!(""), ValidationError::InvalidAuthor),
            ("summary", json!(1), ValidationError::InvalidSummary),
            ("publisher", json!(false), ValidationError::InvalidPublisher),
            ("pageCount", json!(-1), ValidationError::InvalidPageCount),
            ("pageCount", json!(1.5), ValidationError::InvalidPageCount),
            ("readPage", json!(-3), ValidationError::InvalidReadPage),
            ("reading", json!("true"), ValidationError::InvalidReading),
        ];
        for (key, value, expected) in cases {
            assert_eq!(
                validate(&with(key, value.clone()), PayloadMode::Create),
                Err(expected),
                "{key} = {value}"
            );
        }
    }

    #[test]
    fn integral_floats_are_integers() {
        let fields = validate(&with("year", json!(2020.0)), PayloadMode::Create).unwrap();
        assert_eq!(fields.year, 2020);
    }

    #[test]
    fn integers_beyond_the_stored_range_are_rejected() {
        assert_eq!(
            validate(&with("year", json!(1e20)), PayloadMode::Create),
            Err(ValidationError::InvalidYear)
        );
        assert_eq!(
            validate(&with("pageCount", json!(1e20)), PayloadMode::Create),
            Err(ValidationError::InvalidPageCount)
        );
    }

    #[test]
    fn first_failing_rule_wins() {
        let mut p = with("name", json!(""));
        p.insert("readPage".into(), json!(500));
        assert_eq!(
            validate(&p, PayloadMode::Update),
            Err(ValidationError::InvalidName)
        );
    }

    #[test]
    fn read_page_cannot_exceed_page_count() {
        let p = with("readPage", json!(101));
        assert_eq!(
            validate(&p, PayloadMode::Update),
            Err(ValidationError::ReadPageExceedsPageCount)
        );
    }

    #[test]
    fn failure_prefix_depends_on_mode() {
        assert_eq!(PayloadMode::Create.failure_prefix(), "Failed to add book.");
        assert_eq!(PayloadMode::Update.failure_prefix(), "Failed to update book.");
    }
}

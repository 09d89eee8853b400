//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle both the
//! RFC 3339 timestamps written by repos and `SQLite`'s `datetime('now')`
//! column defaults.

use chrono::{DateTime, SecondsFormat, Utc};

use campus_core::views::{AuthorSummary, SellerSummary};

use crate::error::DatabaseError;

/// Format a timestamp for storage. Fixed-width so TEXT ordering is
/// chronological.
#[must_use]
pub fn fmt_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time truncated to the stored precision, so a value returned from
/// a create call equals the one read back later.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    parse_datetime(&fmt_datetime(now)).unwrap_or(now)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all campus-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse a JSON text array column (`images`, `files`, `attachments`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column holds something other than a
/// JSON array of strings.
pub fn parse_string_list(s: &str) -> Result<Vec<String>, DatabaseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid JSON list in column: {e}")))
}

/// Serialize a string list for a JSON text column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_list(items: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(items).map_err(|e| DatabaseError::Other(e.into()))
}

/// Read an author joined from `profiles` at `idx` (id, full name, avatar).
/// A missing profile row gives `None`.
///
/// # Errors
///
/// Returns `DatabaseError` if a column read fails.
pub fn author_at(row: &libsql::Row, idx: i32) -> Result<Option<AuthorSummary>, DatabaseError> {
    let Some(id) = get_opt_string(row, idx)? else {
        return Ok(None);
    };
    Ok(Some(AuthorSummary {
        id,
        full_name: row.get::<Option<String>>(idx + 1)?.unwrap_or_default(),
        avatar_url: get_opt_string(row, idx + 2)?,
    }))
}

/// Read a seller joined from `profiles` at `idx` (id, full name, avatar, phone).
///
/// # Errors
///
/// Returns `DatabaseError` if a column read fails.
pub fn seller_at(row: &libsql::Row, idx: i32) -> Result<Option<SellerSummary>, DatabaseError> {
    let Some(author) = author_at(row, idx)? else {
        return Ok(None);
    };
    Ok(Some(SellerSummary {
        id: author.id,
        full_name: author.full_name,
        avatar_url: author.avatar_url,
        phone: row.get::<Option<String>>(idx + 3)?.unwrap_or_default(),
    }))
}

/// Build `?{start}, ?{start+1}, ...` for an `IN (...)` list of `count` items.
#[must_use]
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_formats() {
        let a = parse_datetime("2026-02-09T14:30:00.000000Z").unwrap();
        let b = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn stored_timestamps_sort_chronologically() {
        let early = parse_datetime("2026-02-09T14:30:00Z").unwrap();
        let late = parse_datetime("2026-02-09T14:30:00.5Z").unwrap();
        assert!(fmt_datetime(early) < fmt_datetime(late));
        assert_eq!(fmt_datetime(early), "2026-02-09T14:30:00.000000Z");
    }

    #[test]
    fn now_round_trips_through_storage() {
        let now = now();
        assert_eq!(parse_datetime(&fmt_datetime(now)).unwrap(), now);
    }

    #[test]
    fn string_lists() {
        assert!(parse_string_list("").unwrap().is_empty());
        assert_eq!(parse_string_list(r#"["a","b"]"#).unwrap(), vec!["a", "b"]);
        assert!(parse_string_list("{}").is_err());
        assert_eq!(to_json_list(&["x".into()]).unwrap(), r#"["x"]"#);
    }

    #[test]
    fn placeholder_lists() {
        assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
        assert_eq!(placeholders(4, 1), "?4");
        assert_eq!(placeholders(1, 0), "");
    }
}

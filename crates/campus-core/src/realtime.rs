//! Change events and channel filters for realtime subscriptions.
//!
//! Every committed insert, update, or row removal publishes one
//! [`ChangeEvent`]. A subscriber describes what it wants with a
//! [`ChangeFilter`]: a table, an optional event kind, and an optional
//! `column=eq.value` predicate written in the same string form hosted table
//! APIs use. The server may narrow a filter further with a [`Scope`] so a
//! caller only sees rows it is a party to.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Table;
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed row change. `record` is the row after the change, or the
/// removed row for [`ChangeKind::Delete`], in the same JSON shape as its
/// entity struct.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
    pub id: String,
    pub record: serde_json::Value,
    pub committed_at: DateTime<Utc>,
}

impl ChangeEvent {
    /// Build an event from any serializable row.
    pub fn new<T: Serialize>(
        table: Table,
        kind: ChangeKind,
        id: impl Into<String>,
        record: &T,
    ) -> Result<Self, CoreError> {
        let record = serde_json::to_value(record)
            .map_err(|e| CoreError::Other(anyhow::anyhow!("serialize change record: {e}")))?;
        Ok(Self {
            table,
            kind,
            id: id.into(),
            record,
            committed_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// ChangeFilter
// ---------------------------------------------------------------------------

/// `column=eq.value` predicate on the changed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnEq {
    pub column: String,
    pub value: String,
}

impl ColumnEq {
    /// Parse `column=eq.value`. The value may be percent-encoded.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let invalid =
            || CoreError::Validation(format!("filter must look like column=eq.value: {input}"));

        let (column, rest) = input.trim().split_once('=').ok_or_else(invalid)?;
        let raw_value = rest.strip_prefix("eq.").ok_or_else(invalid)?;
        let column = column.trim();
        if column.is_empty()
            || !column
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(invalid());
        }
        let value = urlencoding::decode(raw_value)
            .map_err(|_| invalid())?
            .into_owned();

        Ok(Self {
            column: column.to_string(),
            value,
        })
    }

    /// Compare against the textual form of `record[column]`.
    #[must_use]
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        match record.get(&self.column) {
            Some(serde_json::Value::String(s)) => *s == self.value,
            Some(serde_json::Value::Null) => self.value == "null",
            Some(other @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
                other.to_string() == self.value
            }
            _ => false,
        }
    }
}

impl fmt::Display for ColumnEq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=eq.{}", self.column, self.value)
    }
}

/// Restricts a subscription to records where at least one of `columns`
/// holds `value`. Set by the server, never parsed from client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scope {
    pub columns: Vec<String>,
    pub value: String,
}

impl Scope {
    #[must_use]
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        self.columns.iter().any(|column| {
            record
                .get(column)
                .and_then(serde_json::Value::as_str)
                .is_some_and(|v| v == self.value)
        })
    }
}

/// What a subscription wants to receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChangeFilter {
    pub table: Table,
    /// `None` means every event kind (`*`).
    pub kind: Option<ChangeKind>,
    pub predicate: Option<ColumnEq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl ChangeFilter {
    #[must_use]
    pub const fn table(table: Table) -> Self {
        Self {
            table,
            kind: None,
            predicate: None,
            scope: None,
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: ChangeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn column_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicate = Some(ColumnEq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Only deliver records where one of `columns` equals `value`.
    #[must_use]
    pub fn scoped_to<I, S>(mut self, columns: I, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = Some(Scope {
            columns: columns.into_iter().map(Into::into).collect(),
            value: value.into(),
        });
        self
    }

    /// Build a filter from query-string parts: table name, event
    /// (`insert`, `update`, `delete`, or `*`), and an optional
    /// `column=eq.value`.
    pub fn parse(table: &str, event: Option<&str>, filter: Option<&str>) -> Result<Self, CoreError> {
        let table = Table::from_name(table)
            .ok_or_else(|| CoreError::Validation(format!("unknown table: {table}")))?;

        let kind = match event.map(str::trim) {
            None | Some("" | "*") => None,
            Some(e) if e.eq_ignore_ascii_case("insert") => Some(ChangeKind::Insert),
            Some(e) if e.eq_ignore_ascii_case("update") => Some(ChangeKind::Update),
            Some(e) if e.eq_ignore_ascii_case("delete") => Some(ChangeKind::Delete),
            Some(other) => {
                return Err(CoreError::Validation(format!("unknown event: {other}")));
            }
        };

        let predicate = match filter.map(str::trim) {
            None | Some("") => None,
            Some(f) => Some(ColumnEq::parse(f)?),
        };

        Ok(Self {
            table,
            kind,
            predicate,
            scope: None,
        })
    }

    #[must_use]
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        event.table == self.table
            && self.kind.is_none_or(|k| k == event.kind)
            && self
                .predicate
                .as_ref()
                .is_none_or(|p| p.matches(&event.record))
            && self
                .scope
                .as_ref()
                .is_none_or(|s| s.matches(&event.record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn message_event(group_id: &str) -> ChangeEvent {
        ChangeEvent {
            table: Table::Messages,
            kind: ChangeKind::Insert,
            id: "msg-00000001".into(),
            record: json!({ "id": "msg-00000001", "group_id": group_id, "content": "hi" }),
            committed_at: Utc::now(),
        }
    }

    #[test]
    fn parse_full_filter() {
        let filter =
            ChangeFilter::parse("messages", Some("INSERT"), Some("group_id=eq.grp-12345678"))
                .unwrap();
        assert_eq!(
            filter,
            ChangeFilter::table(Table::Messages)
                .kind(ChangeKind::Insert)
                .column_eq("group_id", "grp-12345678")
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("*"))]
    #[case(Some(""))]
    fn wildcard_event(#[case] event: Option<&str>) {
        let filter = ChangeFilter::parse("posts", event, None).unwrap();
        assert_eq!(filter.kind, None);
    }

    #[rstest]
    #[case("group_id")]
    #[case("group_id=grp-1")]
    #[case("=eq.grp-1")]
    #[case("group id=eq.grp-1")]
    #[case("group_id=neq.grp-1")]
    fn bad_predicates(#[case] input: &str) {
        assert!(ColumnEq::parse(input).is_err(), "{input} should not parse");
    }

    #[test]
    fn predicate_value_is_percent_decoded() {
        let eq = ColumnEq::parse("location=eq.Main%20Library").unwrap();
        assert_eq!(eq.value, "Main Library");
        assert_eq!(eq.to_string(), "location=eq.Main Library");
    }

    #[test]
    fn unknown_table_and_event_rejected() {
        assert!(ChangeFilter::parse("nope", None, None).is_err());
        assert!(ChangeFilter::parse("messages", Some("truncate"), None).is_err());
    }

    #[test]
    fn delete_event_is_accepted() {
        let filter = ChangeFilter::parse("study_group_members", Some("delete"), None).unwrap();
        assert_eq!(filter.kind, Some(ChangeKind::Delete));
        assert_eq!(ChangeKind::Delete.to_string(), "delete");
    }

    #[test]
    fn scope_requires_caller_in_one_column() {
        let filter = ChangeFilter::table(Table::DirectMessages)
            .scoped_to(["sender_id", "recipient_id"], "usr-me");
        let event = |sender: &str, recipient: &str| ChangeEvent {
            table: Table::DirectMessages,
            kind: ChangeKind::Insert,
            id: "dm-00000001".into(),
            record: json!({ "sender_id": sender, "recipient_id": recipient }),
            committed_at: Utc::now(),
        };

        assert!(filter.matches(&event("usr-me", "usr-b")));
        assert!(filter.matches(&event("usr-a", "usr-me")));
        assert!(!filter.matches(&event("usr-a", "usr-b")));
    }

    #[test]
    fn scope_is_omitted_from_json_when_unset() {
        let json = serde_json::to_value(ChangeFilter::table(Table::Posts)).unwrap();
        assert!(json.get("scope").is_none());
    }

    #[test]
    fn matches_on_table_kind_and_column() {
        let filter = ChangeFilter::table(Table::Messages)
            .kind(ChangeKind::Insert)
            .column_eq("group_id", "grp-aaaaaaaa");

        assert!(filter.matches(&message_event("grp-aaaaaaaa")));
        assert!(!filter.matches(&message_event("grp-bbbbbbbb")));

        let mut update = message_event("grp-aaaaaaaa");
        update.kind = ChangeKind::Update;
        assert!(!filter.matches(&update));

        let mut other_table = message_event("grp-aaaaaaaa");
        other_table.table = Table::DirectMessages;
        assert!(!filter.matches(&other_table));
    }

    #[test]
    fn matches_numbers_bools_and_null() {
        let record = json!({ "likes": 3, "done": true, "avatar_url": null });
        assert!(ColumnEq::parse("likes=eq.3").unwrap().matches(&record));
        assert!(ColumnEq::parse("done=eq.true").unwrap().matches(&record));
        assert!(ColumnEq::parse("avatar_url=eq.null").unwrap().matches(&record));
        assert!(!ColumnEq::parse("missing=eq.x").unwrap().matches(&record));
    }

    #[test]
    fn event_serializes_with_snake_case_names() {
        let event = message_event("grp-aaaaaaaa");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["table"], "messages");
        assert_eq!(json["kind"], "insert");
        assert_eq!(json["record"]["group_id"], "grp-aaaaaaaa");
    }
}

//! ID prefix constants.
//!
//! IDs are `{prefix}-{8 hex chars}`, generated by the database layer.

pub const PREFIX_ACCOUNT: &str = "usr";
pub const PREFIX_POST: &str = "pst";
pub const PREFIX_COMMENT: &str = "cmt";
pub const PREFIX_BOOK: &str = "bok";
pub const PREFIX_REPORT: &str = "lnf";
pub const PREFIX_GROUP: &str = "grp";
pub const PREFIX_MEMBER: &str = "mem";
pub const PREFIX_RESOURCE: &str = "rsc";
pub const PREFIX_MESSAGE: &str = "msg";
pub const PREFIX_DIRECT_MESSAGE: &str = "dms";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_ACCOUNT,
    PREFIX_POST,
    PREFIX_COMMENT,
    PREFIX_BOOK,
    PREFIX_REPORT,
    PREFIX_GROUP,
    PREFIX_MEMBER,
    PREFIX_RESOURCE,
    PREFIX_MESSAGE,
    PREFIX_DIRECT_MESSAGE,
];

/// Return true when `id` has the shape `{prefix}-{8 hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

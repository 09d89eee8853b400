//! Required-field and range checks shared by every create operation.
//!
//! Each helper returns the trimmed value on success so callers can store it
//! directly, or a [`CoreError::Validation`] naming the offending field.

use crate::errors::CoreError;

/// Reject blank values. Returns the trimmed input.
pub fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Accept blank text only when at least one attachment is present.
pub fn require_text_or_attachments<'a>(
    field: &str,
    value: &'a str,
    attachments: &[String],
) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() && attachments.is_empty() {
        return Err(CoreError::Validation(format!(
            "{field} is required when nothing is attached"
        )));
    }
    Ok(trimmed)
}

/// Minimal email shape check: one `@`, non-empty local part, dotted domain.
/// Returns the lower-cased address.
pub fn email(value: &str) -> Result<String, CoreError> {
    let trimmed = require("email", value)?;
    let valid = trimmed.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if !valid || trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!("invalid email: {trimmed}")));
    }
    Ok(trimmed.to_lowercase())
}

pub fn price(value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "price must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}

/// Study group capacity must allow at least the creator.
pub fn capacity(max_members: i64) -> Result<i64, CoreError> {
    if max_members < 1 {
        return Err(CoreError::Validation(format!(
            "max_members must be at least 1, got {max_members}"
        )));
    }
    Ok(max_members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn require_trims() {
        assert_eq!(require("title", "  Calculus  ").unwrap(), "Calculus");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn require_rejects_blank(#[case] value: &str) {
        let err = require("title", value).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg == "title is required"));
    }

    #[test]
    fn text_or_attachments() {
        assert!(require_text_or_attachments("content", "", &[]).is_err());
        assert_eq!(
            require_text_or_attachments("content", " ", &["u".into()]).unwrap(),
            ""
        );
        assert_eq!(require_text_or_attachments("content", "hi", &[]).unwrap(), "hi");
    }

    #[rstest]
    #[case("Alice@Campus.edu", Some("alice@campus.edu"))]
    #[case("a@b.co", Some("a@b.co"))]
    #[case("no-at-sign", None)]
    #[case("@campus.edu", None)]
    #[case("a@campus", None)]
    #[case("a@@campus.edu", None)]
    #[case("a b@campus.edu", None)]
    #[case("a@campus.", None)]
    fn email_shapes(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(email(input).ok().as_deref(), expected);
    }

    #[test]
    fn price_bounds() {
        assert!(price(0.0).is_ok());
        assert!(price(12.5).is_ok());
        assert!(price(-1.0).is_err());
        assert!(price(f64::NAN).is_err());
        assert!(price(f64::INFINITY).is_err());
    }

    #[test]
    fn capacity_bounds() {
        assert!(capacity(1).is_ok());
        assert!(capacity(0).is_err());
        assert!(capacity(-3).is_err());
    }
}

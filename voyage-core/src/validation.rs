//! Required-field checks shared by every resource.

use crate::{CoreError, CoreResult};

/// Trimmed, non-empty text.
pub fn require_text(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Minimal shape check: something before an `@`, and a dot in the domain.
pub fn require_email(value: &str) -> CoreResult<String> {
    let email = require_text("email", value)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::validation(format!("email '{}' is not valid", email)));
    }
    Ok(email)
}

pub fn require_non_negative(field: &str, value: i64) -> CoreResult<i64> {
    if value < 0 {
        return Err(CoreError::validation(format!("{} must not be negative", field)));
    }
    Ok(value)
}

pub fn require_positive(field: &str, value: u32) -> CoreResult<u32> {
    if value == 0 {
        return Err(CoreError::validation(format!("{} must be at least 1", field)));
    }
    Ok(value)
}

/// Blank optional text collapses to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name", "  Dupont ").unwrap(), "Dupont");
        assert!(require_text("name", "   ").is_err());
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("marie@example.com").is_ok());
        assert!(require_email("marie.example.com").is_err());
        assert!(require_email("marie@localhost").is_err());
        assert!(require_email("@example.com").is_err());
        assert!(require_email("").is_err());
    }

    #[test]
    fn test_numbers() {
        assert!(require_non_negative("price_cents", -1).is_err());
        assert_eq!(require_non_negative("price_cents", 0).unwrap(), 0);
        assert!(require_positive("travelers", 0).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" Lyon ".into())), Some("Lyon".into()));
    }
}

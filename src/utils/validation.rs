//! Input validation helpers
//!
//! Centralized text length constants and validation functions shared by the
//! CRUD handlers. Limits are UX-driven; the document store does not enforce
//! text lengths on its own.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, waiter, table label, user display name
pub const MAX_NAME_LEN: usize = 200;

/// Cancellation reasons and other free-form notes
pub const MAX_NOTE_LEN: usize = 500;

/// Cancellation reason minimum (shorter input is rejected)
pub const MIN_CANCEL_REASON_LEN: usize = 10;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a non-negative money amount.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative amount"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_text_is_rejected() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(validate_amount(-0.01, "price").is_err());
        assert!(validate_amount(f64::NAN, "price").is_err());
        assert!(validate_amount(0.0, "price").is_ok());
    }
}

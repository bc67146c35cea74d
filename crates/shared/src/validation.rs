//! Common validation utilities.

use validator::ValidationError;

/// Validates that a string has visible content once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a monetary amount is a finite number strictly greater than zero.
pub fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_not_positive");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Validates an ISO-4217 style currency code (three uppercase ASCII letters).
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency_code");
        err.message = Some("Currency must be a three-letter uppercase code".into());
        Err(err)
    }
}

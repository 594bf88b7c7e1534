//! # Validation Module
//!
//! Input validation utilities for Busline.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (deserialization)                               │
//! │  ├── Type validation (missing/mistyped fields)                         │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (email, phone, bus/seat reservation)           │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::{MAX_BATCH_SEATS, MAX_COST_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a rider's display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// Deliberately shallow: one `@` with a non-empty local part and a domain
/// containing a dot. The UNIQUE constraint is the real arbiter; this only
/// rejects obvious typos early.
///
/// ## Example
/// ```rust
/// use busline_core::validation::validate_email;
///
/// assert!(validate_email("rider@example.com").is_ok());
/// assert!(validate_email("no-at-sign").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 255,
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - 7 to 20 characters
/// - Digits, with an optional leading `+`
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);

    if digits.len() < 7 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 7,
        });
    }

    if digits.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits (optional leading +)".to_string(),
        });
    }

    Ok(())
}

/// Validates a raw password before hashing.
///
/// ## Rules
/// - At least 8 characters
/// - At most 128 characters (argon2 input bound, keeps hashing cheap)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }

    if password.len() > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a seat number.
///
/// ## Rules
/// - Must be positive; existence on the bus is checked by the ledger inside
///   the booking transaction, not here.
pub fn validate_seat_no(seat_no: i64) -> ValidationResult<()> {
    if seat_no <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "seat_no".to_string(),
        });
    }

    Ok(())
}

/// Validates a cost in cents.
///
/// ## Rules
/// - Must be non-negative (zero allowed for promotional fares)
/// - At most [`MAX_COST_CENTS`], so batch totals cannot overflow
pub fn validate_cost_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_COST_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "cost".to_string(),
            min: 0,
            max: MAX_COST_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the seat list of a batch booking.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_BATCH_SEATS`] seats
/// - Every seat number positive
/// - No duplicates (a duplicate would make the batch conflict with itself)
///
/// ## Example
/// ```rust
/// use busline_core::validation::validate_seat_batch;
///
/// assert!(validate_seat_batch(&[3, 4, 5]).is_ok());
/// assert!(validate_seat_batch(&[3, 3]).is_err());
/// assert!(validate_seat_batch(&[]).is_err());
/// ```
pub fn validate_seat_batch(seat_nos: &[i64]) -> ValidationResult<()> {
    if seat_nos.is_empty() {
        return Err(ValidationError::Required {
            field: "seat_nos".to_string(),
        });
    }

    if seat_nos.len() > MAX_BATCH_SEATS {
        return Err(ValidationError::TooMany {
            field: "seat_nos".to_string(),
            max: MAX_BATCH_SEATS,
        });
    }

    let mut seen = HashSet::with_capacity(seat_nos.len());
    for &seat_no in seat_nos {
        validate_seat_no(seat_no)?;
        if !seen.insert(seat_no) {
            return Err(ValidationError::DuplicateSeat { seat_no });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Asha").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("rider@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("rider@nodot").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("98765abcde").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_seat_no() {
        assert!(validate_seat_no(1).is_ok());
        assert!(validate_seat_no(40).is_ok());
        assert!(validate_seat_no(0).is_err());
        assert!(validate_seat_no(-3).is_err());
    }

    #[test]
    fn test_validate_cost_cents() {
        assert!(validate_cost_cents(0).is_ok());
        assert!(validate_cost_cents(12000).is_ok());
        assert!(validate_cost_cents(MAX_COST_CENTS).is_ok());
        assert!(validate_cost_cents(-1).is_err());
        assert!(validate_cost_cents(MAX_COST_CENTS + 1).is_err());
        assert!(validate_cost_cents(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_seat_batch() {
        assert!(validate_seat_batch(&[3, 4, 5]).is_ok());
        assert!(validate_seat_batch(&[]).is_err());
        assert!(validate_seat_batch(&[3, 3]).is_err());
        assert!(validate_seat_batch(&[0]).is_err());

        let too_many: Vec<i64> = (1..=20).collect();
        assert!(validate_seat_batch(&too_many).is_err());
    }
}

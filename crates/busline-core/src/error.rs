//! # Error Types
//!
//! Validation errors for busline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  busline-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  busline-db errors (separate crate)                                    │
//! │  └── DbError          - Storage failures, NotFound, booking conflicts   │
//! │                                                                         │
//! │  API errors (in apps/api)                                              │
//! │  └── ApiError         - What the client sees (code + message)          │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → ApiError → Client                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Not-found and conflict outcomes live in busline-db's `DbError`: they can
//! only be observed against storage, inside the ledger's transaction. This
//! crate only knows about input shape.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any storage work runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email or phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The same seat appears more than once in a batch request.
    #[error("seat {seat_no} is listed more than once")]
    DuplicateSeat { seat_no: i64 },

    /// A collection field has too many entries.
    #[error("{field} must contain at most {max} entries")]
    TooMany { field: String, max: usize },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::DuplicateSeat { seat_no: 4 };
        assert_eq!(err.to_string(), "seat 4 is listed more than once");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling fares and wallet balances safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A fare of 120.00 split or summed as f64 can drift by a cent.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    12000 cents × 3 seats = 36000 cents, exactly                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use busline_core::money::Money;
//!
//! // Create from cents (preferred)
//! let fare = Money::from_cents(12000); // 120.00
//!
//! // Arithmetic operations
//! let batch_total = fare * 3;          // 360.00
//! let with_fee = fare + Money::from_cents(500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every fare, reservation cost, and wallet balance in the system flows
/// through this type; the database stores the raw cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use busline_core::money::Money;
    ///
    /// let fare = Money::from_cents(12000); // Represents 120.00
    /// assert_eq!(fare.cents(), 12000);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use cents.
    /// Only the UI converts to a decimal string for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use busline_core::money::Money;
    ///
    /// let fare = Money::from_major_minor(120, 0); // 120.00
    /// assert_eq!(fare.cents(), 12000);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a count, returning None on overflow.
    ///
    /// Prefer this over `*` when the count comes from caller input; the
    /// reservation ledger totals batch bookings through it.
    #[inline]
    pub fn checked_mul(&self, count: i64) -> Option<Money> {
        self.0.checked_mul(count).map(Money)
    }
}

/// Formats as a plain decimal amount, e.g. `120.00` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Arithmetic Operators
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(12000);
        assert_eq!(m.cents(), 12000);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(120, 0).cents(), 12000);
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_arithmetic() {
        let fare = Money::from_cents(12000);
        assert_eq!((fare * 3).cents(), 36000);
        assert_eq!((fare + Money::from_cents(500)).cents(), 12500);
        assert_eq!((fare - Money::from_cents(2000)).cents(), 10000);

        let mut acc = Money::zero();
        acc += fare;
        acc += fare;
        assert_eq!(acc.cents(), 24000);
    }

    #[test]
    fn test_checked_mul() {
        let fare = Money::from_cents(15000);
        assert_eq!(fare.checked_mul(4), Some(Money::from_cents(60000)));
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(12000).to_string(), "120.00");
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }
}

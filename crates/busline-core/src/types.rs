//! # Domain Types
//!
//! Core domain types used throughout Busline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bus        │   │      Seat       │   │   Reservation   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  (bus_id,       │   │  id             │       │
//! │  │  name           │   │   seat_no) PK   │   │  user_id        │       │
//! │  │  origin/dest    │   │  status         │   │  bus_id/seat_no │       │
//! │  │  available_seats│   │  price_cents    │   │  cost_cents     │       │
//! │  └─────────────────┘   │  row/col        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SeatStatus    │   │     Gender      │                             │
//! │  │  Available      │   │  Male / Female  │ (seat-map display only,     │
//! │  │  Booked         │   │                 │  never a booking rule)      │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `bus.available_seats` always equals the count of the bus's seats in
//!   `Available` status; only the reservation ledger mutates either side,
//!   and always in the same transaction.
//! - A `Reservation` row exists if and only if the referenced seat is
//!   `Booked` for that (bus_id, seat_no) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Seat Status
// =============================================================================

/// The occupancy state of a seat.
///
/// There is no intermediate "held" state: two racing booking requests for the
/// same seat are serialized by the storage transaction, not by application
/// locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Seat is free and can be reserved.
    Available,
    /// Seat is held by exactly one reservation.
    Booked,
}

impl Default for SeatStatus {
    fn default() -> Self {
        SeatStatus::Available
    }
}

// =============================================================================
// Gender Marker
// =============================================================================

/// Gender marker assigned to a seat.
///
/// Display-only: the seat map renders it, but it is never enforced as a
/// booking rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

// =============================================================================
// Bus
// =============================================================================

/// A bus in the catalog.
///
/// `available_seats` is a derived counter maintained transactionally by the
/// reservation ledger; any divergence from the seat rows is a bug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Bus {
    /// Unique identifier (rowid).
    pub id: i64,

    /// Operator-facing name, e.g. "Subash Express".
    pub name: String,

    /// Departure city.
    pub origin: String,

    /// Arrival city.
    pub destination: String,

    /// Total route distance in kilometres.
    pub distance_km: i64,

    /// Scheduled departure time, "HH:MM:SS".
    pub start_time: String,

    /// Scheduled arrival time, "HH:MM:SS".
    pub end_time: String,

    /// Human-readable travel duration, e.g. "4h".
    pub travel_time: String,

    /// Cached count of seats currently Available.
    pub available_seats: i64,

    /// Base fare per seat in cents.
    pub seat_price_cents: i64,
}

impl Bus {
    /// Returns the per-seat base fare as Money.
    #[inline]
    pub fn seat_price(&self) -> Money {
        Money::from_cents(self.seat_price_cents)
    }
}

/// Catalog-load input for a new bus. Ids are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBus {
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: i64,
    pub start_time: String,
    pub end_time: String,
    pub travel_time: String,
    pub seat_price_cents: i64,
}

// =============================================================================
// Seat
// =============================================================================

/// A single seat on a bus.
///
/// Composite identity `(bus_id, seat_no)`. The status column is the single
/// source of truth for booking eligibility and is mutated only by the
/// reservation ledger, inside the same transaction that writes or removes
/// the corresponding reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Seat {
    pub bus_id: i64,

    /// 1-based seat number, contiguous per bus.
    pub seat_no: i64,

    pub status: SeatStatus,

    /// Fare for this seat in cents.
    pub price_cents: i64,

    /// Display-only gender marker.
    pub gender: Gender,

    /// Grid row for UI layout (0-based).
    pub row_no: i64,

    /// Grid column for UI layout (0-based).
    pub col_no: i64,
}

impl Seat {
    /// Returns the seat fare as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the seat can currently be reserved.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// A confirmed seat reservation.
///
/// Created and deleted only by the reservation ledger. No partial or
/// soft-cancel state exists: cancellation removes the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub bus_id: i64,
    pub seat_no: i64,

    /// Cost charged for this reservation in cents.
    pub cost_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Returns the charged cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

/// A reservation joined with the bus metadata the rider cares about.
///
/// Read-only projection used by the reservation-history query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReservationView {
    pub reservation_id: i64,
    pub seat_no: i64,
    pub cost_cents: i64,
    pub bus_id: i64,
    pub bus_name: String,
    pub origin: String,
    pub destination: String,
    pub start_time: String,
    pub end_time: String,
}

/// Outcome of a batch booking: how many seats were reserved and the total
/// charged. Batch booking is all-or-nothing, so `booked` always equals the
/// requested seat count on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReceipt {
    pub booked: i64,
    pub total_cost_cents: i64,
}

// =============================================================================
// User
// =============================================================================

/// A user account as exposed to callers.
///
/// The stored credential hash never leaves the account store; this view is
/// what login and profile queries return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Wallet balance in cents. Read-only in this iteration.
    pub wallet_cents: i64,
}

impl UserView {
    /// Returns the wallet balance as Money.
    #[inline]
    pub fn wallet(&self) -> Money {
        Money::from_cents(self.wallet_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_status_default() {
        assert_eq!(SeatStatus::default(), SeatStatus::Available);
    }

    #[test]
    fn test_seat_availability() {
        let seat = Seat {
            bus_id: 1,
            seat_no: 7,
            status: SeatStatus::Available,
            price_cents: 12000,
            gender: Gender::Male,
            row_no: 1,
            col_no: 2,
        };
        assert!(seat.is_available());
        assert_eq!(seat.price().cents(), 12000);

        let booked = Seat {
            status: SeatStatus::Booked,
            ..seat
        };
        assert!(!booked.is_available());
    }

    #[test]
    fn test_money_accessors() {
        let bus = Bus {
            id: 1,
            name: "Subash Express".into(),
            origin: "Tiruvannamalai".into(),
            destination: "Chennai".into(),
            distance_km: 190,
            start_time: "07:00:00".into(),
            end_time: "11:00:00".into(),
            travel_time: "4h".into(),
            available_seats: 40,
            seat_price_cents: 12000,
        };
        assert_eq!(bus.seat_price().to_string(), "120.00");
    }
}

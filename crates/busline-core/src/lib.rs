//! # busline-core: Pure Domain Logic for Busline
//!
//! This crate is the **heart** of the Busline reservation system. It contains
//! the domain model and business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Busline Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /register ──► /buses ──► /reservations ──► /users           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ busline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  layout   │  │ validation│  │   │
//! │  │   │ Bus, Seat │  │   Money   │  │ seat grid │  │   rules   │  │   │
//! │  │   │Reservation│  │  (cents)  │  │ positions │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    busline-db (Database Layer)                  │   │
//! │  │       SQLite queries, migrations, the reservation ledger        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Bus, Seat, Reservation, UserView, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`layout`] - The fixed seat-grid layout function
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod layout;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use busline_core::Money` instead of
// `use busline_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Seats per physical row in every coach.
///
/// ## Why a constant?
/// The fleet is provisioned with a uniform 2+2 layout. Seat grid positions
/// are derived from this at provisioning time and never stored ad hoc, so
/// the layout function and the seat map renderer always agree.
pub const SEATS_PER_ROW: i64 = 4;

/// Default number of seats provisioned per coach.
pub const DEFAULT_SEAT_COUNT: i64 = 40;

/// Maximum seats a single batch booking may request.
///
/// ## Business Reason
/// Prevents one request from sweeping an entire coach and keeps the batch
/// transaction short-lived.
pub const MAX_BATCH_SEATS: usize = 10;

/// Maximum cost accepted for a single seat, in cents (1,000,000.00).
///
/// No real fare comes anywhere near this; bounding it keeps every batch
/// total (`MAX_COST_CENTS * MAX_BATCH_SEATS`) safely inside i64.
pub const MAX_COST_CENTS: i64 = 100_000_000;

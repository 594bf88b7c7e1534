//! # Repository Module
//!
//! Database repository implementations for Busline.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.ledger().reserve_seat(user_id, bus_id, seat_no, cost)      │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ReservationLedger                                                     │
//! │  ├── reserve_seat(&self, user_id, bus_id, seat_no, cost_cents)         │
//! │  ├── reserve_seats(&self, user_id, bus_id, seat_nos, price_per_seat)   │
//! │  ├── cancel(&self, bus_id, seat_no)                                    │
//! │  └── list_for_user(&self, user_id)                                     │
//! │       │                                                                 │
//! │       │  SQL transaction                                                │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Every mutation of the seat/reservation/counter triple goes          │
//! │    through exactly one type (the ledger)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::BusRepository`] - Bus catalog and seat-map reads
//! - [`ledger::ReservationLedger`] - Transactional booking/cancellation
//! - [`account::AccountRepository`] - Registration and credential checks

pub mod account;
pub mod catalog;
pub mod ledger;

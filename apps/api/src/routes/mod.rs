//! # Route Modules
//!
//! Each module exposes a `routes() -> Router<AppState>` builder that the app
//! merges. Handlers stay thin: validate input, call a repository, map the
//! result.
//!
//! ## Route Map
//! ```text
//! POST /register                  auth      create account
//! POST /login                     auth      verify credentials
//! GET  /buses                     buses     list catalog
//! GET  /buses/{id}/seats          buses     seat map
//! POST /reservations              bookings  reserve one seat
//! POST /reservations/batch        bookings  reserve several, all-or-nothing
//! POST /reservations/cancel       bookings  cancel a reservation
//! GET  /users/{id}                users     profile + wallet
//! GET  /users/{id}/reservations   users     reservation history
//! ```

pub mod auth;
pub mod bookings;
pub mod buses;
pub mod users;

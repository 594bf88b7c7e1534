//! # Busline HTTP API
//!
//! Thin axum routing layer over the busline-db repositories.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Busline API Server                               │
//! │                                                                         │
//! │  Client ──► CORS / Trace layers ──► Route handler                      │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              validate (busline-core)                    │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              repository (busline-db)                    │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              DbError → ApiError → JSON                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All booking semantics live in the ledger; nothing in this crate touches
//! SQL directly.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use busline_db::Database;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use state::AppState;

/// Builds the application router.
///
/// Separated from `main` so integration tests can drive the router with
/// in-process requests against an in-memory database.
pub fn app(db: Database) -> Router {
    let state = AppState::new(db);

    Router::new()
        .route("/health", get(health))
        .merge(routes::auth::routes())
        .merge(routes::buses::routes())
        .merge(routes::bookings::routes())
        .merge(routes::users::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

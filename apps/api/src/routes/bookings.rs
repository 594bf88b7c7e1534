//! Booking endpoints: reserve, batch reserve, cancel.
//!
//! Handlers validate shape only; the ledger is the arbiter of seat
//! availability. A lost race surfaces as 409, never as a partial booking.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use busline_core::validation::{validate_cost_cents, validate_seat_batch, validate_seat_no};
use busline_core::{BatchReceipt, Reservation};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(reserve))
        .route("/reservations/batch", post(reserve_batch))
        .route("/reservations/cancel", post(cancel))
}

#[derive(Debug, Deserialize)]
struct ReserveRequest {
    user_id: i64,
    bus_id: i64,
    seat_no: i64,
    /// Quoted fare to record on the reservation.
    cost_cents: i64,
}

/// POST /reservations
///
/// Reserves one seat at the quoted cost. 200 with the reservation, 404 for
/// unknown bus/seat, 409 when the seat is already booked.
async fn reserve(
    State(state): State<AppState>,
    Json(req): Json<ReserveRequest>,
) -> Result<Json<Reservation>, ApiError> {
    validate_seat_no(req.seat_no)?;
    validate_cost_cents(req.cost_cents)?;

    let reservation = state
        .db
        .ledger()
        .reserve_seat(req.user_id, req.bus_id, req.seat_no, req.cost_cents)
        .await?;

    Ok(Json(reservation))
}

#[derive(Debug, Deserialize)]
struct BatchReserveRequest {
    user_id: i64,
    bus_id: i64,
    seat_nos: Vec<i64>,
    price_per_seat_cents: i64,
}

/// POST /reservations/batch
///
/// Reserves several seats on one bus, all-or-nothing. If any requested seat
/// is unavailable the whole batch fails with 409 and no seat changes state.
async fn reserve_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchReserveRequest>,
) -> Result<Json<BatchReceipt>, ApiError> {
    validate_seat_batch(&req.seat_nos)?;
    validate_cost_cents(req.price_per_seat_cents)?;

    let receipt = state
        .db
        .ledger()
        .reserve_seats(req.user_id, req.bus_id, &req.seat_nos, req.price_per_seat_cents)
        .await?;

    Ok(Json(receipt))
}

#[derive(Debug, Deserialize)]
struct CancelRequest {
    bus_id: i64,
    seat_no: i64,
}

/// POST /reservations/cancel
///
/// Cancels the reservation holding a seat, freeing it immediately.
/// 404 when no reservation exists for that seat.
async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_seat_no(req.seat_no)?;

    state.db.ledger().cancel(req.bus_id, req.seat_no).await?;

    Ok(Json(json!({ "message": "Reservation cancelled." })))
}

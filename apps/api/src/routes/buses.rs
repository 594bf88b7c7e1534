//! Bus catalog endpoints: listing and seat maps.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use busline_core::{Bus, Seat};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/buses", get(list_buses))
        .route("/buses/{id}/seats", get(seat_map))
}

/// GET /buses
async fn list_buses(State(state): State<AppState>) -> Result<Json<Vec<Bus>>, ApiError> {
    let buses = state.db.buses().list().await?;
    Ok(Json(buses))
}

/// GET /buses/{id}/seats
///
/// The full seat map ordered by seat number, including grid position and the
/// gender marker. 404 when the bus does not exist (distinct from a bus with
/// no seats).
async fn seat_map(
    State(state): State<AppState>,
    Path(bus_id): Path<i64>,
) -> Result<Json<Vec<Seat>>, ApiError> {
    let seats = state.db.buses().list_seats(bus_id).await?;
    Ok(Json(seats))
}

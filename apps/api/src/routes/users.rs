//! User profile and reservation history endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use busline_core::{ReservationView, UserView};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(profile))
        .route("/users/{id}/reservations", get(history))
}

/// GET /users/{id}
///
/// Profile with wallet balance. The wallet is read-only: bookings do not
/// debit it.
async fn profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.db.accounts().get_by_id(user_id).await?;

    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound(format!("User not found: {user_id}"))),
    }
}

/// GET /users/{id}/reservations
///
/// Reservation history joined with bus details, oldest booking first.
/// An empty history is a 404 with a distinct message, not an empty 200.
async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ReservationView>>, ApiError> {
    let views = state.db.ledger().list_for_user(user_id).await?;

    if views.is_empty() {
        return Err(ApiError::NotFound(
            "No reservations found for this user.".to_string(),
        ));
    }

    Ok(Json(views))
}

//! Registration and login endpoints.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use tracing::info;

use busline_core::validation::{
    validate_email, validate_name, validate_password, validate_phone,
};
use busline_core::UserView;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    phone: String,
    password: String,
}

/// POST /register
///
/// Creates an account. 201 with the new profile, 400 on bad input, 409 when
/// the email or phone is already registered.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    validate_name(&req.name)?;
    validate_email(&req.email)?;
    validate_phone(&req.phone)?;
    validate_password(&req.password)?;

    let user = state
        .db
        .accounts()
        .register(req.name.trim(), req.email.trim(), req.phone.trim(), &req.password)
        .await?;

    info!(user_id = user.id, "New rider registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    phone: String,
    password: String,
}

/// POST /login
///
/// Verifies credentials. 200 with the profile, 401 otherwise. Unknown phone
/// and wrong password are indistinguishable.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .db
        .accounts()
        .authenticate(req.phone.trim(), &req.password)
        .await?;

    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::Unauthorized(
            "Invalid phone number or password".to_string(),
        )),
    }
}

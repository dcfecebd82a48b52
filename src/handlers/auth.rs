use axum::{extract::State, Json};
use tracing::info;

use crate::auth::{hash_password, issue_token, verify_password, Claims};
use crate::db::{create_user, get_user_by_username};
use crate::error::AppError;
use crate::middleware::{AuthUser, JsonBody};
use crate::models::{Credentials, MessageResponse, TokenResponse};
use crate::AppState;

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Credentials>,
) -> Result<Json<MessageResponse>, AppError> {
    if get_user_by_username(&state.db, &req.username)?.is_some() {
        return Err(AppError::BadRequest(USER_EXISTS));
    }

    let password_hash = hash_password(&req.password)?;
    // The unique index catches a concurrent signup that slipped past the lookup.
    let Some(user) = create_user(&state.db, &req.username, &password_hash)? else {
        return Err(AppError::BadRequest(USER_EXISTS));
    };
    info!(user_id = user.user_id, username = %user.username, "Created user");

    Ok(Json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    let Some(user) = get_user_by_username(&state.db, &req.username)? else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&req.password, &user.password) {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
    }

    let token = issue_token(user.user_id, &state.jwt_secret)?;
    info!(user_id = user.user_id, "User logged in");
    Ok(Json(TokenResponse { token }))
}

pub async fn protected(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}

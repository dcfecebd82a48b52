use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::{header::AUTHORIZATION, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::auth::{decode_token, Claims};
use crate::error::AppError;
use crate::AppState;

/// A request whose `Authorization` header holds a token signed with the
/// configured secret. Both `<token>` and `Bearer <token>` are accepted.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        match decode_token(token, &state.jwt_secret) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(err) => {
                warn!(error = %err, "Rejected invalid token");
                Err(AuthError::InvalidToken)
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        warn!("Protected route accessed without token");
        return Err(AuthError::MissingToken);
    };

    let value = header.to_str().map_err(|_| {
        warn!("Rejected unreadable Authorization header");
        AuthError::InvalidToken
    })?;

    // An empty `Bearer` scheme may arrive with its trailing space already stripped.
    let value = value.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => value,
    };

    if token.is_empty() {
        warn!("Protected route accessed with empty token");
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Json("Access denied. No token provided."),
            )
                .into_response(),
            AuthError::InvalidToken => {
                (StatusCode::BAD_REQUEST, Json("Invalid token.")).into_response()
            }
        }
    }
}

/// `Json` body extractor whose rejections use the API's JSON string errors.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                warn!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest("Invalid request body"))
            }
        }
    }
}

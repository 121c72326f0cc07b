//! Handlers for signup, login, and the current user.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
use crate::api::extract::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and returns its first token.
///
/// # Endpoint
///
/// `POST /api/auth/signup`
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "password": "correct horse", "name": "A" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the email is already registered.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let (token, user) = state
        .auth_service
        .signup(payload.email, &payload.password, payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

/// Authenticates an existing account and returns a fresh token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 401 Unauthorized on invalid credentials (unknown email and wrong
/// password are indistinguishable).
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (token, user) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Returns the authenticated caller's account.
///
/// # Endpoint
///
/// `GET /api/me`
///
/// # Errors
///
/// Returns 401 Unauthorized for anonymous requests.
pub async fn me_handler(context: RequestContext) -> Result<Json<UserResponse>, AppError> {
    let user = context.identity.require_authenticated()?;

    Ok(Json(UserResponse::from(user.clone())))
}

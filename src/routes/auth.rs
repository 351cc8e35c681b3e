use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;

use validator::Validate;

use crate::{
    dto::auth_dto::{
        ResetConfirmPayload, ResetRequestPayload, ResetRequestResponse, SessionResponse,
        SignInPayload, SignUpPayload,
    },
    dto::profile_dto::ProfileResponse,
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpPayload,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid payload or email already registered")
    )
)]
#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpPayload>,
) -> Result<impl IntoResponse> {
    let (token, profile) = state.auth_service.sign_up(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            profile: ProfileResponse::from(profile),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 401, description = "Rejected credentials with a user-facing message")
    )
)]
#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInPayload>,
) -> Result<impl IntoResponse> {
    let (token, profile) = state.auth_service.sign_in(payload).await?;
    Ok(Json(SessionResponse {
        token,
        profile: ProfileResponse::from(profile),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/signout",
    responses(
        (status = 200, description = "Session acknowledged as closed")
    )
)]
#[axum::debug_handler]
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    state.auth_service.sign_out(&claims);
    Ok(Json(json!({ "status": "signed_out" })))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset/request",
    request_body = ResetRequestPayload,
    responses(
        (status = 200, description = "Reset token issued"),
        (status = 401, description = "No account for this email")
    )
)]
#[axum::debug_handler]
pub async fn request_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let reset_token = state
        .auth_service
        .request_password_reset(&payload.email)
        .await?;
    Ok(Json(ResetRequestResponse { reset_token }))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset/confirm",
    request_body = ResetConfirmPayload,
    responses(
        (status = 200, description = "Password updated"),
        (status = 401, description = "Invalid or expired token")
    )
)]
#[axum::debug_handler]
pub async fn confirm_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetConfirmPayload>,
) -> Result<impl IntoResponse> {
    state.auth_service.confirm_password_reset(payload).await?;
    Ok(Json(json!({ "status": "password_updated" })))
}

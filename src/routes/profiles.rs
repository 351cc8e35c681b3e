use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::profile_dto::{AddPortfolioItemPayload, ProfileResponse},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get(id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Signed-in profile", body = ProfileResponse)
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.me(&claims).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    post,
    path = "/api/profile/portfolio",
    request_body = AddPortfolioItemPayload,
    responses(
        (status = 201, description = "Portfolio item appended", body = ProfileResponse)
    )
)]
#[axum::debug_handler]
pub async fn add_portfolio_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddPortfolioItemPayload>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .add_portfolio_item(&claims, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    post,
    path = "/api/profiles/{id}/follow",
    params(
        ("id" = Uuid, Path, description = "Profile to follow")
    ),
    responses(
        (status = 204, description = "Now following"),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn follow(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.profile_service.follow(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}/follow",
    params(
        ("id" = Uuid, Path, description = "Profile to unfollow")
    ),
    responses(
        (status = 204, description = "No longer following")
    )
)]
#[axum::debug_handler]
pub async fn unfollow(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.profile_service.unfollow(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

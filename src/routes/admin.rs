use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::admin_dto::{
        BoardStatsResponse, GenerateLogoPayload, GenerateLogoResponse, ProcessJobPayload,
    },
    dto::job_dto::JobResponse,
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/jobs/process",
    request_body = ProcessJobPayload,
    responses(
        (status = 201, description = "Raw text structured and published", body = JobResponse),
        (status = 400, description = "The extraction was missing required fields"),
        (status = 502, description = "The generative API call failed")
    )
)]
#[axum::debug_handler]
pub async fn process_and_publish(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ProcessJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let processed = state
        .ai_service
        .process_job_content(&payload.raw_text)
        .await?;
    let job = state
        .job_service
        .publish_processed(processed, &claims)
        .await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    post,
    path = "/api/admin/logo",
    request_body = GenerateLogoPayload,
    responses(
        (status = 200, description = "Logo result; null when synthesis failed", body = GenerateLogoResponse)
    )
)]
#[axum::debug_handler]
pub async fn generate_logo(
    State(state): State<AppState>,
    Json(payload): Json<GenerateLogoPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let logo = state.ai_service.generate_logo(&payload.company).await;
    Ok(Json(GenerateLogoResponse { logo }))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Live board statistics", body = BoardStatsResponse)
    )
)]
#[axum::debug_handler]
pub async fn board_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let total_jobs = state.job_service.count().await?;
    Ok(Json(BoardStatsResponse {
        total_jobs,
        status: "online".to_string(),
    }))
}

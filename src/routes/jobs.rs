use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Json},
    Extension,
};
use futures::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::{
    dto::job_dto::{JobListQuery, JobListResponse, JobResponse, SubmitJobPayload},
    error::Result,
    middleware::auth::Claims,
    models::job::Job,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Free-text search over title, description, location, and tags"),
        ("type" = Option<String>, Query, description = "Engagement type filter"),
        ("category" = Option<String>, Query, description = "Category filter"),
        ("state" = Option<String>, Query, description = "Location filter")
    ),
    responses(
        (status = 200, description = "Filtered job listing", body = JobListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = SubmitJobPayload,
    responses(
        (status = 201, description = "Gig published", body = JobResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn submit_job(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<SubmitJobPayload>,
) -> Result<impl IntoResponse> {
    let identity = claims.as_ref().map(|ext| &ext.0);
    let job = state.job_service.submit(payload, identity).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Gig removed (or was already gone)"),
        (status = 403, description = "Not the creator or an admin")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let Some(Extension(claims)) = claims else {
        return Err(crate::error::Error::Authentication(
            "You must be signed in to remove a gig".to_string(),
        ));
    };
    state.job_service.delete(id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/dashboard/jobs",
    responses(
        (status = 200, description = "Gigs created by the signed-in account", body = JobListResponse)
    )
)]
#[axum::debug_handler]
pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.my_jobs(&claims).await?;
    Ok(Json(JobListResponse::from(jobs)))
}

fn snapshot_event(jobs: &[Job]) -> Event {
    let items: Vec<JobResponse> = jobs.iter().cloned().map(Into::into).collect();
    Event::default()
        .event("snapshot")
        .data(serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string()))
}

/// Live feed. Each event carries the entire ordered collection, never a
/// delta; the first event is the current state at connect time. Client
/// disconnect drops the broadcast receiver, which is the whole teardown.
#[axum::debug_handler]
pub async fn stream_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let initial = state.job_service.list(JobListQuery::default()).await?;
    let rx = state.feed.subscribe();

    let live = BroadcastStream::new(rx).filter_map(|result| {
        futures::future::ready(match result {
            Ok(snapshot) => Some(Ok::<_, Infallible>(snapshot_event(&snapshot))),
            // A lagged subscriber only missed intermediate snapshots; the
            // next delivery is again the full state, so just skip.
            Err(_) => None,
        })
    });

    let stream = futures::stream::once(futures::future::ready(Ok::<_, Infallible>(
        snapshot_event(&initial),
    )))
    .chain(live);

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

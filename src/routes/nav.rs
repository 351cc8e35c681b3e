use axum::{
    extract::Path,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::nav_dto::NavResponse,
    error::Result,
    middleware::auth::Claims,
    services::access_service,
};

/// Resolves a URL fragment to a view and gates it for the caller's
/// identity. Guests get the auth wall on member views; a signed-in
/// non-admin asking for the admin console gets the forbidden state.
#[utoipa::path(
    get,
    path = "/api/nav/{fragment}",
    params(
        ("fragment" = String, Path, description = "URL fragment, without the leading '#'")
    ),
    responses(
        (status = 200, description = "Resolved view and gate decision", body = NavResponse)
    )
)]
#[axum::debug_handler]
pub async fn resolve(
    Path(fragment): Path<String>,
    claims: Option<Extension<Claims>>,
) -> Result<impl IntoResponse> {
    let identity = claims.as_ref().map(|ext| &ext.0);
    let view = access_service::resolve_fragment(&fragment);
    let decision = access_service::decide(view, identity);
    Ok(Json(NavResponse { view, decision }))
}

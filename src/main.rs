use axum::{
    routing::{get, post},
    Router,
};
use ogig_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    // Public surface. Identity is attached when a bearer token is present
    // but nothing here requires one; the submission workflow itself rejects
    // anonymous posts.
    let public_api = Router::new()
        .route(
            "/api/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::submit_job),
        )
        .route("/api/jobs/stream", get(routes::jobs::stream_jobs))
        .route(
            "/api/jobs/:id",
            get(routes::jobs::get_job).delete(routes::jobs::delete_job),
        )
        .route("/api/profiles/:id", get(routes::profiles::get_profile))
        .route("/api/nav/:fragment", get(routes::nav::resolve))
        .route("/api/auth/signup", post(routes::auth::sign_up))
        .route("/api/auth/signin", post(routes::auth::sign_in))
        .route("/api/auth/reset/request", post(routes::auth::request_reset))
        .route("/api/auth/reset/confirm", post(routes::auth::confirm_reset))
        .layer(axum::middleware::from_fn(
            middleware::auth::attach_bearer_identity,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let member_api = Router::new()
        .route("/api/dashboard/jobs", get(routes::jobs::my_jobs))
        .route("/api/profile", get(routes::profiles::me))
        .route(
            "/api/profile/portfolio",
            post(routes::profiles::add_portfolio_item),
        )
        .route(
            "/api/profiles/:id/follow",
            post(routes::profiles::follow).delete(routes::profiles::unfollow),
        )
        .route("/api/auth/signout", post(routes::auth::sign_out))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/jobs/process",
            post(routes::admin::process_and_publish),
        )
        .route("/api/admin/logo", post(routes::admin::generate_logo))
        .route("/api/admin/stats", get(routes::admin::board_stats))
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.admin_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(member_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    ai_service::AiService, auth_service::AuthService, job_service::JobService,
    profile_service::ProfileService,
};
use crate::store::postgres::{PgJobStore, PgProfileStore};
use crate::store::{FeedHub, JobStore, ProfileStore};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub profile_service: ProfileService,
    pub auth_service: AuthService,
    pub ai_service: AiService,
    pub feed: FeedHub,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let jobs: Arc<dyn JobStore> = Arc::new(PgJobStore::new(pool.clone()));
        let profiles: Arc<dyn ProfileStore> = Arc::new(PgProfileStore::new(pool));
        Self::with_stores(jobs, profiles)
    }

    /// Wires the services over explicit store instances, so tests and local
    /// tooling can substitute the in-memory implementations.
    pub fn with_stores(jobs: Arc<dyn JobStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let feed = jobs.feed().clone();
        let job_service = JobService::new(jobs);
        let profile_service = ProfileService::new(profiles.clone());
        let auth_service = AuthService::new(profiles);
        let ai_service = AiService::new(config.gemini_api_key.clone(), http_client);

        Self {
            job_service,
            profile_service,
            auth_service,
            ai_service,
            feed,
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::job_dto::{JobListQuery, SubmitJobPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::job::{Job, NewJobRecord};
use crate::models::profile::Role;
use crate::services::ai_service::AiProcessedJob;
use crate::services::filter_service::{self, FilterCriteria};
use crate::store::JobStore;
use crate::utils::tags::split_tags;

/// Delay between a successful submission and the response, so the posting
/// form's confirmation state has time to render before navigation.
const SUBMIT_CONFIRMATION_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Validates, normalizes, and writes a member submission. The record is
    /// stamped server-side: posting time, non-admin flag, and creator
    /// attribution from the session identity.
    pub async fn submit(
        &self,
        payload: SubmitJobPayload,
        identity: Option<&Claims>,
    ) -> Result<Job> {
        let claims = identity.ok_or_else(|| {
            Error::Authentication("You must be signed in to post a gig".to_string())
        })?;

        let record = self.normalize(payload, claims, false)?;
        let job = self.store.create(record).await?;
        info!(job_id = %job.id, creator = %job.creator_id, "gig published");

        tokio::time::sleep(SUBMIT_CONFIRMATION_DELAY).await;
        Ok(job)
    }

    /// Publishes an AI-structured posting from the admin console. The
    /// processed payload goes through the same validation as a member
    /// submission, so an empty extraction is rejected here rather than
    /// stored half-filled.
    pub async fn publish_processed(
        &self,
        processed: AiProcessedJob,
        identity: &Claims,
    ) -> Result<Job> {
        let payload = processed.into_submission()?;
        let record = self.normalize(payload, identity, true)?;
        let job = self.store.create(record).await?;
        info!(job_id = %job.id, "admin gig published");
        Ok(job)
    }

    fn normalize(
        &self,
        payload: SubmitJobPayload,
        claims: &Claims,
        is_admin_posted: bool,
    ) -> Result<NewJobRecord> {
        payload.validate()?;

        Ok(NewJobRecord {
            title: payload.title,
            company: payload.company,
            description: payload.description,
            requirements: none_if_blank(payload.requirements),
            procedure: none_if_blank(payload.procedure),
            location: payload.location,
            job_type: payload.job_type,
            category: payload.category,
            salary: none_if_blank(payload.salary),
            posted_at: Utc::now(),
            is_admin_posted,
            tags: split_tags(&payload.tags),
            creator_id: claims.user_id()?,
            creator_name: claims.display_handle(),
            logo: none_if_blank(payload.logo),
            whatsapp: none_if_blank(payload.whatsapp),
            phone: none_if_blank(payload.phone),
            email: none_if_blank(payload.email),
            link: none_if_blank(payload.link),
        })
    }

    /// Ordered snapshot run through the listing filter engine.
    pub async fn list(&self, query: JobListQuery) -> Result<Vec<Job>> {
        let jobs = self.store.list_all().await?;
        let criteria = FilterCriteria::from(query);
        Ok(filter_service::filter_jobs(jobs, &criteria))
    }

    pub async fn get(&self, id: uuid::Uuid) -> Result<Job> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Gig not found".to_string()))
    }

    pub async fn my_jobs(&self, claims: &Claims) -> Result<Vec<Job>> {
        self.store.list_by_creator(claims.user_id()?).await
    }

    /// Only the creator or an admin may remove a posting. Deleting an id
    /// that no longer exists succeeds quietly, so two racing deletes both
    /// resolve without an error.
    pub async fn delete(&self, id: uuid::Uuid, claims: &Claims) -> Result<()> {
        let Some(job) = self.store.get(id).await? else {
            return Ok(());
        };

        let is_creator = job.creator_id == claims.user_id()?;
        let is_admin = claims.role_parsed() == Some(Role::Admin);
        if !is_creator && !is_admin {
            warn!(job_id = %id, "delete refused for non-owner");
            return Err(Error::Permission(
                "Only the creator or an admin can remove this gig".to_string(),
            ));
        }

        self.store.delete(id).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.store.count().await
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;
    use crate::store::memory::MemoryJobStore;
    use uuid::Uuid;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
            role: Some(role.into()),
            exp: usize::MAX,
        }
    }

    fn payload() -> SubmitJobPayload {
        SubmitJobPayload {
            title: "Sales Ninja".into(),
            company: "Acme".into(),
            location: "Lagos, Ikeja".into(),
            description: "Close deals".into(),
            job_type: JobType::Gig,
            category: "Sales".into(),
            salary: None,
            requirements: None,
            procedure: None,
            tags: "".into(),
            whatsapp: None,
            phone: None,
            email: None,
            link: None,
            logo: None,
        }
    }

    fn service() -> JobService {
        JobService::new(Arc::new(MemoryJobStore::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn submit_requires_an_identity_regardless_of_payload() {
        let err = service().submit(payload(), None).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_stamps_creator_and_posting_metadata() {
        let user = claims("EMPLOYER");
        let job = service().submit(payload(), Some(&user)).await.unwrap();

        assert!(!job.is_admin_posted);
        assert_eq!(job.creator_id.to_string(), user.sub);
        assert_eq!(job.creator_name, "Ada");
        assert!(job.tags.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_falls_back_to_email_without_a_display_name() {
        let mut user = claims("EMPLOYEE");
        user.name = None;
        let job = service().submit(payload(), Some(&user)).await.unwrap();
        assert_eq!(job.creator_name, "ada@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn submit_splits_the_raw_tag_string() {
        let user = claims("EMPLOYEE");
        let mut p = payload();
        p.tags = "a, b ,, c".into();
        let job = service().submit(p, Some(&user)).await.unwrap();
        assert_eq!(job.tags, vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn delete_is_restricted_to_creator_or_admin() {
        let svc = service();
        let owner = claims("EMPLOYEE");
        let job = svc.submit(payload(), Some(&owner)).await.unwrap();

        let stranger = claims("EMPLOYEE");
        let err = svc.delete(job.id, &stranger).await.unwrap_err();
        assert!(matches!(err, Error::Permission(_)));

        let admin = claims("ADMIN");
        svc.delete(job.id, &admin).await.unwrap();
        assert!(matches!(svc.get(job.id).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn store_failures_surface_as_retryable_errors() {
        let mut store = crate::store::MockJobStore::new();
        store
            .expect_create()
            .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));
        let svc = JobService::new(Arc::new(store));

        let user = claims("EMPLOYEE");
        let err = svc.submit(payload(), Some(&user)).await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test(start_paused = true)]
    async fn racing_deletes_of_the_same_id_both_succeed() {
        let svc = service();
        let owner = claims("EMPLOYEE");
        let job = svc.submit(payload(), Some(&owner)).await.unwrap();

        svc.delete(job.id, &owner).await.unwrap();
        svc.delete(job.id, &owner).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn list_applies_the_filter_engine_over_the_snapshot() {
        let svc = service();
        let owner = claims("EMPLOYEE");
        svc.submit(payload(), Some(&owner)).await.unwrap();
        let mut abuja = payload();
        abuja.location = "Abuja, Garki".into();
        abuja.title = "Cook".into();
        svc.submit(abuja, Some(&owner)).await.unwrap();

        let query = JobListQuery {
            state: Some("Lagos".into()),
            ..Default::default()
        };
        let jobs = svc.list(query).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].location, "Lagos, Ikeja");
    }
}

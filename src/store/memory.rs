//! In-memory store implementations.
//!
//! Back the integration test suites and local development without Postgres,
//! honoring the same contracts as the SQL implementations: snapshot
//! republish after every write, idempotent delete, additive profile merges.

use crate::error::{Error, Result};
use crate::models::job::{Job, NewJobRecord};
use crate::models::profile::{NewProfile, PortfolioItem, Profile};
use crate::store::{FeedHub, JobStore, ProfileStore};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<Mutex<Vec<Job>>>,
    feed: FeedHub,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot_locked(jobs: &[Job]) -> Vec<Job> {
        let mut ordered = jobs.to_vec();
        ordered.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        ordered
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, record: NewJobRecord) -> Result<Job> {
        let job = record.into_job(Uuid::new_v4());
        let snapshot = {
            let mut jobs = self.jobs.lock().expect("job store mutex poisoned");
            jobs.push(job.clone());
            Self::snapshot_locked(&jobs)
        };
        self.feed.publish(Arc::new(snapshot));
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let snapshot = {
            let mut jobs = self.jobs.lock().expect("job store mutex poisoned");
            let before = jobs.len();
            jobs.retain(|job| job.id != id);
            if jobs.len() == before {
                return Ok(());
            }
            Self::snapshot_locked(&jobs)
        };
        self.feed.publish(Arc::new(snapshot));
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        let jobs = self.jobs.lock().expect("job store mutex poisoned");
        Ok(jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Job>> {
        let jobs = self.jobs.lock().expect("job store mutex poisoned");
        Ok(Self::snapshot_locked(&jobs))
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Job>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|job| job.creator_id == creator_id)
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        let jobs = self.jobs.lock().expect("job store mutex poisoned");
        Ok(jobs.len() as i64)
    }

    fn feed(&self) -> &FeedHub {
        &self.feed
    }
}

#[derive(Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<Mutex<Vec<Profile>>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create(&self, profile: NewProfile) -> Result<Profile> {
        let mut profiles = self.profiles.lock().expect("profile store mutex poisoned");
        if profiles
            .iter()
            .any(|existing| existing.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(Error::BadRequest(
                "An account with this email already exists".to_string(),
            ));
        }
        let created = profile.into_profile(Uuid::new_v4(), Utc::now());
        profiles.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        let profiles = self.profiles.lock().expect("profile store mutex poisoned");
        Ok(profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let profiles = self.profiles.lock().expect("profile store mutex poisoned");
        Ok(profiles
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn add_portfolio_item(&self, user_id: Uuid, item: PortfolioItem) -> Result<Profile> {
        let mut profiles = self.profiles.lock().expect("profile store mutex poisoned");
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == user_id)
            .ok_or_else(|| Error::NotFound("Profile not found".to_string()))?;
        profile.portfolio.push(item);
        Ok(profile.clone())
    }

    async fn follow(&self, follower: Uuid, target: Uuid) -> Result<()> {
        let mut profiles = self.profiles.lock().expect("profile store mutex poisoned");
        if !profiles.iter().any(|p| p.id == target) {
            return Err(Error::NotFound("Profile not found".to_string()));
        }
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == follower) {
            if !profile.following.contains(&target) {
                profile.following.push(target);
            }
        }
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == target) {
            if !profile.followers.contains(&follower) {
                profile.followers.push(follower);
            }
        }
        Ok(())
    }

    async fn unfollow(&self, follower: Uuid, target: Uuid) -> Result<()> {
        let mut profiles = self.profiles.lock().expect("profile store mutex poisoned");
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == follower) {
            profile.following.retain(|id| *id != target);
        }
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == target) {
            profile.followers.retain(|id| *id != follower);
        }
        Ok(())
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: String) -> Result<()> {
        let mut profiles = self.profiles.lock().expect("profile store mutex poisoned");
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == user_id)
            .ok_or_else(|| Error::NotFound("Profile not found".to_string()))?;
        profile.password_hash = hash;
        Ok(())
    }
}

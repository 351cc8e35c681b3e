//! Postgres-backed store implementations.
//!
//! Queries are runtime-checked and go through row structs so column types
//! stay decoupled from the domain models. Writes republish the full ordered
//! collection to the feed hub, matching the snapshot contract the in-memory
//! store honors.

use crate::error::{Error, Result};
use crate::models::job::{Job, JobType, NewJobRecord};
use crate::models::profile::{NewProfile, PortfolioItem, Profile, Role};
use crate::store::{FeedHub, JobStore, ProfileStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, title, company, description, requirements, procedure, location, \
     job_type, category, salary, posted_at, is_admin_posted, tags, creator_id, creator_name, \
     logo, whatsapp, phone, email, link";

const PROFILE_COLUMNS: &str = "id, display_name, email, role, bio, institution, skills, \
     portfolio, following, followers, business_name, business_address, is_legally_registered, \
     contact_phone, created_at, password_hash";

#[derive(Debug, FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    company: String,
    description: String,
    requirements: Option<String>,
    procedure: Option<String>,
    location: String,
    job_type: String,
    category: String,
    salary: Option<String>,
    posted_at: DateTime<Utc>,
    is_admin_posted: bool,
    tags: Vec<String>,
    creator_id: Uuid,
    creator_name: String,
    logo: Option<String>,
    whatsapp: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    link: Option<String>,
}

impl TryFrom<JobRow> for Job {
    type Error = Error;

    fn try_from(row: JobRow) -> Result<Job> {
        let job_type = JobType::parse(&row.job_type)
            .ok_or_else(|| Error::Internal(format!("Unknown job type in store: {}", row.job_type)))?;
        Ok(Job {
            id: row.id,
            title: row.title,
            company: row.company,
            description: row.description,
            requirements: row.requirements,
            procedure: row.procedure,
            location: row.location,
            job_type,
            category: row.category,
            salary: row.salary,
            posted_at: row.posted_at,
            is_admin_posted: row.is_admin_posted,
            tags: row.tags,
            creator_id: row.creator_id,
            creator_name: row.creator_name,
            logo: row.logo,
            whatsapp: row.whatsapp,
            phone: row.phone,
            email: row.email,
            link: row.link,
        })
    }
}

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
    feed: FeedHub,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            feed: FeedHub::new(),
        }
    }

    async fn republish(&self) -> Result<()> {
        let snapshot = self.list_all().await?;
        self.feed.publish(Arc::new(snapshot));
        Ok(())
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, record: NewJobRecord) -> Result<Job> {
        let query = format!(
            "INSERT INTO jobs (
                title, company, description, requirements, procedure, location,
                job_type, category, salary, posted_at, is_admin_posted, tags,
                creator_id, creator_name, logo, whatsapp, phone, email, link
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19)
            RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(&record.title)
            .bind(&record.company)
            .bind(&record.description)
            .bind(&record.requirements)
            .bind(&record.procedure)
            .bind(&record.location)
            .bind(record.job_type.as_str())
            .bind(&record.category)
            .bind(&record.salary)
            .bind(record.posted_at)
            .bind(record.is_admin_posted)
            .bind(&record.tags)
            .bind(record.creator_id)
            .bind(&record.creator_name)
            .bind(&record.logo)
            .bind(&record.whatsapp)
            .bind(&record.phone)
            .bind(&record.email)
            .bind(&record.link)
            .fetch_one(&self.pool)
            .await?;

        let job = Job::try_from(row)?;
        self.republish().await?;
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            self.republish().await?;
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Job::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Job>> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY posted_at DESC");
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Job>> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE creator_id = $1 ORDER BY posted_at DESC"
        );
        let rows = sqlx::query_as::<_, JobRow>(&query)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    fn feed(&self) -> &FeedHub {
        &self.feed
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    display_name: String,
    email: String,
    role: String,
    bio: Option<String>,
    institution: Option<String>,
    skills: Vec<String>,
    portfolio: serde_json::Value,
    following: Vec<Uuid>,
    followers: Vec<Uuid>,
    business_name: Option<String>,
    business_address: Option<String>,
    is_legally_registered: Option<bool>,
    contact_phone: Option<String>,
    created_at: DateTime<Utc>,
    password_hash: String,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = Error;

    fn try_from(row: ProfileRow) -> Result<Profile> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| Error::Internal(format!("Unknown role in store: {}", row.role)))?;
        let portfolio: Vec<PortfolioItem> = serde_json::from_value(row.portfolio)?;
        Ok(Profile {
            id: row.id,
            display_name: row.display_name,
            email: row.email,
            role,
            bio: row.bio,
            institution: row.institution,
            skills: row.skills,
            portfolio,
            following: row.following,
            followers: row.followers,
            business_name: row.business_name,
            business_address: row.business_address,
            is_legally_registered: row.is_legally_registered,
            contact_phone: row.contact_phone,
            created_at: row.created_at,
            password_hash: row.password_hash,
        })
    }
}

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create(&self, profile: NewProfile) -> Result<Profile> {
        let query = format!(
            "INSERT INTO users (
                display_name, email, role, password_hash,
                business_name, business_address, is_legally_registered, contact_phone
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            RETURNING {PROFILE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(&profile.display_name)
            .bind(&profile.email)
            .bind(profile.role.as_str())
            .bind(&profile.password_hash)
            .bind(&profile.business_name)
            .bind(&profile.business_address)
            .bind(profile.is_legally_registered)
            .bind(&profile.contact_phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                let duplicate = err
                    .as_database_error()
                    .and_then(|db| db.code())
                    .map(|code| code == "23505")
                    .unwrap_or(false);
                if duplicate {
                    Error::BadRequest("An account with this email already exists".to_string())
                } else {
                    Error::from(err)
                }
            })?;
        Profile::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Profile::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE lower(email) = lower($1)");
        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Profile::try_from).transpose()
    }

    async fn add_portfolio_item(&self, user_id: Uuid, item: PortfolioItem) -> Result<Profile> {
        let query = format!(
            "UPDATE users SET portfolio = portfolio || $2::jsonb WHERE id = $1
             RETURNING {PROFILE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(user_id)
            .bind(serde_json::to_value(&item)?)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Profile not found".to_string()))?;
        Profile::try_from(row)
    }

    async fn follow(&self, follower: Uuid, target: Uuid) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(target)
            .fetch_one(&self.pool)
            .await?;
        if !exists {
            return Err(Error::NotFound("Profile not found".to_string()));
        }

        sqlx::query(
            "UPDATE users SET following = array_append(following, $2)
             WHERE id = $1 AND NOT (following @> ARRAY[$2]::uuid[])",
        )
        .bind(follower)
        .bind(target)
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "UPDATE users SET followers = array_append(followers, $2)
             WHERE id = $1 AND NOT (followers @> ARRAY[$2]::uuid[])",
        )
        .bind(target)
        .bind(follower)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn unfollow(&self, follower: Uuid, target: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET following = array_remove(following, $2) WHERE id = $1")
            .bind(follower)
            .bind(target)
            .execute(&self.pool)
            .await?;

        sqlx::query("UPDATE users SET followers = array_remove(followers, $2) WHERE id = $1")
            .bind(target)
            .bind(follower)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_password_hash(&self, user_id: Uuid, hash: String) -> Result<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Profile not found".to_string()));
        }
        Ok(())
    }
}

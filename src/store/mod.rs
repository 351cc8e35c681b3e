pub mod feed;
pub mod memory;
pub mod postgres;

use crate::error::Result;
use crate::models::job::{Job, NewJobRecord};
use crate::models::profile::{NewProfile, PortfolioItem, Profile};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

pub use feed::{FeedHub, JobSnapshot};

/// Access to the job collection. Implementations must publish the full
/// ordered collection to their [`FeedHub`] after every successful write, so
/// subscribers only ever observe complete snapshots.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Appends one record, assigning its identifier exactly once.
    async fn create(&self, record: NewJobRecord) -> Result<Job>;

    /// Removes one record. Deleting an unknown identifier is a silent no-op,
    /// so two racing deletes of the same id both succeed.
    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn get(&self, id: Uuid) -> Result<Option<Job>>;

    /// Full collection ordered by posting timestamp, newest first.
    async fn list_all(&self) -> Result<Vec<Job>>;

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Job>>;

    async fn count(&self) -> Result<i64>;

    fn feed(&self) -> &FeedHub;
}

/// Access to the account collection. Mutations are additive merges; role and
/// creation timestamp never change after sign-up.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, profile: NewProfile) -> Result<Profile>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>>;

    async fn add_portfolio_item(&self, user_id: Uuid, item: PortfolioItem) -> Result<Profile>;

    async fn follow(&self, follower: Uuid, target: Uuid) -> Result<()>;

    async fn unfollow(&self, follower: Uuid, target: Uuid) -> Result<()>;

    async fn set_password_hash(&self, user_id: Uuid, hash: String) -> Result<()>;
}

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::profile_dto::AddPortfolioItemPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::profile::{PortfolioItem, Profile};
use crate::store::ProfileStore;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: Uuid) -> Result<Profile> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Profile not found".to_string()))
    }

    pub async fn me(&self, claims: &Claims) -> Result<Profile> {
        self.get(claims.user_id()?).await
    }

    /// Appends one portfolio item; existing items are never touched.
    pub async fn add_portfolio_item(
        &self,
        claims: &Claims,
        payload: AddPortfolioItemPayload,
    ) -> Result<Profile> {
        payload.validate()?;
        let item = PortfolioItem {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            image_url: payload.image_url,
            description: payload.description,
            link: payload.link,
        };
        self.store.add_portfolio_item(claims.user_id()?, item).await
    }

    pub async fn follow(&self, claims: &Claims, target: Uuid) -> Result<()> {
        let follower = claims.user_id()?;
        if follower == target {
            return Err(Error::BadRequest("You cannot follow yourself".to_string()));
        }
        self.store.follow(follower, target).await
    }

    pub async fn unfollow(&self, claims: &Claims, target: Uuid) -> Result<()> {
        self.store.unfollow(claims.user_id()?, target).await
    }
}

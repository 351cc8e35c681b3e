use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{PortfolioItem, Profile, Role};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub id: uuid::Uuid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub bio: Option<String>,
    pub institution: Option<String>,
    pub skills: Vec<String>,
    pub portfolio: Vec<PortfolioItem>,
    pub following: Vec<uuid::Uuid>,
    pub followers: Vec<uuid::Uuid>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub is_legally_registered: Option<bool>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddPortfolioItemPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "image url is required"))]
    pub image_url: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            display_name: value.display_name,
            email: value.email,
            role: value.role,
            bio: value.bio,
            institution: value.institution,
            skills: value.skills,
            portfolio: value.portfolio,
            following: value.following,
            followers: value.followers,
            business_name: value.business_name,
            business_address: value.business_address,
            is_legally_registered: value.is_legally_registered,
            contact_phone: value.contact_phone,
            created_at: value.created_at,
        }
    }
}

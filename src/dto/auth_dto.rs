use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::profile_dto::ProfileResponse;
use crate::models::profile::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct SignUpPayload {
    #[validate(length(min = 1, message = "display name is required"))]
    pub display_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub is_legally_registered: Option<bool>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct SignInPayload {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub profile: ProfileResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ResetRequestPayload {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
}

/// The reset token is handed back to the caller; delivery (mail, SMS) is the
/// operator's concern, not this service's.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResetRequestResponse {
    pub reset_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ResetConfirmPayload {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub new_password: String,
}

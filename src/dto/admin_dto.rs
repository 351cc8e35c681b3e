use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ProcessJobPayload {
    /// Raw text as pasted from WhatsApp, email, or a website.
    #[validate(length(min = 1, message = "raw text is required"))]
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct GenerateLogoPayload {
    #[validate(length(min = 1, message = "company name is required"))]
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GenerateLogoResponse {
    /// Data URI of the synthesized logo, or null when generation failed —
    /// logo synthesis is best-effort and never blocks publishing.
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BoardStatsResponse {
    pub total_jobs: i64,
    pub status: String,
}

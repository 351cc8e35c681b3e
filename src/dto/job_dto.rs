use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{Job, JobType};

/// Submission form payload. `tags` arrives as a single comma-delimited
/// string, exactly as the posting form sends it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct SubmitJobPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(default)]
    pub category: String,
    pub salary: Option<String>,
    pub requirements: Option<String>,
    pub procedure: Option<String>,
    #[serde(default)]
    pub tags: String,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct JobResponse {
    pub id: uuid::Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Option<String>,
    pub procedure: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: String,
    pub salary: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub is_admin_posted: bool,
    pub tags: Vec<String>,
    pub creator_id: uuid::Uuid,
    pub creator_name: String,
    pub logo: Option<String>,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: usize,
}

/// Listing filters; every field is optional and absent means "any".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub category: Option<String>,
    pub state: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            description: value.description,
            requirements: value.requirements,
            procedure: value.procedure,
            location: value.location,
            job_type: value.job_type,
            category: value.category,
            salary: value.salary,
            posted_at: value.posted_at,
            is_admin_posted: value.is_admin_posted,
            tags: value.tags,
            creator_id: value.creator_id,
            creator_name: value.creator_name,
            logo: value.logo,
            whatsapp: value.whatsapp,
            phone: value.phone,
            email: value.email,
            link: value.link,
        }
    }
}

impl From<Vec<Job>> for JobListResponse {
    fn from(value: Vec<Job>) -> Self {
        let items: Vec<JobResponse> = value.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SubmitJobPayload {
        serde_json::from_value(serde_json::json!({
            "title": "Sales Ninja",
            "company": "Acme",
            "location": "Lagos, Ikeja",
            "description": "Close deals",
            "type": "Gig",
            "category": "Sales",
            "tags": ""
        }))
        .unwrap()
    }

    #[test]
    fn accepts_all_required_fields_and_empty_tags() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn rejects_when_any_required_field_is_missing() {
        for field in ["title", "company", "location", "description"] {
            let mut p = payload();
            match field {
                "title" => p.title.clear(),
                "company" => p.company.clear(),
                "location" => p.location.clear(),
                _ => p.description.clear(),
            }
            assert!(p.validate().is_err(), "{field} should be required");
        }
    }

    #[test]
    fn unknown_job_type_fails_to_deserialize() {
        let result: Result<SubmitJobPayload, _> = serde_json::from_value(serde_json::json!({
            "title": "T",
            "company": "C",
            "location": "L",
            "description": "D",
            "type": "Internship"
        }));
        assert!(result.is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Engagement type of a posting. The wire strings are the ones the board has
/// always used; they double as the stored representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Gig")]
    Gig,
    #[serde(rename = "Service")]
    Service,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Gig => "Gig",
            JobType::Service => "Service",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Full-time" => Some(JobType::FullTime),
            "Part-time" => Some(JobType::PartTime),
            "Contract" => Some(JobType::Contract),
            "Gig" => Some(JobType::Gig),
            "Service" => Some(JobType::Service),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One posted opportunity. `id` is assigned exactly once by the store,
/// `posted_at` never changes after creation, `tags` is never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Option<String>,
    pub procedure: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub category: String,
    pub salary: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub is_admin_posted: bool,
    pub tags: Vec<String>,
    pub creator_id: Uuid,
    pub creator_name: String,
    pub logo: Option<String>,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
}

/// Fields the caller supplies when appending a job; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewJobRecord {
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Option<String>,
    pub procedure: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub category: String,
    pub salary: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub is_admin_posted: bool,
    pub tags: Vec<String>,
    pub creator_id: Uuid,
    pub creator_name: String,
    pub logo: Option<String>,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
}

impl NewJobRecord {
    pub fn into_job(self, id: Uuid) -> Job {
        Job {
            id,
            title: self.title,
            company: self.company,
            description: self.description,
            requirements: self.requirements,
            procedure: self.procedure,
            location: self.location,
            job_type: self.job_type,
            category: self.category,
            salary: self.salary,
            posted_at: self.posted_at,
            is_admin_posted: self.is_admin_posted,
            tags: self.tags,
            creator_id: self.creator_id,
            creator_name: self.creator_name,
            logo: self.logo,
            whatsapp: self.whatsapp,
            phone: self.phone,
            email: self.email,
            link: self.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_wire_strings_round_trip() {
        for raw in ["Full-time", "Part-time", "Contract", "Gig", "Service"] {
            let parsed = JobType::parse(raw).expect("known type");
            assert_eq!(parsed.as_str(), raw);
        }
        assert!(JobType::parse("Internship").is_none());
    }

    #[test]
    fn job_type_serde_uses_board_labels() {
        let json = serde_json::to_string(&JobType::FullTime).unwrap();
        assert_eq!(json, "\"Full-time\"");
        let back: JobType = serde_json::from_str("\"Gig\"").unwrap();
        assert_eq!(back, JobType::Gig);
    }
}

//! Listing filter engine.
//!
//! Pure, synchronous predicate evaluation over an in-memory collection
//! snapshot. The semantics are deliberately simple and must stay exactly
//! this: case-insensitive substring checks ANDed across the four criteria,
//! with input order preserved. No ranking, no pagination.

use crate::dto::job_dto::JobListQuery;
use crate::models::job::{Job, JobType};

/// Filter criteria; `None` means "any" for that dimension.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub job_type: Option<JobType>,
    pub category: Option<String>,
    pub state: Option<String>,
}

impl From<JobListQuery> for FilterCriteria {
    fn from(query: JobListQuery) -> Self {
        Self {
            search: query.search.filter(|s| !s.is_empty()),
            job_type: query.job_type,
            category: normalize(query.category),
            state: normalize(query.state),
        }
    }
}

/// The UI's "all" sentinel and empty strings both mean "any".
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

pub fn filter_jobs(jobs: Vec<Job>, criteria: &FilterCriteria) -> Vec<Job> {
    jobs.into_iter()
        .filter(|job| matches(job, criteria))
        .collect()
}

fn matches(job: &Job, criteria: &FilterCriteria) -> bool {
    let search_ok = match &criteria.search {
        None => true,
        Some(query) => {
            let q = query.to_lowercase();
            job.title.to_lowercase().contains(&q)
                || job.description.to_lowercase().contains(&q)
                || job.location.to_lowercase().contains(&q)
                || job.tags.iter().any(|tag| tag.to_lowercase().contains(&q))
        }
    };

    let type_ok = match criteria.job_type {
        None => true,
        Some(wanted) => job.job_type == wanted,
    };

    let category_ok = match &criteria.category {
        None => true,
        Some(wanted) => job
            .category
            .to_lowercase()
            .contains(&wanted.to_lowercase()),
    };

    let state_ok = match &criteria.state {
        None => true,
        Some(wanted) => job
            .location
            .to_lowercase()
            .contains(&wanted.to_lowercase()),
    };

    search_ok && type_ok && category_ok && state_ok
}

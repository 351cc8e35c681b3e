pub mod access_service;
pub mod ai_service;
pub mod auth_service;
pub mod filter_service;
pub mod job_service;
pub mod profile_service;

pub mod candidate;
pub mod dashboard;
pub mod email;
pub mod job_description;

pub mod candidate_service;
pub mod dashboard_service;
pub mod email_service;
pub mod ingestion_service;
pub mod job_description_service;
pub mod notification_service;

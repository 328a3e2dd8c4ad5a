pub mod candidate_dto;
pub mod common_dto;
pub mod email_dto;
pub mod ingestion_dto;
pub mod job_description_dto;
pub mod notification_dto;

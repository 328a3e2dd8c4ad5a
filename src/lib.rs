pub mod config;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod stores;
pub mod utils;

use std::sync::Arc;

use crate::gateway::Gateway;
use crate::services::{
    candidate_service::CandidateService, dashboard_service::DashboardService,
    email_service::EmailService, ingestion_service::IngestionService,
    job_description_service::JobDescriptionService, notification_service::NotificationService,
};
use crate::session::DashboardSession;

#[derive(Clone)]
pub struct AppState {
    pub session: DashboardSession,
    pub candidate_service: CandidateService,
    pub email_service: EmailService,
    pub notification_service: NotificationService,
    pub job_description_service: JobDescriptionService,
    pub ingestion_service: IngestionService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let session = DashboardSession::new();

        let candidate_service = CandidateService::new(gateway.clone(), session.clone());
        let email_service = EmailService::new(gateway.clone(), session.clone());
        let notification_service =
            NotificationService::new(gateway.clone(), session.clone(), candidate_service.clone());
        let job_description_service = JobDescriptionService::new(gateway.clone());
        let ingestion_service = IngestionService::new(gateway.clone(), candidate_service.clone());
        let dashboard_service = DashboardService::new(gateway);

        Self {
            session,
            candidate_service,
            email_service,
            notification_service,
            job_description_service,
            ingestion_service,
            dashboard_service,
        }
    }
}

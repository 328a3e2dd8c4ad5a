pub mod candidates;
pub mod dashboard;
pub mod emails;
pub mod health;
pub mod ingestion;
pub mod job_descriptions;
pub mod notifications;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::AppState;

/// Resume uploads are PDFs; keep headroom for several per request.
const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Every JSON action the view layer calls, without static assets or layers.
pub fn dashboard_router() -> Router<AppState> {
    let candidates = Router::new()
        .route("/dashboard/candidates", get(candidates::list_candidates))
        .route(
            "/dashboard/candidates/reload",
            post(candidates::reload_candidates),
        )
        .route(
            "/dashboard/candidates/select-all",
            post(candidates::select_all),
        )
        .route(
            "/dashboard/candidates/selection",
            delete(candidates::clear_selection),
        )
        .route(
            "/dashboard/candidates/:id",
            get(candidates::get_candidate).delete(candidates::delete_candidate),
        )
        .route(
            "/dashboard/candidates/:id/status",
            patch(candidates::update_status),
        )
        .route(
            "/dashboard/candidates/:id/notify",
            post(candidates::notify_candidate),
        )
        .route(
            "/dashboard/candidates/:id/select",
            post(candidates::toggle_selection),
        );

    let notifications = Router::new()
        .route(
            "/dashboard/notifications",
            post(notifications::send_bulk_notifications),
        )
        .route(
            "/dashboard/notifications/preview",
            get(notifications::preview_recipients),
        )
        .route(
            "/dashboard/appointments",
            post(notifications::send_appointment_letters),
        )
        .route(
            "/dashboard/appointments/eligible",
            get(notifications::eligible_for_appointment),
        );

    let job_descriptions = Router::new()
        .route(
            "/dashboard/job-descriptions",
            get(job_descriptions::list_job_descriptions)
                .post(job_descriptions::create_job_description),
        )
        .route(
            "/dashboard/job-descriptions/active",
            get(job_descriptions::active_job_description),
        )
        .route(
            "/dashboard/job-descriptions/upload",
            post(job_descriptions::upload_job_description)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/dashboard/job-descriptions/:id",
            get(job_descriptions::get_job_description),
        )
        .route(
            "/dashboard/job-descriptions/:id/activate",
            post(job_descriptions::activate_job_description),
        );

    let ingestion = Router::new()
        .route("/dashboard/ingestion/sync-drive", post(ingestion::sync_drive))
        .route(
            "/dashboard/ingestion/resumes",
            post(ingestion::upload_resumes).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/dashboard/ingestion/analyze",
            post(ingestion::analyze_resumes),
        );

    let emails = Router::new()
        .route("/dashboard/emails", get(emails::list_emails))
        .route("/dashboard/emails/reload", post(emails::reload_emails))
        .route("/dashboard/emails/select-all", post(emails::select_all))
        .route(
            "/dashboard/emails/selection",
            delete(emails::clear_selection),
        )
        .route("/dashboard/emails/bulk/flag", post(emails::bulk_flag))
        .route("/dashboard/emails/bulk/remove", post(emails::bulk_remove))
        .route("/dashboard/emails/:id", delete(emails::remove_email))
        .route("/dashboard/emails/:id/flag", patch(emails::set_flag))
        .route(
            "/dashboard/emails/:id/select",
            post(emails::toggle_selection),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/session/reset", post(dashboard::reset_session))
        .route("/dashboard/openapi.json", get(dashboard::openapi))
        .merge(candidates)
        .merge(notifications)
        .merge(job_descriptions)
        .merge(ingestion)
        .merge(emails)
}

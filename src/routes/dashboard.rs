use axum::{extract::State, response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::{
    dto::{
        candidate_dto::{InterviewSlot, UpdateStatusPayload},
        common_dto::{Notice, NoticeLevel, SelectAllPayload},
        email_dto::SetFlagPayload,
        job_description_dto::CreateJobDescriptionPayload,
        notification_dto::{AppointmentLetterRequest, BulkNotificationRequest, BulkReport, RecipientMode},
    },
    error::Result,
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        stats,
        reset_session,
        crate::routes::candidates::list_candidates,
        crate::routes::candidates::update_status,
        crate::routes::candidates::notify_candidate,
        crate::routes::candidates::delete_candidate,
        crate::routes::notifications::send_bulk_notifications,
        crate::routes::notifications::send_appointment_letters,
        crate::routes::job_descriptions::create_job_description,
        crate::routes::job_descriptions::active_job_description,
        crate::routes::emails::list_emails,
        crate::routes::emails::set_flag,
        crate::routes::emails::bulk_flag,
        crate::routes::emails::bulk_remove,
    ),
    components(schemas(
        Notice,
        NoticeLevel,
        SelectAllPayload,
        UpdateStatusPayload,
        InterviewSlot,
        SetFlagPayload,
        CreateJobDescriptionPayload,
        RecipientMode,
        BulkNotificationRequest,
        AppointmentLetterRequest,
        BulkReport,
    )),
    tags((name = "dashboard", description = "Resume screening dashboard actions"))
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Aggregate candidate counts and recent analysis jobs", body = serde_json::Value),
        (status = 502, description = "Screening API unreachable")
    )
)]
#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/dashboard/session/reset",
    responses((status = 200, description = "Session stores cleared", body = Notice))
)]
#[axum::debug_handler]
pub async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    state.session.reset().await;
    Json(Notice::info("Dashboard state cleared"))
}

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::notification_dto::{AppointmentLetterRequest, BulkNotificationRequest, BulkReport},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn preview_recipients(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.notification_service.preview().await?;
    Ok(Json(json!({
        "count": candidates.len(),
        "candidates": candidates,
    })))
}

#[utoipa::path(
    post,
    path = "/dashboard/notifications",
    request_body = BulkNotificationRequest,
    responses(
        (status = 200, description = "Per-candidate tally", body = BulkReport),
        (status = 400, description = "Missing slot details or empty selection")
    )
)]
#[axum::debug_handler]
pub async fn send_bulk_notifications(
    State(state): State<AppState>,
    Json(payload): Json<BulkNotificationRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let report = state.notification_service.send_bulk(&payload).await?;
    Ok(Json(report))
}

#[axum::debug_handler]
pub async fn eligible_for_appointment(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.notification_service.eligible().await?;
    Ok(Json(json!({
        "count": candidates.len(),
        "candidates": candidates,
    })))
}

#[utoipa::path(
    post,
    path = "/dashboard/appointments",
    request_body = AppointmentLetterRequest,
    responses(
        (status = 200, description = "Per-candidate tally", body = BulkReport),
        (status = 400, description = "Missing letter details or no recipients")
    )
)]
#[axum::debug_handler]
pub async fn send_appointment_letters(
    State(state): State<AppState>,
    Json(payload): Json<AppointmentLetterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let report = state
        .notification_service
        .send_appointment_letters(&payload)
        .await?;
    Ok(Json(report))
}

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::{
        candidate_dto::{CandidateListQuery, InterviewSlot, UpdateStatusPayload},
        common_dto::{Notice, SelectAllPayload, SelectionResponse},
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn reload_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let loaded = state.candidate_service.reload().await?;
    Ok(Json(json!({
        "loaded": loaded,
        "notice": Notice::info(format!("Loaded {} candidate(s)", loaded)),
    })))
}

#[utoipa::path(
    get,
    path = "/dashboard/candidates",
    params(
        ("search" = Option<String>, Query, description = "Matches name, email or phone"),
        ("status" = Option<String>, Query, description = "Exact status"),
        ("min_score" = Option<String>, Query, description = "Minimum score")
    ),
    responses(
        (status = 200, description = "Filtered roster with selection state", body = serde_json::Value),
        (status = 400, description = "Unknown status")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let filter = if query.is_unset() {
        None
    } else {
        Some(query.into_filter()?)
    };
    Ok(Json(state.candidate_service.view(filter).await))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_candidate(id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    patch,
    path = "/dashboard/candidates/{id}/status",
    params(("id" = i64, Path, description = "Candidate ID")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated and roster refreshed", body = Notice),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Candidate not loaded")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let notice = state
        .candidate_service
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(notice))
}

#[utoipa::path(
    post,
    path = "/dashboard/candidates/{id}/notify",
    params(("id" = i64, Path, description = "Candidate ID")),
    request_body = InterviewSlot,
    responses(
        (status = 200, description = "Interview invitation sent", body = Notice),
        (status = 400, description = "Missing date, time or location")
    )
)]
#[axum::debug_handler]
pub async fn notify_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(slot): Json<InterviewSlot>,
) -> Result<impl IntoResponse> {
    slot.validate()?;
    let notice = state.candidate_service.notify(id, &slot).await?;
    Ok(Json(notice))
}

#[utoipa::path(
    delete,
    path = "/dashboard/candidates/{id}",
    params(("id" = i64, Path, description = "Candidate ID")),
    responses((status = 200, description = "Candidate deleted", body = Notice))
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let notice = state.candidate_service.delete(id).await?;
    Ok(Json(notice))
}

#[axum::debug_handler]
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let selected = state.candidate_service.toggle(id).await?;
    Ok(Json(SelectionResponse::new(selected)))
}

#[axum::debug_handler]
pub async fn select_all(
    State(state): State<AppState>,
    Json(payload): Json<SelectAllPayload>,
) -> impl IntoResponse {
    let selected = state.candidate_service.select_all(payload.checked).await;
    Json(SelectionResponse::new(selected))
}

#[axum::debug_handler]
pub async fn clear_selection(State(state): State<AppState>) -> impl IntoResponse {
    state.candidate_service.clear_selection().await;
    Json(SelectionResponse::<i64>::new(Vec::new()))
}

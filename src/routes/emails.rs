use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::{
        common_dto::{Notice, SelectAllPayload, SelectionResponse},
        email_dto::{EmailListQuery, SetFlagPayload},
    },
    error::Result,
    models::email::EmailFlag,
    AppState,
};

#[axum::debug_handler]
pub async fn reload_emails(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let loaded = state.email_service.reload().await?;
    Ok(Json(json!({
        "loaded": loaded,
        "notice": Notice::info(format!("Loaded {} email(s)", loaded)),
    })))
}

/// Without any filter key the last filtered view is returned as is, so a
/// flag edit stays visible until the filter runs again.
#[utoipa::path(
    get,
    path = "/dashboard/emails",
    params(
        ("search" = Option<String>, Query, description = "Matches subject, sender or summary"),
        ("flag" = Option<String>, Query, description = "spam, not spam, or any stored flag"),
        ("type" = Option<String>, Query, description = "Exact email type"),
        ("intention" = Option<String>, Query, description = "Exact intention"),
        ("min_importance" = Option<String>, Query, description = "Minimum importance score")
    ),
    responses((status = 200, description = "Filtered emails with stats and selection", body = serde_json::Value))
)]
#[axum::debug_handler]
pub async fn list_emails(
    State(state): State<AppState>,
    Query(query): Query<EmailListQuery>,
) -> impl IntoResponse {
    let filter = (!query.is_unset()).then(|| query.into_filter());
    Json(state.email_service.view(filter).await)
}

#[utoipa::path(
    patch,
    path = "/dashboard/emails/{id}/flag",
    params(("id" = String, Path, description = "Email ID")),
    request_body = SetFlagPayload,
    responses(
        (status = 200, description = "Flag changed and collection saved", body = Notice),
        (status = 502, description = "Save failed; the local change is kept")
    )
)]
#[axum::debug_handler]
pub async fn set_flag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetFlagPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let notice = state
        .email_service
        .set_flag(&id, EmailFlag::from(payload.flag.trim()))
        .await?;
    Ok(Json(notice))
}

#[axum::debug_handler]
pub async fn remove_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let notice = state.email_service.remove(&id).await?;
    Ok(Json(notice))
}

#[axum::debug_handler]
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let selected = state.email_service.toggle(&id).await?;
    Ok(Json(SelectionResponse::new(selected)))
}

#[axum::debug_handler]
pub async fn select_all(
    State(state): State<AppState>,
    Json(payload): Json<SelectAllPayload>,
) -> impl IntoResponse {
    let selected = state.email_service.select_all(payload.checked).await;
    Json(SelectionResponse::new(selected))
}

#[axum::debug_handler]
pub async fn clear_selection(State(state): State<AppState>) -> impl IntoResponse {
    state.email_service.clear_selection().await;
    Json(SelectionResponse::<String>::new(Vec::new()))
}

#[utoipa::path(
    post,
    path = "/dashboard/emails/bulk/flag",
    request_body = SetFlagPayload,
    responses((status = 200, description = "Selected emails flagged, or a warning when none are selected", body = Notice))
)]
#[axum::debug_handler]
pub async fn bulk_flag(
    State(state): State<AppState>,
    Json(payload): Json<SetFlagPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let notice = state
        .email_service
        .bulk_set_flag(EmailFlag::from(payload.flag.trim()))
        .await?;
    Ok(Json(notice))
}

#[utoipa::path(
    post,
    path = "/dashboard/emails/bulk/remove",
    responses((status = 200, description = "Selected emails removed, or a warning when none are selected", body = Notice))
)]
#[axum::debug_handler]
pub async fn bulk_remove(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let notice = state.email_service.bulk_remove().await?;
    Ok(Json(notice))
}

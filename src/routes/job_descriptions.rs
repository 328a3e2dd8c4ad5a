use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde_json::json;
use validator::Validate;

use crate::{
    dto::job_description_dto::{CreateJobDescriptionPayload, JobDescriptionResponse},
    error::{Error, Result},
    AppState,
};

#[axum::debug_handler]
pub async fn list_job_descriptions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items: Vec<JobDescriptionResponse> = state
        .job_description_service
        .list()
        .await?
        .into_iter()
        .map(JobDescriptionResponse::from)
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/dashboard/job-descriptions/active",
    responses(
        (status = 200, description = "The active job description, or null", body = serde_json::Value)
    )
)]
#[axum::debug_handler]
pub async fn active_job_description(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let active = state
        .job_description_service
        .active()
        .await?
        .map(JobDescriptionResponse::from);
    Ok(Json(json!({ "active": active })))
}

#[axum::debug_handler]
pub async fn get_job_description(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let item = state.job_description_service.get(id).await?;
    Ok(Json(JobDescriptionResponse::from(item)))
}

#[utoipa::path(
    post,
    path = "/dashboard/job-descriptions",
    request_body = CreateJobDescriptionPayload,
    responses(
        (status = 201, description = "Created and activated", body = serde_json::Value),
        (status = 400, description = "Title and description are required")
    )
)]
#[axum::debug_handler]
pub async fn create_job_description(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobDescriptionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let created = state.job_description_service.create_text(&payload).await?;
    Ok((StatusCode::CREATED, Json(JobDescriptionResponse::from(created))))
}

/// Multipart form with a `title` text field and a `file` PDF part.
#[axum::debug_handler]
pub async fn upload_job_description(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut title = String::new();
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                file = Some((file_name, data));
            }
            other => tracing::debug!(field = other, "Ignoring unexpected form field"),
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| Error::BadRequest("No file provided".to_string()))?;
    let created = state
        .job_description_service
        .upload_pdf(&title, &file_name, data)
        .await?;
    Ok((StatusCode::CREATED, Json(JobDescriptionResponse::from(created))))
}

#[axum::debug_handler]
pub async fn activate_job_description(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let activated = state.job_description_service.set_active(id).await?;
    Ok(Json(JobDescriptionResponse::from(activated)))
}

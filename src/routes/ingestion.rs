use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn sync_drive(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let outcome = state.ingestion_service.sync_drive().await?;
    Ok(Json(outcome))
}

/// Every `file` (or `files`) part is uploaded on its own.
#[axum::debug_handler]
pub async fn upload_resumes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if !matches!(field.name(), Some("file") | Some("files")) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        files.push((file_name, data));
    }

    let report = state.ingestion_service.upload_resumes(files).await?;
    Ok(Json(report))
}

#[axum::debug_handler]
pub async fn analyze_resumes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let outcome = state.ingestion_service.analyze().await?;
    Ok(Json(outcome))
}

//! Managed file API handlers
//!
//! HTTP endpoints for listing, reading, creating, updating and deleting the
//! text files in the storage directory. Uses the file service layer for the
//! filesystem work.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for listing files
#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    /// Names of the managed files, in directory order
    pub files: Vec<String>,
}

/// Acknowledgement for a successful write or delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// Request to create a file
#[derive(Debug, Deserialize)]
pub struct CreateFileRequest {
    /// Name of the new file
    pub filename: Option<String>,
    /// Initial content, empty when omitted
    #[serde(default)]
    pub content: Option<String>,
}

/// Request to replace a file's content
#[derive(Debug, Deserialize)]
pub struct UpdateFileRequest {
    /// New content; required, but may be empty
    pub content: Option<String>,
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
}

/// GET /files - List managed files
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListFilesResponse>, AppError> {
    let files = state.files.list_files().await?;
    Ok(Json(ListFilesResponse { files }))
}

/// GET /files/:filename - Read a file as plain text
pub async fn read_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<String, AppError> {
    state.files.read_file(&filename).await
}

/// POST /files - Create a new file
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateFileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(request) = payload.map_err(invalid_body)?;

    let filename = request
        .filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Filename is required".to_string()))?;
    let content = request.content.unwrap_or_default();

    state.files.create_file(&filename, &content).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("File {} created", filename),
        }),
    ))
}

/// PUT /files/:filename - Overwrite an existing file
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    payload: Result<Json<UpdateFileRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload.map_err(invalid_body)?;

    let content = request
        .content
        .ok_or_else(|| AppError::InvalidRequest("Content is required".to_string()))?;

    state.files.update_file(&filename, &content).await?;

    Ok(Json(MessageResponse {
        message: format!("File {} updated", filename),
    }))
}

/// DELETE /files/:filename - Remove a file
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.files.delete_file(&filename).await?;

    Ok(Json(MessageResponse {
        message: format!("File {} deleted", filename),
    }))
}

//! Route handlers.
//!
//! Each handler reads its whole form, checks file names, then runs the
//! synchronous processing on the blocking pool.

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use super::router::AppState;
use super::upload::{DOCUMENT_FIELD, SELECTION_FIELD, SPREADSHEET_FIELD, UploadForm};
use crate::processor::{TablePreview, TableSelection};

/// MIME type of the returned document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// File name offered for the returned document.
pub const OUTPUT_FILE_NAME: &str = "termo_referencia_modificado.docx";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub message: &'static str,
    pub valid: bool,
}

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Document processing API is running",
    })
}

/// `POST /identificar-tabelas/`
pub async fn identify_tables(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<TablePreview>>, ApiError> {
    let mut form = UploadForm::read(multipart?).await?;
    let document = form
        .take(DOCUMENT_FIELD)?
        .expect_extension(".docx", "File must be of type .docx")?;

    let previews = tokio::task::spawn_blocking(move || {
        state.processor.identify_tables(&document)
    })
    .await??;

    Ok(Json(previews))
}

/// `POST /substituir-tabelas/`
pub async fn substitute_tables(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::read(multipart?).await?;
    let document = form
        .take(DOCUMENT_FIELD)?
        .expect_extension(".docx", "Terms of reference must be a .docx file")?;
    let spreadsheet = form
        .take(SPREADSHEET_FIELD)?
        .expect_extension(".xlsx", "Items table must be a .xlsx file")?;
    let selection = TableSelection::from_json(&form.take_text(SELECTION_FIELD)?)?;

    let output = tokio::task::spawn_blocking(move || {
        state
            .processor
            .process_documents(&document, &spreadsheet, &selection)
    })
    .await??;

    info!(bytes = output.len(), "returning modified document");
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", OUTPUT_FILE_NAME),
            ),
        ],
        output,
    )
        .into_response())
}

/// `POST /validar-excel/`
pub async fn validate_spreadsheet(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let mut form = UploadForm::read(multipart?).await?;
    let spreadsheet = form
        .take(SPREADSHEET_FIELD)?
        .expect_extension(".xlsx", "File must be of type .xlsx")?;

    tokio::task::spawn_blocking(move || state.processor.validate_spreadsheet(&spreadsheet))
        .await??;

    Ok(Json(ValidationResponse {
        message: "File is valid",
        valid: true,
    }))
}

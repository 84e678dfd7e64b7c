use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::autofill::ApplicationForm;
use crate::document::{validate_upload, DocumentKind};
use crate::errors::AppError;
use crate::resume::{extract_data_from_text, ExtractedData};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeResponse {
    pub upload_id: Uuid,
    pub file_name: Option<String>,
    pub mime_type: String,
    pub found_fields: Vec<&'static str>,
    pub extracted: ExtractedData,
    pub parsed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillResponse {
    pub upload_id: Uuid,
    pub form: ApplicationForm,
    pub filled_fields: Vec<&'static str>,
    pub extracted: ExtractedData,
}

/// A file part pulled out of a multipart body.
struct UploadedFile {
    file_name: Option<String>,
    mime_type: String,
    bytes: Bytes,
}

#[derive(Default)]
struct ResumeUpload {
    file: Option<UploadedFile>,
    form: Option<ApplicationForm>,
}

/// POST /api/v1/resume/extract
pub async fn handle_extract(Json(req): Json<ExtractRequest>) -> Json<ExtractedData> {
    Json(extract_data_from_text(&req.raw_text))
}

/// POST /api/v1/resume/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| AppError::Validation("Missing 'file' part".to_string()))?;

    let upload_id = Uuid::new_v4();
    let extracted = extract_upload(&state, upload_id, &file).await?;

    Ok(Json(ParseResumeResponse {
        upload_id,
        file_name: file.file_name,
        mime_type: file.mime_type,
        found_fields: extracted.found_fields(),
        extracted,
        parsed_at: Utc::now(),
    }))
}

/// POST /api/v1/resume/autofill
pub async fn handle_autofill(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AutofillResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| AppError::Validation("Missing 'file' part".to_string()))?;

    let upload_id = Uuid::new_v4();
    let extracted = extract_upload(&state, upload_id, &file).await?;

    let mut form = upload.form.unwrap_or_default();
    if let Some(name) = &file.file_name {
        form.attach_resume(name);
    }
    let filled_fields = form.apply_extracted(&extracted);

    Ok(Json(AutofillResponse {
        upload_id,
        form,
        filled_fields,
        extracted,
    }))
}

async fn extract_upload(
    state: &AppState,
    upload_id: Uuid,
    file: &UploadedFile,
) -> Result<ExtractedData, AppError> {
    validate_upload(
        &file.mime_type,
        file.bytes.len(),
        state.config.max_upload_bytes,
    )?;

    let text = state
        .documents
        .extract_text(file.bytes.clone(), &file.mime_type)
        .await?;
    let extracted = extract_data_from_text(&text);

    info!(
        %upload_id,
        mime = %file.mime_type,
        found = ?extracted.found_fields(),
        "resume parsed"
    );

    Ok(extracted)
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_owned);
                let mime_type = upload_mime_type(field.content_type(), file_name.as_deref());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload.file = Some(UploadedFile {
                    file_name,
                    mime_type,
                    bytes,
                });
            }
            Some("form") => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let form = serde_json::from_slice::<ApplicationForm>(&bytes)
                    .map_err(|e| AppError::Validation(format!("Invalid 'form' part: {e}")))?;
                upload.form = Some(form);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// The part's declared type, unless it is missing or generic; then the extension decides.
fn upload_mime_type(content_type: Option<&str>, file_name: Option<&str>) -> String {
    match content_type {
        Some(ct) if !ct.is_empty() && !ct.starts_with("application/octet-stream") => {
            ct.to_string()
        }
        other => file_name
            .and_then(DocumentKind::from_file_name)
            .map(|kind| kind.mime_type().to_string())
            .or_else(|| other.map(str::to_owned))
            .unwrap_or_default(),
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

//! Multipart parsing for registration submissions

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bistro_core::{constants::IMAGE_FIELD, models::CreateBusinessRequest, AppError};
use bistro_processing::TempUpload;
use std::path::Path;

/// Text fields and the optional spooled image of one multipart submission.
pub struct MultipartSubmission {
    pub fields: CreateBusinessRequest,
    pub image: Option<TempUpload>,
}

/// Map a body read failure onto 413 or 400.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read every part of the form. At most one `image` file part is accepted; it
/// is streamed to a temp file in `temp_dir`. Unknown parts, including a text
/// part named `image`, are ignored.
pub async fn extract_multipart_submission(
    mut multipart: Multipart,
    temp_dir: &Path,
) -> Result<MultipartSubmission, AppError> {
    let mut fields = CreateBusinessRequest::default();
    let mut image: Option<TempUpload> = None;
    let mut image_seen = false;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGE_FIELD && field.file_name().is_some() {
            if image_seen {
                return Err(AppError::BadRequest(
                    "Multiple image fields are not allowed; send at most one field named 'image'"
                        .to_string(),
                ));
            }
            image_seen = true;

            let upload = spool_to_temp(field, temp_dir).await?;
            // An empty file part counts as no file.
            if !upload.is_empty() {
                image = Some(upload);
            }
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            if !fields.set_field(&field_name, value) {
                tracing::debug!(field = %field_name, "Ignoring unknown form field");
            }
        }
    }

    Ok(MultipartSubmission { fields, image })
}

async fn spool_to_temp(mut field: Field<'_>, temp_dir: &Path) -> Result<TempUpload, AppError> {
    let mut upload = TempUpload::new_in(temp_dir, field.file_name())
        .map_err(|e| AppError::Storage(format!("{:#}", e)))?;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        upload
            .write_chunk(&chunk)
            .await
            .map_err(|e| AppError::Storage(format!("{:#}", e)))?;
    }
    upload
        .finish()
        .await
        .map_err(|e| AppError::Storage(format!("{:#}", e)))?;

    tracing::debug!(
        path = %upload.path().display(),
        original_filename = ?upload.original_filename(),
        size_bytes = upload.size_bytes(),
        "Upload spooled to temp file"
    );

    Ok(upload)
}

/// Normalize MIME type by stripping parameters (e.g. "multipart/form-data; boundary=x" -> "multipart/form-data").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

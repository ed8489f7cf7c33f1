use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use bistro_core::{
    constants::DERIVATIVE_EXTENSION,
    models::{BusinessRecord, CreateBusinessRequest},
    AppError,
};
use bistro_processing::TempUpload;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_submission, normalize_mime_type};

pub const REGISTRATION_ERROR: &str = "Error processing the business registration";

/// A registration submission in any of the accepted encodings.
///
/// Only multipart bodies can carry an image.
pub struct RegistrationForm {
    pub fields: CreateBusinessRequest,
    pub image: Option<TempUpload>,
}

impl FromRequest<Arc<AppState>> for RegistrationForm {
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(normalize_mime_type)
            .unwrap_or_default();

        match content_type.as_str() {
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                    AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
                })?;
                let submission =
                    extract_multipart_submission(multipart, &state.upload.temp_dir).await?;
                Ok(RegistrationForm {
                    fields: submission.fields,
                    image: submission.image,
                })
            }
            "application/json" => {
                let Json(fields) = Json::<CreateBusinessRequest>::from_request(req, state)
                    .await
                    .map_err(|e| body_rejection(e.status(), e.body_text()))?;
                Ok(RegistrationForm {
                    fields,
                    image: None,
                })
            }
            "application/x-www-form-urlencoded" => {
                let Form(fields) = Form::<CreateBusinessRequest>::from_request(req, state)
                    .await
                    .map_err(|e| body_rejection(e.status(), e.body_text()))?;
                Ok(RegistrationForm {
                    fields,
                    image: None,
                })
            }
            other => Err(AppError::BadRequest(format!(
                "Unsupported content type '{}'; use multipart/form-data, application/json or application/x-www-form-urlencoded",
                other
            ))
            .into()),
        }
    }
}

fn body_rejection(status: StatusCode, body_text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(body_text)
    } else {
        AppError::BadRequest(format!("Invalid request body: {}", body_text))
    }
}

/// Register a business
///
/// Accepts the five required text fields and an optional `image` file. The
/// image is resized to the configured max width, re-encoded to WebP and served
/// under `/uploads`.
#[utoipa::path(
    post,
    path = "/api/business",
    tag = "business",
    request_body(content = CreateBusinessRequest, content_type = "multipart/form-data", description = "Business fields plus an optional `image` file. JSON and urlencoded bodies are accepted without the image."),
    responses(
        (status = 201, description = "Business registered", body = BusinessRecord),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 413, description = "Body too large", body = ErrorResponse),
        (status = 500, description = "Image processing or persistence failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, form), fields(operation = "register_business"))]
pub async fn register_business(
    State(state): State<Arc<AppState>>,
    form: Result<RegistrationForm, HttpAppError>,
) -> Result<(StatusCode, Json<BusinessRecord>), HttpAppError> {
    let form = form.map_err(|e| {
        e.context(REGISTRATION_ERROR)
            .for_environment(state.production)
    })?;

    let record = create_business(&state, form).await.map_err(|e| {
        HttpAppError::from(e)
            .context(REGISTRATION_ERROR)
            .for_environment(state.production)
    })?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn create_business(
    state: &AppState,
    form: RegistrationForm,
) -> Result<BusinessRecord, AppError> {
    let RegistrationForm { fields, image } = form;

    // Reject before touching the image so a 400 leaves nothing behind.
    fields.validate()?;

    let stored = match image {
        Some(upload) => {
            let normalized = state.normalizer.normalize_file(upload.path()).await?;
            let stored = state
                .storage
                .store(DERIVATIVE_EXTENSION, &normalized.data)
                .await?;

            if let Err(e) = upload.remove() {
                tracing::warn!(error = %e, "Failed to remove temp upload");
            }
            Some(stored)
        }
        None => None,
    };

    let new_business = fields.into_new_business(stored.as_ref().map(|s| s.url.clone()));

    match state.store.save(new_business).await {
        Ok(record) => {
            tracing::info!(
                business_id = %record.id,
                image = ?record.image,
                "Business registered"
            );
            Ok(record)
        }
        Err(e) => {
            if let Some(stored) = stored {
                if let Err(cleanup_err) = state.storage.delete(&stored.key).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        storage_key = %stored.key,
                        "Failed to cleanup derivative image after DB error"
                    );
                }
            }
            Err(e)
        }
    }
}

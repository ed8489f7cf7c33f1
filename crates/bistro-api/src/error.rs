//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Server-side failures can carry a
//! handler-level message (e.g. "Error fetching menu") that replaces the generic
//! client message; client errors always report their own message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bistro_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable summary
    pub message: String,
    /// Underlying error detail
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    message: Option<&'static str>,
    production: bool,
}

impl HttpAppError {
    /// Attach the message reported for server-side failures of this operation.
    pub fn context(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// In production the `error` field carries only the client message.
    pub fn for_environment(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    fn response_message(&self) -> String {
        match self.message {
            Some(message) if !self.error.is_client_error() => message.to_string(),
            _ => self.error.client_message(),
        }
    }
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError {
            error,
            message: None,
            production: false,
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.error);

        // The error chain can name paths and hosts; production only gets the summary.
        let error = if self.production {
            self.error.client_message()
        } else {
            self.error.detailed_message()
        };

        let body = Json(ErrorResponse {
            message: self.response_message(),
            error,
            code: self.error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

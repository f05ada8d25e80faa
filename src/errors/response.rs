use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::kind::ErrorKind;
use super::messages::MessageMap;
use super::structured::StructuredError;
use crate::config::Config;

/// Structured error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Unique identifier of this occurrence, for correlating logs
    pub identifier: String,
    /// Error code for programmatic handling
    pub code: ErrorKind,
    /// HTTP status code
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Message groups keyed by field or topic
    #[schema(value_type = Object)]
    pub messages: MessageMap,
    /// Text of the underlying cause, only when exposing causes is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorResponse {
    pub fn from_error(err: &StructuredError, config: &Config) -> Self {
        let cause = if config.expose_cause {
            err.source().map(|source| source.to_string())
        } else {
            None
        };

        Self {
            identifier: Uuid::new_v4().to_string(),
            code: err.kind(),
            status: err.status_code(),
            message: err.message().to_string(),
            messages: err.messages().clone(),
            cause,
        }
    }

    /// Replace the generated identifier, e.g. with an incoming request ID
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Convert using an explicit config instead of [`Config::global`]
    pub fn render(err: &StructuredError, config: &Config) -> Response {
        let body = Self::from_error(err, config);
        body.log(config);
        body.into_http()
    }

    fn log(&self, config: &Config) {
        if self.code.is_server_error() {
            error!(
                identifier = %self.identifier,
                code = %self.code,
                status = self.status,
                groups = self.messages.len(),
                "{}", self.message
            );
        } else if config.log_client_errors {
            warn!(
                identifier = %self.identifier,
                code = %self.code,
                status = self.status,
                groups = self.messages.len(),
                "{}", self.message
            );
        }
    }

    fn into_http(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}

impl From<&StructuredError> for ErrorResponse {
    fn from(err: &StructuredError) -> Self {
        Self::from_error(err, Config::global())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        self.log(Config::global());
        self.into_http()
    }
}

impl IntoResponse for StructuredError {
    fn into_response(self) -> Response {
        ErrorResponse::render(&self, Config::global())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Kinds of structured errors.
///
/// A kind only selects constants: the default base message, the machine
/// readable code and the HTTP status code used at transport boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed or otherwise unacceptable input
    BadRequest,

    /// Input failed validation rules
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,

    /// Missing or invalid credentials
    Unauthorized,

    /// Authenticated but not allowed
    Forbidden,

    /// Requested resource does not exist
    NotFound,

    /// Request conflicts with the current state of a resource
    Conflict,

    /// Rate limit exceeded
    TooManyRequests,

    /// Unexpected failure
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,

    /// Dependency or service temporarily down
    ServiceUnavailable,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        Self::BadRequest,
        Self::Validation,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::TooManyRequests,
        Self::Internal,
        Self::ServiceUnavailable,
    ];

    /// Stable code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Validation => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::Internal => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get HTTP status code for this kind
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::TooManyRequests => 429,
            Self::Internal => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Base message used when an error is built without one
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request.",
            Self::Validation => "One or more validation errors occurred.",
            Self::Unauthorized => "Access denied.",
            Self::Forbidden => "Access to the resource is forbidden.",
            Self::NotFound => "Resource not found.",
            Self::Conflict => "The request conflicts with the current state of the resource.",
            Self::TooManyRequests => "Too many requests.",
            Self::Internal => "An unexpected error occurred.",
            Self::ServiceUnavailable => "The service is temporarily unavailable.",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

//! Crate-wide error type and its HTTP rendering.
//!
//! Every fallible operation in the service returns [`AppError`]. The variant
//! carries the error kind; [`AppError::status_code`] maps the kind to an HTTP
//! status and [`IntoResponse`] renders the JSON error envelope:
//!
//! ```json
//! { "error": { "code": "inactive", "message": "Inactive URL", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::{TOKEN_CONSTRAINT, USERNAME_CONSTRAINT, unique_violation_constraint};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The reachability probe rejected the long URL.
    #[error("{reason}")]
    InvalidSite { reason: String },

    #[error("URL '{token}' doesn't exist")]
    UnknownToken { token: String },

    #[error("Inactive URL")]
    Inactive,

    #[error("Url expired")]
    Expired,

    #[error("User already exists")]
    UserExists,

    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// No session credential was presented at all.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Two requests raced for the same freshly allocated token and the store
    /// rejected the second insert.
    #[error("Short token '{token}' was allocated concurrently")]
    TokenCollision { token: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_site(reason: impl Into<String>) -> Self {
        Self::InvalidSite {
            reason: reason.into(),
        }
    }

    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken {
            token: token.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidSite { .. } | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::UnknownToken { .. } => StatusCode::NOT_FOUND,
            AppError::Inactive | AppError::Expired => StatusCode::GONE,
            AppError::UserExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::TokenCollision { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidSite { .. } => "invalid_site",
            AppError::UnknownToken { .. } => "unknown_token",
            AppError::Inactive => "inactive",
            AppError::Expired => "expired",
            AppError::UserExists => "user_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::TokenExpired => "token_expired",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Validation { .. } => "validation_error",
            AppError::TokenCollision { .. } => "token_collision",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::InvalidSite { reason } => json!({ "reason": reason }),
            AppError::UnknownToken { token } | AppError::TokenCollision { token } => {
                json!({ "token": token })
            }
            AppError::Validation { details, .. } | AppError::Internal { details, .. } => {
                details.clone()
            }
            _ => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        }

        let mut response = (
            status,
            Json(ErrorBody {
                error: self.to_error_info(),
            }),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Cookie"),
            );
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match unique_violation_constraint(&e).as_deref() {
            Some(USERNAME_CONSTRAINT) => return AppError::UserExists,
            Some(TOKEN_CONSTRAINT) => {
                return AppError::TokenCollision {
                    token: String::new(),
                };
            }
            _ => {}
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Validation failed", Value::Object(details))
    }
}

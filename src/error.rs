use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::fmt;
use thiserror::Error as ThisError;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, ThisError)]
pub enum ConfkeepError {
    #[error("Config not found")]
    NotFound,

    #[error("Config already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] figment::Error),
}

impl IntoResponse for ConfkeepError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            ConfkeepError::NotFound => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "Config not found".to_string(),
                },
            ),
            ConfkeepError::AlreadyExists => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "ALREADY_EXISTS".to_string(),
                    message: "Config already exists".to_string(),
                },
            ),
            ConfkeepError::DatabaseError(_) | ConfkeepError::ConfigError(_) => {
                error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Errors raised by the schema-driven validator.
#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No schema reference found for endpoint: {0}")]
    MissingSchemaRef(String),

    #[error("Schema '{0}' not found in models.")]
    UnknownSchema(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("{model} validation failed: {issues}")]
    Validation { model: String, issues: FieldIssues },
}

/// A single rejected field in a validated payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldIssues(pub Vec<FieldIssue>);

impl FieldIssues {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.push(FieldIssue {
            field: field.into(),
            reason: reason.into(),
        });
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|i| i.field.as_str())
    }
}

impl fmt::Display for FieldIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|i| format!("{}: {}", i.field, i.reason))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

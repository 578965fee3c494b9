use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    /// The containment query for a member's messages failed.
    #[error("failed to retrieve messages: {0}")]
    Retrieval(#[source] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Slack answered with `ok: false`.
    #[error("slack api error: {0}")]
    Slack(String),

    #[error("slack request failed: {0}")]
    SlackTransport(#[from] reqwest::Error),

    #[error("unknown member: {0}")]
    UnknownMember(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid window: oldest {oldest} is after latest {latest}")]
    InvalidWindow { oldest: i64, latest: i64 },
}

pub type AppResult<T> = Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnknownMember(_) => StatusCode::NOT_FOUND,
            AppError::InvalidDate(_) | AppError::InvalidWindow { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            return HttpResponse::build(status).json(json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(status).json(json!({
            "message": self.to_string()
        }))
    }
}

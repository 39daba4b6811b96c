use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

use crate::model::RecordCategory;

#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// Driver errors are passed through to the caller as-is.
    #[display(fmt = "{}", _0)]
    Database(#[error(source)] sqlx::Error),

    #[display(fmt = "Unknown record category: {}", _0)]
    UnknownCategory(#[error(not(source))] String),

    #[display(fmt = "No record {} in {}", id, category)]
    NotFound { category: RecordCategory, id: u64 },

    #[display(fmt = "{}", _0)]
    BadRequest(#[error(not(source))] String),

    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnknownCategory(_) | ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InvalidCredentials => HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": self.to_string()
            })),
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
            }
            _ => HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() })),
        }
    }
}

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::core::llm::error::LlmError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("AI service not configured: {0}")]
    AiNotConfigured(String),

    #[error("AI returned invalid data, please retry: {0}")]
    AiBadResponse(String),
}

impl AppError {
    /// Map a service-layer error onto an API category. The LLM taxonomy stays
    /// distinct so clients can tell "not configured" from "retry".
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<AppError>() {
            Ok(app) => return app,
            Err(err) => err,
        };

        if let Some(llm) = err.downcast_ref::<LlmError>() {
            return match llm {
                LlmError::NotConfigured => AppError::AiNotConfigured(llm.to_string()),
                LlmError::EmptyResponse
                | LlmError::InvalidJson(_)
                | LlmError::InvalidShape(_) => AppError::AiBadResponse(llm.to_string()),
                LlmError::Transport(_) => AppError::InternalServerError(llm.to_string()),
            };
        }

        if err.downcast_ref::<validator::ValidationErrors>().is_some() {
            return AppError::BadRequest(err.to_string());
        }

        AppError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AiNotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::AiBadResponse(_) => StatusCode::BAD_GATEWAY,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

use axum::{http::StatusCode, Json};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::genai::ExtractError;

/// Failure taxonomy for the generation endpoints: bad input, a model
/// response we could not turn into structured data, or anything else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("malformed model output")]
    MalformedModelOutput(#[from] ExtractError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Wire shape of every error response: a generic client-facing message,
/// plus the underlying diagnostic outside production.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedModelOutput(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert into the handler rejection, logging the diagnostic and
    /// deciding whether the client gets to see it.
    pub fn response(self, config: &AppConfig) -> (StatusCode, Json<ErrorBody>) {
        let status = self.status();
        let (message, details) = match self {
            ApiError::BadRequest(msg) => {
                warn!(%msg, "rejected request input");
                (msg, None)
            }
            ApiError::MalformedModelOutput(e) => {
                error!(error = %e, "failed to extract structured model output");
                ("Failed to process API response".into(), Some(e.to_string()))
            }
            ApiError::Internal(e) => {
                error!(error = %e, "generation request failed");
                ("Internal server error".into(), Some(format!("{e:#}")))
            }
        };

        let details = if config.expose_error_details() {
            details
        } else {
            None
        };

        (status, Json(ErrorBody { error: message, details }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_failures_map_to_bad_gateway() {
        let parse = ExtractError::Parse(serde_json::from_str::<serde_json::Value>("nope").unwrap_err());
        assert_eq!(
            ApiError::from(parse).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(ExtractError::MissingKey("recipe")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn bad_input_and_internal_map_to_400_and_500() {
        assert_eq!(
            ApiError::BadRequest("Image data is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_omits_absent_details() {
        let body = ErrorBody {
            error: "Internal server error".into(),
            details: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("details"));
    }
}

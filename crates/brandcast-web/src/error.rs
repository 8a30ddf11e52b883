//! HTTP-facing error type.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use brandcast_common::BrandcastError;
use tracing::{error, warn};

#[derive(thiserror::Error, Debug)]
pub enum WebError {
    /// Missing or unknown form input.
    #[error("{0}")]
    BadRequest(String),

    /// The analysis pipeline failed.
    #[error("Analysis failed: {0}")]
    Pipeline(BrandcastError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Server setup failed before serving.
    #[error("Startup error: {0}")]
    Startup(String),
}

impl From<BrandcastError> for WebError {
    fn from(err: BrandcastError) -> Self {
        match err {
            BrandcastError::Validation { message, .. } => Self::BadRequest(message),
            other => Self::Pipeline(other),
        }
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(_) | Self::Template(_) | Self::Task(_) | Self::Startup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        let body = format!(
            "<!DOCTYPE html><html><head><title>Brandcast</title></head>\
             <body><h1>{} {}</h1><p>{}</p><p><a href=\"/\">Back</a></p></body></html>",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            handlebars::html_escape(&self.to_string()),
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = WebError::from(BrandcastError::validation_field("unknown brand 'Puma'", "brand"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "unknown brand 'Puma'");
    }

    #[test]
    fn test_inference_maps_to_server_error() {
        let err = WebError::from(BrandcastError::inference("shape mismatch"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("shape mismatch"));
    }

    #[test]
    fn test_message_is_escaped() {
        let response = WebError::BadRequest("<script>".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

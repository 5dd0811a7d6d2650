//! HTTP response types and error mapping
//!
//! Every failure reaching a client passes through [`handle_error`]. Upstream
//! detail is logged here and replaced by a fixed client message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::AppError;

pub const MSG_URL_REQUIRED: &str = "URL required";
pub const MSG_RESOLVE_REJECTED: &str = "Gagal mengambil data.";
pub const MSG_SERVER_ERROR: &str = "Server Error / Timeout";
pub const MSG_NO_URL: &str = "No URL";
pub const MSG_STREAM_FAILED: &str = "Gagal Stream.";

/// Failure body of the JSON endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }
}

/// Convert an AppError into the client response.
///
/// Resolution and validation failures answer with the JSON [`ApiResponse`]
/// of `/api/download`; relay failures answer in plain text, as
/// `/api/stream` does.
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => {
            info!("Rejected request: {}", message);
            (StatusCode::BAD_REQUEST, message.clone())
        }
        AppError::Upstream(e) if e.is_rejection() => {
            info!("Resolver declined the link: {}", e);
            (StatusCode::OK, MSG_RESOLVE_REJECTED.to_string())
        }
        AppError::Upstream(e) => {
            error!("Resolution failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR.to_string())
        }
        AppError::Relay(e) if e.is_client_error() => {
            info!("Rejected stream request: {}", e);
            return (StatusCode::BAD_REQUEST, MSG_NO_URL).into_response();
        }
        AppError::Relay(e) => {
            warn!("Stream failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, MSG_STREAM_FAILED).into_response();
        }
        AppError::Configuration { .. } => {
            error!("{}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR.to_string())
        }
    };

    (status, Json(ApiResponse::error(message))).into_response()
}

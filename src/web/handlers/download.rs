//! `POST /api/download`

use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::web::{handle_error, responses::MSG_URL_REQUIRED, AppState};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Resolve a media page URL into a normalized download manifest.
///
/// The body may be JSON or a urlencoded form. One that is missing,
/// unreadable, or lacks a non-empty `url` is a 400; resolver outcomes are
/// mapped by [`handle_error`].
pub async fn resolve_download(State(state): State<AppState>, request: Request) -> Response {
    let url = match read_url(request, &state).await {
        Some(url) => url,
        None => return handle_error(AppError::validation(MSG_URL_REQUIRED)),
    };

    match state.resolver.resolve(&url).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => handle_error(e.into()),
    }
}

async fn read_url(request: Request, state: &AppState) -> Option<String> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

    let payload = if is_form {
        Form::<DownloadRequest>::from_request(request, state)
            .await
            .map(|Form(body)| body)
            .map_err(|rejection| rejection.body_text())
    } else {
        Json::<DownloadRequest>::from_request(request, state)
            .await
            .map(|Json(body)| body)
            .map_err(|rejection| rejection.body_text())
    };

    match payload {
        Ok(body) => body.url.filter(|url| !url.is_empty()),
        Err(reason) => {
            debug!("Unreadable download request body: {}", reason);
            None
        }
    }
}

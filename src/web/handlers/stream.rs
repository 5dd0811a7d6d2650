//! `GET /api/stream`

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::errors::RelayError;
use crate::web::{handle_error, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct StreamParams {
    pub url: Option<String>,
    pub name: Option<String>,
}

/// Relay `url` to the client as an attachment called `name`
pub async fn relay_stream(
    State(state): State<AppState>,
    params: Result<Query<StreamParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            return handle_error(
                RelayError::InvalidQuery {
                    message: rejection.body_text(),
                }
                .into(),
            )
        }
    };

    let Some(url) = params.url.filter(|u| !u.is_empty()) else {
        return handle_error(RelayError::MissingUrl.into());
    };

    match state.relay.relay(&url, params.name.as_deref()).await {
        Ok(response) => response,
        Err(e) => handle_error(e.into()),
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::export::ExportError;
use crate::domain::services::search_service::SearchError;

/// Unified handler error: wraps whatever went wrong and maps the few
/// caller-facing failures to 4xx, everything else to 500.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = self.0.to_string();

        let status = if let Some(err) = self.0.downcast_ref::<SearchError>() {
            match err {
                SearchError::InvalidQuery => StatusCode::BAD_REQUEST,
                SearchError::NoSourcesConfigured => StatusCode::SERVICE_UNAVAILABLE,
            }
        } else if let Some(ExportError::UnsupportedFormat(_)) = self.0.downcast_ref::<ExportError>()
        {
            StatusCode::BAD_REQUEST
        } else if error_message.contains("cannot be empty")
            || error_message.contains("invalid")
            || error_message.contains("validation")
        {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

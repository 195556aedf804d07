// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crate::application::dto::search_request::ExportRequestDto;
use crate::application::export::{export_results, ExportError, ExportFormat};
use crate::domain::models::search_result::SearchResult;
use crate::presentation::errors::AppError;

pub async fn export(Json(payload): Json<ExportRequestDto>) -> Result<Json<Value>, AppError> {
    payload
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let format = ExportFormat::from_name(&payload.format)
        .ok_or_else(|| ExportError::UnsupportedFormat(payload.format.clone()))?;

    let results: Vec<SearchResult> = payload.results.into_iter().map(Into::into).collect();
    let data = export_results(&results, format)?;

    Ok(Json(json!({
        "success": true,
        "format": payload.format,
        "data": data,
    })))
}

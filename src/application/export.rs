// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use thiserror::Error;

use crate::domain::models::search_result::SearchResult;

/// Content is capped for transport economy; consumers wanting the full text
/// should read it from the search response instead.
const EXPORT_CONTENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn export_results(results: &[SearchResult], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => export_json(results),
        ExportFormat::Csv => Ok(export_csv(results)),
    }
}

fn export_json(results: &[SearchResult]) -> Result<String, ExportError> {
    let rows: Vec<serde_json::Value> = results
        .iter()
        .map(|result| {
            json!({
                "title": result.title,
                "url": result.url,
                "snippet": result.snippet,
                "content": truncate(&result.content),
                "source": result.source,
                "relevance_score": result.relevance_score,
                "timestamp": result.timestamp.to_rfc3339(),
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

fn export_csv(results: &[SearchResult]) -> String {
    let mut out = String::from("title,url,snippet,content,source,relevance_score,timestamp\n");

    for result in results {
        let content = truncate(&result.content);
        let score = result.relevance_score.to_string();
        let timestamp = result.timestamp.to_rfc3339();
        let fields = [
            result.title.as_str(),
            result.url.as_str(),
            result.snippet.as_str(),
            content.as_str(),
            result.source.as_str(),
            score.as_str(),
            timestamp.as_str(),
        ]
        .map(csv_escape);
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn truncate(content: &str) -> String {
    content.chars().take(EXPORT_CONTENT_MAX_CHARS).collect()
}

/// RFC 4180 quoting: wrap any field containing a comma, quote or newline and
/// double embedded quotes.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

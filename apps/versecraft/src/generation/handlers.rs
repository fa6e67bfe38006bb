//! Axum route handlers for the Sheets API.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::{Language, Topic};
use crate::entitlement::Entitlement;
use crate::errors::AppError;
use crate::export::{ExportArtifact, ExportFormat};
use crate::generation::{GeneratedBatch, GenerationRequest};
use crate::layout::{ComposedSheet, ContentType};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateSheetsBody {
    pub content_type: ContentType,
    #[serde(default = "default_sheet_count")]
    pub sheet_count: usize,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub items_per_sheet: Option<usize>,
    #[serde(default)]
    pub cut_guides: Option<bool>,
}

fn default_sheet_count() -> usize {
    1
}

impl GenerateSheetsBody {
    fn into_request(self) -> Result<GenerationRequest, AppError> {
        let topics = self
            .topics
            .iter()
            .map(|t| t.parse::<Topic>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut request = GenerationRequest::new(self.content_type, self.sheet_count, topics);
        request.language = self
            .language
            .as_deref()
            .map(Language::from_label)
            .unwrap_or_default();
        request.items_per_sheet = self.items_per_sheet;
        if let Some(cut_guides) = self.cut_guides {
            request.cut_guides = cut_guides;
        }
        Ok(request)
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    pub sheets: Vec<ComposedSheet>,
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
pub struct ExportedFile {
    pub filename: String,
    pub mime: String,
    pub data_base64: String,
}

#[derive(Debug, Serialize)]
pub struct ExportListResponse {
    pub files: Vec<ExportedFile>,
}

impl From<&ExportArtifact> for ExportedFile {
    fn from(artifact: &ExportArtifact) -> Self {
        Self {
            filename: artifact.filename.clone(),
            mime: artifact.mime().to_string(),
            data_base64: base64::engine::general_purpose::STANDARD.encode(&artifact.bytes),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<&'static str>,
    pub languages: Vec<&'static str>,
    pub content_types: Vec<ContentTypeInfo>,
}

#[derive(Debug, Serialize)]
pub struct ContentTypeInfo {
    pub name: &'static str,
    pub items_per_sheet: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sheets/generate
///
/// Checks the caller's entitlement, then selects, resolves, captions and
/// composes the requested sheets. Background degradation never fails this call.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GenerateSheetsBody>,
) -> Result<Json<GeneratedBatch>, AppError> {
    let entitlement = Entitlement::from_headers(&headers);
    if !entitlement.allows_generation() {
        return Err(AppError::Forbidden(format!(
            "No generations remaining on the {} plan",
            entitlement.plan
        )));
    }

    let request = body.into_request()?;
    let batch = state.generator.generate(&request).await?;
    info!(
        "Generated batch {} ({} {} sheet(s))",
        batch.id,
        batch.sheets.len(),
        batch.content_type.name()
    );
    Ok(Json(batch))
}

/// POST /api/v1/sheets/export
///
/// One artifact comes back as raw bytes with a download filename; several
/// come back as a JSON list of base64 payloads.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(body): Json<ExportBody>,
) -> Result<Response, AppError> {
    let artifacts = state.exporter.export(&body.sheets, body.format).await?;

    if let [artifact] = artifacts.as_slice() {
        let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
        return Ok((
            [
                (header::CONTENT_TYPE, artifact.mime().to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            artifact.bytes.clone(),
        )
            .into_response());
    }

    let files = artifacts.iter().map(ExportedFile::from).collect();
    Ok(Json(ExportListResponse { files }).into_response())
}

/// GET /api/v1/topics
pub async fn handle_topics() -> Json<TopicsResponse> {
    Json(TopicsResponse {
        topics: Topic::ALL.iter().map(|t| t.label()).collect(),
        languages: [
            Language::English,
            Language::Spanish,
            Language::French,
            Language::Portuguese,
        ]
        .iter()
        .map(|l| l.name())
        .collect(),
        content_types: [ContentType::Stickers, ContentType::Cards, ContentType::Wallpapers]
            .iter()
            .map(|c| ContentTypeInfo {
                name: c.name(),
                items_per_sheet: c.slot_count(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> GenerateSheetsBody {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_body_defaults() {
        let request = body(serde_json::json!({ "content_type": "stickers" }))
            .into_request()
            .unwrap();
        assert_eq!(request.sheet_count, 1);
        assert_eq!(request.language, Language::English);
        assert!(request.topics.is_empty());
        assert!(request.cut_guides);
    }

    #[test]
    fn test_topics_parsed_case_insensitively() {
        let request = body(serde_json::json!({
            "content_type": "cards",
            "topics": ["love", "FAITH", "Hope"],
            "language": "es"
        }))
        .into_request()
        .unwrap();
        assert_eq!(request.topics, vec![Topic::Love, Topic::Faith, Topic::Hope]);
        assert_eq!(request.language, Language::Spanish);
    }

    #[test]
    fn test_unknown_topic_is_a_validation_error() {
        let err = body(serde_json::json!({
            "content_type": "cards",
            "topics": ["love", "serendipity"]
        }))
        .into_request()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("serendipity")));
    }

    #[test]
    fn test_malformed_language_falls_back_to_english() {
        let request = body(serde_json::json!({
            "content_type": "wallpapers",
            "language": "klingon"
        }))
        .into_request()
        .unwrap();
        assert_eq!(request.language, Language::English);
    }
}

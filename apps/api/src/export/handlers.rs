use axum::{extract::State, http::HeaderMap, response::Response, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::document::{derive_file_name, FileFormat};
use crate::errors::{AppError, ExportError};
use crate::export::delivery::deliver;
use crate::layout::{export_paginated_document, LayoutReport};
use crate::models::{ExportOptions, ResumeData, UserType};
use crate::render::{export_flow_document_with_font, export_pdf};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resume: ResumeData,
    #[serde(default)]
    pub user_type: UserType,
    /// Partial options; keys that are absent keep the configured defaults.
    #[serde(default)]
    pub options: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct FileNameResponse {
    pub pdf: String,
    pub doc: String,
}

impl ExportRequest {
    fn validate(self, state: &AppState) -> Result<(ResumeData, UserType, ExportOptions), AppError> {
        if self.resume.name.trim().is_empty() {
            return Err(AppError::Validation("resume.name is required".to_string()));
        }
        let options = match self.options {
            Some(overrides) => state
                .config
                .default_options
                .with_overrides(overrides)
                .map_err(|e| AppError::Validation(format!("invalid options: {e}")))?,
            None => state.config.default_options.clone(),
        };
        Ok((self.resume, self.user_type, options))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/export/pdf
/// Lays out the resume on A4 pages and returns the PDF as a download.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let (resume, user_type, options) = req.validate(&state)?;
    let export_id = Uuid::new_v4();
    let file_name = derive_file_name(&resume, FileFormat::Pdf);

    let span = info_span!("pdf_export", %export_id, user_type = user_type.as_str());
    let bytes = tokio::task::spawn_blocking(move || {
        span.in_scope(|| export_pdf(&resume, user_type, &options))
    })
    .await
    .map_err(|e| ExportError::PdfUnexpected(format!("export task failed: {e}")))??;

    info!(
        %export_id,
        user_type = user_type.as_str(),
        bytes = bytes.len(),
        "PDF export complete"
    );

    Ok(deliver(&headers, FileFormat::Pdf, &file_name, bytes))
}

/// POST /api/v1/export/flow
/// Returns the Word-compatible HTML document as a `.doc` download.
pub async fn handle_export_flow(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let (resume, user_type, options) = req.validate(&state)?;
    let export_id = Uuid::new_v4();
    let file_name = derive_file_name(&resume, FileFormat::Doc);

    let markup = tokio::task::spawn_blocking(move || {
        export_flow_document_with_font(&resume, user_type, options.font_family)
    })
    .await
    .map_err(|e| ExportError::Flow(format!("export task failed: {e}")))??;

    info!(
        %export_id,
        user_type = user_type.as_str(),
        bytes = markup.len(),
        "Word export complete"
    );

    Ok(deliver(&headers, FileFormat::Doc, &file_name, markup))
}

/// POST /api/v1/export/filename
pub async fn handle_file_name(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<FileNameResponse>, AppError> {
    let (resume, _, _) = req.validate(&state)?;
    Ok(Json(FileNameResponse {
        pdf: derive_file_name(&resume, FileFormat::Pdf),
        doc: derive_file_name(&resume, FileFormat::Doc),
    }))
}

/// POST /api/v1/export/preview
/// Runs layout only and reports where the page breaks fell.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<LayoutReport>, AppError> {
    let (resume, user_type, options) = req.validate(&state)?;

    let report = tokio::task::spawn_blocking(move || {
        export_paginated_document(&resume, user_type, &options).report()
    })
    .await
    .map_err(|e| anyhow::anyhow!("layout task failed: {e}"))?;

    info!(
        user_type = user_type.as_str(),
        pages = report.page_count,
        "Layout preview complete"
    );

    Ok(Json(report))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::font_metrics::FontFamily;
    use crate::models::Template;

    fn state_with_defaults(default_options: ExportOptions) -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                max_body_bytes: 1024 * 1024,
                default_options,
            },
        }
    }

    fn compact_times() -> ExportOptions {
        ExportOptions {
            template: Template::Compact,
            font_family: FontFamily::Times,
            ..ExportOptions::default()
        }
    }

    fn request(body: Value) -> ExportRequest {
        serde_json::from_value(body).unwrap()
    }

    // ── validate ──

    #[test]
    fn test_missing_options_use_configured_defaults() {
        let state = state_with_defaults(compact_times());
        let req = request(serde_json::json!({ "resume": { "name": "Jane Doe" } }));
        let (_, user_type, options) = req.validate(&state).unwrap();
        assert_eq!(user_type, UserType::Experienced);
        assert_eq!(options, compact_times());
    }

    #[test]
    fn test_partial_options_are_layered_over_configured_defaults() {
        let state = state_with_defaults(compact_times());
        let req = request(serde_json::json!({
            "resume": { "name": "Jane Doe" },
            "options": { "bodyTextSize": 9 }
        }));
        let (_, _, options) = req.validate(&state).unwrap();
        assert_eq!(options.template, Template::Compact);
        assert_eq!(options.font_family, FontFamily::Times);
        assert_eq!(options.body_text_size, 9.0);
    }

    #[test]
    fn test_unrecognized_option_value_is_a_validation_error() {
        let state = state_with_defaults(ExportOptions::default());
        let req = request(serde_json::json!({
            "resume": { "name": "Jane Doe" },
            "options": { "template": "glossy" }
        }));
        assert!(matches!(req.validate(&state), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let state = state_with_defaults(ExportOptions::default());
        let req = request(serde_json::json!({ "resume": { "name": "   " } }));
        assert!(matches!(req.validate(&state), Err(AppError::Validation(_))));
    }
}

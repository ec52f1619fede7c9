use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::builder::build_structure;
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetter;
use crate::models::resume::{ResumeSource, ResumeStructure};
use crate::models::template::{
    ColorPreset, DocumentKind, OutputFormat, Template, TemplateConfig,
};
use crate::render::{
    document_file_name, synthesize_cover_letter, synthesize_resume, RenderedDocument,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub source: ResumeSource,
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub source: ResumeSource,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub color: ColorPreset,
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub letter: CoverLetter,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub color: ColorPreset,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub uses_color: bool,
}

#[derive(Debug, Serialize)]
pub struct ColorInfo {
    pub id: &'static str,
    pub hex: String,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateInfo>,
    pub colors: Vec<ColorInfo>,
    pub formats: Vec<OutputFormat>,
}

/// GET /api/v1/documents/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: Template::ALL
            .iter()
            .map(|t| TemplateInfo {
                id: t.slug(),
                name: t.display_name(),
                uses_color: *t == Template::Modern,
            })
            .collect(),
        colors: ColorPreset::ALL
            .iter()
            .map(|c| ColorInfo {
                id: c.name(),
                hex: format!("#{}", c.rgb().hex()),
            })
            .collect(),
        formats: vec![OutputFormat::Pdf, OutputFormat::Docx],
    })
}

/// POST /api/v1/documents/preview
pub async fn handle_preview(
    Json(req): Json<PreviewRequest>,
) -> Result<Json<ResumeStructure>, AppError> {
    validate_source(&req.source)?;
    let today = Local::now().date_naive();
    let structure = build_structure(&req.source, today);
    if structure.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No resume content could be extracted from the source".to_string(),
        ));
    }
    Ok(Json(structure))
}

/// POST /api/v1/documents/resume
pub async fn handle_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Response, AppError> {
    validate_source(&req.source)?;
    let config = TemplateConfig::new(req.template, req.color);
    let format = req.format;
    let geometry = state.geometry;
    let today = Local::now().date_naive();

    let document = tokio::task::spawn_blocking(move || {
        let resume = build_structure(&req.source, today);
        synthesize_resume(&resume, &config, format, &geometry)
    })
    .await
    .map_err(|e| anyhow::anyhow!("synthesis task failed: {e}"))??;

    Ok(attachment(document, DocumentKind::Resume, config.template, today))
}

/// POST /api/v1/documents/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Response, AppError> {
    let config = TemplateConfig::new(req.template, req.color);
    let format = req.format;
    let geometry = state.geometry;
    let today = Local::now().date_naive();

    let document = tokio::task::spawn_blocking(move || {
        synthesize_cover_letter(&req.letter, &config, format, &geometry, today)
    })
    .await
    .map_err(|e| anyhow::anyhow!("synthesis task failed: {e}"))??;

    Ok(attachment(
        document,
        DocumentKind::CoverLetter,
        config.template,
        today,
    ))
}

/// Raw prose must contain something; the other sources degrade to empty sections.
fn validate_source(source: &ResumeSource) -> Result<(), AppError> {
    match source {
        ResumeSource::Text { raw_text } if raw_text.trim().is_empty() => Err(
            AppError::Validation("raw_text must not be blank".to_string()),
        ),
        _ => Ok(()),
    }
}

fn attachment(
    document: RenderedDocument,
    kind: DocumentKind,
    template: Template,
    date: NaiveDate,
) -> Response {
    let file_name = document_file_name(kind, template, document.format, date);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        document.bytes,
    )
        .into_response()
}

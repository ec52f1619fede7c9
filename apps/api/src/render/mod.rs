//! Document synthesis: layout plus serialization, one call per document.
//!
//! Nothing is cached between calls. Every call lays the structure out again
//! and owns its cursors, so concurrent calls share no state.

pub mod docx;
pub mod page_writer;
pub mod pdf;

use chrono::NaiveDate;
use tracing::info;

use crate::errors::SynthesisError;
use crate::layout::block::DocumentLayout;
use crate::layout::cover_letter::layout_cover_letter;
use crate::layout::geometry::PageGeometry;
use crate::layout::strategy_for;
use crate::models::cover_letter::CoverLetter;
use crate::models::resume::ResumeStructure;
use crate::models::template::{OutputFormat, TemplateConfig};

pub use crate::models::template::document_file_name;

/// Serialized bytes plus what the caller needs to label them.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    /// Page count, known only for PDF; Word paginates on open.
    pub pages: Option<usize>,
}

pub fn synthesize_resume(
    resume: &ResumeStructure,
    config: &TemplateConfig,
    format: OutputFormat,
    geometry: &PageGeometry,
) -> Result<RenderedDocument, SynthesisError> {
    if resume.is_empty() {
        return Err(SynthesisError::EmptyDocument);
    }
    let layout = strategy_for(config.template).layout(resume, config, geometry);
    let document = serialize(&layout, format)?;
    info!(
        template = config.template.slug(),
        color = config.color.name(),
        %format,
        bytes = document.bytes.len(),
        pages = ?document.pages,
        "Synthesized resume"
    );
    Ok(document)
}

pub fn synthesize_cover_letter(
    letter: &CoverLetter,
    config: &TemplateConfig,
    format: OutputFormat,
    geometry: &PageGeometry,
    date: NaiveDate,
) -> Result<RenderedDocument, SynthesisError> {
    if letter.is_empty() {
        return Err(SynthesisError::EmptyDocument);
    }
    let layout = layout_cover_letter(letter, config, geometry, date);
    let document = serialize(&layout, format)?;
    info!(
        template = config.template.slug(),
        %format,
        bytes = document.bytes.len(),
        pages = ?document.pages,
        "Synthesized cover letter"
    );
    Ok(document)
}

fn serialize(layout: &DocumentLayout, format: OutputFormat) -> Result<RenderedDocument, SynthesisError> {
    match format {
        OutputFormat::Pdf => {
            let pdf = pdf::render_pdf(layout)?;
            Ok(RenderedDocument {
                format,
                bytes: pdf.bytes,
                pages: Some(pdf.pages),
            })
        }
        OutputFormat::Docx => Ok(RenderedDocument {
            format,
            bytes: docx::render_docx(layout)?,
            pages: None,
        }),
    }
}

//! Structure Builder
//!
//! Turns any accepted input into the canonical [`ResumeStructure`]:
//! - structured payloads pass through untouched;
//! - guided-builder forms go through [`form::build_from_form`], enriched by AI prose;
//! - raw prose goes through the classifier and [`text::build_from_text`].
//!
//! Missing sections never fail; they come back empty.

pub mod form;
pub mod matching;
pub mod providers;
pub mod text;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::resume::{ResumeSource, ResumeStructure};

pub fn build_structure(source: &ResumeSource, today: NaiveDate) -> ResumeStructure {
    let structure = match source {
        ResumeSource::Structured { resume } => resume.clone(),
        ResumeSource::Form { form, ai_text } => {
            form::build_from_form(form, ai_text.as_deref(), today)
        }
        ResumeSource::Text { raw_text } => text::build_from_text(raw_text),
    };

    debug!(
        source = source.kind(),
        experience = structure.experience.len(),
        education = structure.education.len(),
        "Built resume structure"
    );
    structure
}

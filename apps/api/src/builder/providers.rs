//! Content providers: explicit priority chains for summary and achievement text.
//!
//! Each provider answers "do you have content for this slot?" and the chain
//! returns the first non-empty answer. Order is the priority: AI prose, then
//! what the user typed, then a synthesized fallback.

use tracing::debug;

use crate::builder::matching::find_job_bullets;
use crate::models::form::{FormExperience, ResumeForm};
use crate::parsing::bullets::split_description;
use crate::parsing::classifier::{RawSectionMap, SUMMARY};
use crate::parsing::normalize::{clean_inline, title_case};
use crate::parsing::Token;

pub trait ContentProvider<T> {
    fn name(&self) -> &'static str;

    /// `None` (or an empty value, via [`IsBlank`]) means "nothing to offer".
    fn provide(&self) -> Option<T>;
}

/// Emptiness check used by [`first_available`].
pub trait IsBlank {
    fn is_blank(&self) -> bool;
}

impl IsBlank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> IsBlank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Evaluates `providers` in order and returns the first non-blank result.
pub fn first_available<T: IsBlank>(providers: &[&dyn ContentProvider<T>]) -> Option<T> {
    for provider in providers {
        if let Some(value) = provider.provide().filter(|v| !v.is_blank()) {
            debug!(provider = provider.name(), "Content provider supplied value");
            return Some(value);
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Summary providers
// ────────────────────────────────────────────────────────────────────────────

/// The AI prose's PROFESSIONAL SUMMARY section.
pub struct AiSummary<'a> {
    pub sections: Option<&'a RawSectionMap>,
}

impl ContentProvider<String> for AiSummary<'_> {
    fn name(&self) -> &'static str {
        "ai_summary"
    }

    fn provide(&self) -> Option<String> {
        let sections = self.sections?;
        Some(join_prose(sections.lines(SUMMARY)))
    }
}

/// The summary the user typed.
pub struct FormSummary<'a> {
    pub form: &'a ResumeForm,
}

impl ContentProvider<String> for FormSummary<'_> {
    fn name(&self) -> &'static str {
        "form_summary"
    }

    fn provide(&self) -> Option<String> {
        Some(clean_inline(&self.form.summary))
    }
}

/// A templated sentence from target role, total years, and industry.
pub struct SynthesizedSummary<'a> {
    pub form: &'a ResumeForm,
    pub years_of_experience: u32,
}

impl ContentProvider<String> for SynthesizedSummary<'_> {
    fn name(&self) -> &'static str {
        "synthesized_summary"
    }

    fn provide(&self) -> Option<String> {
        let role = clean_inline(&self.form.target_role);
        let industry = clean_inline(&self.form.target_industry);
        if role.is_empty() && industry.is_empty() {
            return None;
        }

        let who = if role.is_empty() {
            "Professional".to_string()
        } else {
            title_case(&role)
        };
        let years = match self.years_of_experience {
            0 => String::new(),
            1 => " with 1 year of experience".to_string(),
            n => format!(" with {n}+ years of experience"),
        };
        let field = if industry.is_empty() {
            String::new()
        } else {
            format!(" in the {} industry", industry.to_lowercase())
        };
        Some(format!(
            "{who}{years} delivering measurable results{field}."
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Achievement providers
// ────────────────────────────────────────────────────────────────────────────

/// Bullets found for this job in the AI prose.
pub struct AiAchievements<'a> {
    pub ai_text: Option<&'a str>,
    pub job: &'a FormExperience,
    pub all_jobs: &'a [FormExperience],
}

impl ContentProvider<Vec<String>> for AiAchievements<'_> {
    fn name(&self) -> &'static str {
        "ai_achievements"
    }

    fn provide(&self) -> Option<Vec<String>> {
        let text = self.ai_text?;
        Some(find_job_bullets(text, self.job, self.all_jobs))
    }
}

/// The user's own description, split into sentences or lines.
pub struct DescriptionAchievements<'a> {
    pub job: &'a FormExperience,
}

impl ContentProvider<Vec<String>> for DescriptionAchievements<'_> {
    fn name(&self) -> &'static str {
        "description_achievements"
    }

    fn provide(&self) -> Option<Vec<String>> {
        Some(split_description(&self.job.description))
    }
}

/// Joins non-bullet lines into one paragraph; bullets are joined too if that is all there is.
pub fn join_prose(lines: &[Token]) -> String {
    let text_lines: Vec<&str> = lines
        .iter()
        .filter(|t| matches!(t, Token::Text(_)))
        .filter_map(Token::text)
        .collect();
    let chosen: Vec<&str> = if text_lines.is_empty() {
        lines.iter().filter_map(Token::text).collect()
    } else {
        text_lines
    };
    clean_inline(&chosen.join(" "))
}

use serde::{Deserialize, Serialize};

use crate::models::form::ResumeForm;

/// Canonical, template-independent resume content.
///
/// Every field has an empty default so that a missing section simply renders
/// as absent. `experience` and `education` keep the order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeStructure {
    pub name: String,
    pub contact: Contact,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub certifications: Vec<String>,
}

impl ResumeStructure {
    /// True when there is nothing at all to put on a page.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.contact.is_empty()
            && self.summary.trim().is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.certifications.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Non-empty contact values in display order.
    pub fn fields(&self) -> Vec<&str> {
        [
            Some(self.email.as_str()),
            Some(self.phone.as_str()),
            Some(self.location.as_str()),
            self.linkedin.as_deref(),
            self.portfolio.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub period: String,
    pub details: Option<String>,
}

/// Skill sets. Each list behaves as an insertion-ordered set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.soft.is_empty() && self.languages.is_empty()
    }

    pub fn add_technical(&mut self, skill: impl Into<String>) {
        insert_unique(&mut self.technical, skill.into());
    }

    pub fn add_soft(&mut self, skill: impl Into<String>) {
        insert_unique(&mut self.soft, skill.into());
    }

    pub fn add_language(&mut self, language: impl Into<String>) {
        insert_unique(&mut self.languages, language.into());
    }
}

/// Pushes `value` unless an entry equal ignoring case is already present.
pub fn insert_unique(set: &mut Vec<String>, value: String) {
    let value = value.trim().to_string();
    if value.is_empty() {
        return;
    }
    let lower = value.to_lowercase();
    if !set.iter().any(|existing| existing.to_lowercase() == lower) {
        set.push(value);
    }
}

/// Where the content for a document comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResumeSource {
    /// Already canonical; rendered as-is.
    Structured { resume: ResumeStructure },
    /// Guided-builder fields, optionally enriched with AI-generated prose.
    Form {
        form: ResumeForm,
        #[serde(default)]
        ai_text: Option<String>,
    },
    /// Free-form prose only.
    Text { raw_text: String },
}

impl ResumeSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ResumeSource::Structured { .. } => "structured",
            ResumeSource::Form { .. } => "form",
            ResumeSource::Text { .. } => "text",
        }
    }
}

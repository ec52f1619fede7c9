use serde::{Deserialize, Serialize};

/// Typed input from the guided resume builder.
///
/// Dates are the builder's `YYYY-MM` month-picker values; `description` is the
/// free text the user typed for a job, used only when no AI bullets match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub personal: PersonalInfo,
    pub target_role: String,
    pub target_industry: String,
    pub summary: String,
    pub experiences: Vec<FormExperience>,
    pub education: Vec<FormEducation>,
    pub skills: FormSkills,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormExperience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormEducation {
    pub degree: String,
    pub school: String,
    pub start_date: String,
    pub end_date: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSkills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
}

//! Direct-from-form building: typed fields in, canonical structure out.
//!
//! The classifier is only consulted for the optional AI prose, and only to
//! enrich the summary, per-job achievements, and (when the form has none) skills.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::builder::providers::{
    first_available, AiAchievements, AiSummary, DescriptionAchievements, FormSummary,
    SynthesizedSummary,
};
use crate::builder::text::collect_skills;
use crate::models::form::{FormEducation, FormExperience, ResumeForm};
use crate::models::resume::{
    insert_unique, Contact, EducationEntry, ExperienceEntry, ResumeStructure, Skills,
};
use crate::parsing::classifier::SKILLS;
use crate::parsing::normalize::{
    clean_inline, format_period, normalize_name, normalize_skill, title_case,
};
use crate::parsing::classify;

static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{1,2}))?").unwrap());

/// Builds the canonical structure from guided-builder fields plus optional AI prose.
///
/// `today` closes open-ended jobs when counting years of experience.
pub fn build_from_form(form: &ResumeForm, ai_text: Option<&str>, today: NaiveDate) -> ResumeStructure {
    let ai_text = ai_text.map(str::trim).filter(|t| !t.is_empty());
    let ai_sections = ai_text.map(classify);

    let experience = form
        .experiences
        .iter()
        .filter(|job| !is_blank_job(job))
        .map(|job| build_experience(job, ai_text, &form.experiences))
        .collect();

    let years_of_experience = years_of_experience(&form.experiences, today);
    let summary = first_available::<String>(&[
        &AiSummary {
            sections: ai_sections.as_ref(),
        },
        &FormSummary { form },
        &SynthesizedSummary {
            form,
            years_of_experience,
        },
    ])
    .unwrap_or_default();

    let mut skills = form_skills(form);
    if skills.is_empty() {
        if let Some(sections) = &ai_sections {
            collect_skills(sections.lines(SKILLS), &mut skills);
        }
    }

    let mut certifications = Vec::new();
    for cert in &form.certifications {
        insert_unique(&mut certifications, clean_inline(cert));
    }

    ResumeStructure {
        name: normalize_name(&form.personal.full_name),
        contact: form_contact(form),
        summary,
        experience,
        education: form
            .education
            .iter()
            .map(build_education)
            .filter(|e| !e.degree.is_empty() || !e.school.is_empty())
            .collect(),
        skills,
        certifications,
    }
}

fn is_blank_job(job: &FormExperience) -> bool {
    job.title.trim().is_empty() && job.company.trim().is_empty() && job.description.trim().is_empty()
}

fn build_experience(job: &FormExperience, ai_text: Option<&str>, all_jobs: &[FormExperience]) -> ExperienceEntry {
    let achievements = first_available::<Vec<String>>(&[
        &AiAchievements {
            ai_text,
            job,
            all_jobs,
        },
        &DescriptionAchievements { job },
    ])
    .unwrap_or_default();

    ExperienceEntry {
        title: title_case(&clean_inline(&job.title)),
        company: clean_inline(&job.company),
        location: clean_inline(&job.location),
        period: format_period(&job.start_date, &job.end_date, job.current),
        achievements,
    }
}

fn build_education(entry: &FormEducation) -> EducationEntry {
    EducationEntry {
        degree: title_case(&clean_inline(&entry.degree)),
        school: clean_inline(&entry.school),
        period: format_period(&entry.start_date, &entry.end_date, false),
        details: entry
            .details
            .as_deref()
            .map(clean_inline)
            .filter(|d| !d.is_empty()),
    }
}

fn form_contact(form: &ResumeForm) -> Contact {
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let personal = &form.personal;
    Contact {
        email: personal.email.trim().to_string(),
        phone: personal.phone.trim().to_string(),
        location: clean_inline(&personal.location),
        linkedin: optional(&personal.linkedin),
        portfolio: optional(&personal.portfolio),
    }
}

fn form_skills(form: &ResumeForm) -> Skills {
    let mut skills = Skills::default();
    for skill in &form.skills.technical {
        skills.add_technical(normalize_skill(skill));
    }
    for skill in &form.skills.soft {
        skills.add_soft(title_case(&clean_inline(skill)));
    }
    for language in &form.skills.languages {
        skills.add_language(title_case(&clean_inline(language)));
    }
    skills
}

// ────────────────────────────────────────────────────────────────────────────
// Years of experience
// ────────────────────────────────────────────────────────────────────────────

/// Total months across all jobs, floored to whole years.
///
/// Jobs without a parseable start date count for nothing. Current or
/// open-ended jobs run until `today`.
pub fn years_of_experience(jobs: &[FormExperience], today: NaiveDate) -> u32 {
    let today_months = month_index(today.year(), today.month());
    let total: i64 = jobs
        .iter()
        .filter_map(|job| {
            let start = parse_year_month(&job.start_date)?;
            let end = if job.current {
                today_months
            } else {
                parse_year_month(&job.end_date).unwrap_or(today_months)
            };
            Some((end - start).max(0))
        })
        .sum();
    u32::try_from(total / 12).unwrap_or(0)
}

fn parse_year_month(raw: &str) -> Option<i64> {
    let caps = YEAR_MONTH_RE.captures(raw.trim())?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .filter(|m| (1..=12).contains(m))
        .unwrap_or(1);
    Some(month_index(year, month))
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{FormSkills, PersonalInfo};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn acme_form() -> ResumeForm {
        ResumeForm {
            personal: PersonalInfo {
                full_name: "jane doe".to_string(),
                email: " jane@x.com ".to_string(),
                linkedin: Some("  ".to_string()),
                ..Default::default()
            },
            target_role: "backend engineer".to_string(),
            experiences: vec![FormExperience {
                title: "senior engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020-06".to_string(),
                current: true,
                description: "Did a lot of engineering work for the team. Also meetings.".to_string(),
                ..Default::default()
            }],
            skills: FormSkills {
                technical: vec!["python".to_string(), "Python".to_string(), "aws".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    const AI_PROSE: &str = "\
JANE DOE

PROFESSIONAL SUMMARY
Backend engineer focused on reliable payment systems.

PROFESSIONAL EXPERIENCE
Senior Engineer | Acme | 2020 - Present
- Led the migration of a legacy billing system to a new platform
- Automated invoice reconciliation, saving 20 hours per week
- Introduced contract tests across 12 internal services
- 2021

EDUCATION
BSc Computer Science
";

    #[test]
    fn test_ai_bullets_replace_description() {
        let built = build_from_form(&acme_form(), Some(AI_PROSE), today());
        let job = &built.experience[0];
        assert_eq!(
            job.achievements,
            vec![
                "Led the migration of a legacy billing system to a new platform",
                "Automated invoice reconciliation, saving 20 hours per week",
                "Introduced contract tests across 12 internal services",
            ],
            "exactly the three qualifying AI bullets, not the form description"
        );
    }

    #[test]
    fn test_summary_naming_role_and_company_keeps_ai_bullets() {
        let prose = AI_PROSE.replace(
            "Backend engineer focused on reliable payment systems.",
            "Senior Engineer at Acme focused on reliable payment systems.",
        );
        let built = build_from_form(&acme_form(), Some(&prose), today());
        assert_eq!(
            built.experience[0].achievements.len(),
            3,
            "summary mention must not anchor the job: {:?}",
            built.experience[0].achievements
        );
        assert!(!built.experience[0]
            .achievements
            .iter()
            .any(|a| a.contains("Did a lot of engineering work")));
    }

    #[test]
    fn test_description_fallback_without_ai() {
        let built = build_from_form(&acme_form(), None, today());
        assert_eq!(
            built.experience[0].achievements,
            vec!["Did a lot of engineering work for the team"]
        );
    }

    #[test]
    fn test_fields_are_normalized() {
        let built = build_from_form(&acme_form(), None, today());
        assert_eq!(built.name, "Jane Doe");
        assert_eq!(built.contact.email, "jane@x.com");
        assert_eq!(built.contact.linkedin, None, "blank optional contact dropped");
        assert_eq!(built.experience[0].title, "Senior Engineer");
        assert_eq!(built.experience[0].period, "June 2020 - Present");
        assert_eq!(built.skills.technical, vec!["Python", "AWS"]);
    }

    #[test]
    fn test_summary_priority_chain() {
        let mut form = acme_form();
        let built = build_from_form(&form, Some(AI_PROSE), today());
        assert_eq!(built.summary, "Backend engineer focused on reliable payment systems.");

        form.summary = "Typed by the user.".to_string();
        let built = build_from_form(&form, None, today());
        assert_eq!(built.summary, "Typed by the user.");

        form.summary.clear();
        let built = build_from_form(&form, None, today());
        assert_eq!(
            built.summary,
            "Backend Engineer with 4+ years of experience delivering measurable results."
        );
    }

    #[test]
    fn test_years_of_experience_sums_spans() {
        let jobs = vec![
            FormExperience {
                start_date: "2015-01".to_string(),
                end_date: "2016-07".to_string(),
                ..Default::default()
            },
            FormExperience {
                start_date: "2017-01".to_string(),
                end_date: "2018-07".to_string(),
                ..Default::default()
            },
            FormExperience {
                start_date: "not a date".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(years_of_experience(&jobs, today()), 3, "18 + 18 months");
    }

    #[test]
    fn test_years_of_experience_current_runs_to_today() {
        let jobs = vec![FormExperience {
            start_date: "2021-06".to_string(),
            end_date: "2022-01".to_string(),
            current: true,
            ..Default::default()
        }];
        assert_eq!(years_of_experience(&jobs, today()), 3);
    }

    #[test]
    fn test_skills_fall_back_to_ai_prose() {
        let mut form = acme_form();
        form.skills = FormSkills::default();
        let prose = format!("{AI_PROSE}\nSKILLS\njavascript, sql");
        let built = build_from_form(&form, Some(&prose), today());
        assert_eq!(built.skills.technical, vec!["JavaScript", "SQL"]);
    }

    #[test]
    fn test_blank_jobs_and_education_skipped() {
        let mut form = acme_form();
        form.experiences.push(FormExperience::default());
        form.education.push(FormEducation::default());
        let built = build_from_form(&form, None, today());
        assert_eq!(built.experience.len(), 1);
        assert!(built.education.is_empty());
    }
}

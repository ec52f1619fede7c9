//! The `LayoutStrategy` seam: one implementation per template.
//!
//! Strategies are pure: same structure, config, and geometry in, same blocks
//! out. Shared line-building helpers live here so the three templates agree on
//! what an experience meta line or a contact line looks like.

use crate::layout::ats::AtsLayout;
use crate::layout::block::{DocumentLayout, LayoutBlock, Region, SectionKind, SizeClass};
use crate::layout::geometry::PageGeometry;
use crate::layout::modern::ModernLayout;
use crate::layout::traditional::TraditionalLayout;
use crate::models::resume::{Contact, EducationEntry, ExperienceEntry, ResumeStructure};
use crate::models::template::{Rgb, Template, TemplateConfig, MUTED_COLOR};
use crate::parsing::bullets::filter_bullets;

pub trait LayoutStrategy: Send + Sync {
    fn template(&self) -> Template;

    fn layout(
        &self,
        resume: &ResumeStructure,
        config: &TemplateConfig,
        geometry: &PageGeometry,
    ) -> DocumentLayout;
}

static MODERN: ModernLayout = ModernLayout;
static TRADITIONAL: TraditionalLayout = TraditionalLayout;
static ATS: AtsLayout = AtsLayout;

pub fn strategy_for(template: Template) -> &'static dyn LayoutStrategy {
    match template {
        Template::Modern => &MODERN,
        Template::Traditional => &TRADITIONAL,
        Template::Ats => &ATS,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Joins the non-empty parts with `separator`.
pub fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `"Acme | Remote | June 2020 - Present"`.
pub fn experience_meta_line(entry: &ExperienceEntry) -> String {
    join_non_empty(
        [entry.company.as_str(), entry.location.as_str(), entry.period.as_str()],
        " | ",
    )
}

/// `"School | 2016"`.
pub fn education_meta_line(entry: &EducationEntry) -> String {
    join_non_empty([entry.school.as_str(), entry.period.as_str()], " | ")
}

pub fn contact_line(contact: &Contact, separator: &str) -> String {
    join_non_empty(contact.fields(), separator)
}

/// Heading, optional rule, then one experience block per entry (title, meta
/// line, at most `max_bullets` bullets). Nothing when there is no experience.
pub fn push_experience(
    blocks: &mut Vec<LayoutBlock>,
    resume: &ResumeStructure,
    region: Region,
    heading: LayoutBlock,
    rule: Option<LayoutBlock>,
    max_bullets: usize,
) {
    if resume.experience.is_empty() {
        return;
    }
    let section = SectionKind::Experience;
    blocks.push(heading);
    blocks.extend(rule);

    for entry in &resume.experience {
        let title = if entry.title.is_empty() {
            entry.company.as_str()
        } else {
            entry.title.as_str()
        };
        if !title.is_empty() {
            blocks.push(
                LayoutBlock::body(title, region, section)
                    .bold()
                    .size(SizeClass::Subheading),
            );
        }
        let meta = experience_meta_line(entry);
        if !meta.is_empty() && !(entry.title.is_empty() && meta == entry.company) {
            blocks.push(
                LayoutBlock::body(meta, region, section)
                    .size(SizeClass::Small)
                    .color(MUTED_COLOR),
            );
        }
        // Structured payloads arrive unfiltered; the cap counts only real bullets.
        for achievement in filter_bullets(&entry.achievements).into_iter().take(max_bullets) {
            blocks.push(LayoutBlock::bullet(achievement, region, section));
        }
    }
}

/// Degree (bold), school and period (muted), details (small).
pub fn push_education(
    blocks: &mut Vec<LayoutBlock>,
    resume: &ResumeStructure,
    region: Region,
    heading: LayoutBlock,
    rule: Option<LayoutBlock>,
) {
    if resume.education.is_empty() {
        return;
    }
    let section = SectionKind::Education;
    blocks.push(heading);
    blocks.extend(rule);

    for entry in &resume.education {
        if !entry.degree.is_empty() {
            blocks.push(LayoutBlock::body(&entry.degree, region, section).bold());
        }
        let meta = education_meta_line(entry);
        if !meta.is_empty() {
            blocks.push(
                LayoutBlock::body(meta, region, section)
                    .size(SizeClass::Small)
                    .color(MUTED_COLOR),
            );
        }
        if let Some(details) = entry.details.as_deref().filter(|d| !d.trim().is_empty()) {
            blocks.push(LayoutBlock::body(details, region, section).size(SizeClass::Small));
        }
    }
}

/// Section heading used by the single-column templates.
pub fn full_width_heading(section: SectionKind, color: Rgb) -> LayoutBlock {
    LayoutBlock::heading(section.title(), Region::Full, section, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_matches_template() {
        for template in Template::ALL {
            assert_eq!(strategy_for(template).template(), template);
        }
    }

    #[test]
    fn test_meta_line_skips_blanks() {
        let entry = ExperienceEntry {
            company: "Acme".to_string(),
            period: "June 2020 - Present".to_string(),
            ..Default::default()
        };
        assert_eq!(experience_meta_line(&entry), "Acme | June 2020 - Present");
    }

    #[test]
    fn test_contact_line() {
        let contact = Contact {
            email: "jane@x.com".to_string(),
            location: "Austin, TX".to_string(),
            ..Default::default()
        };
        assert_eq!(contact_line(&contact, " • "), "jane@x.com • Austin, TX");
    }

    #[test]
    fn test_push_experience_caps_bullets() {
        let resume = ResumeStructure {
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                achievements: (0..9).map(|i| format!("Achievement number {i} with enough text")).collect(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut blocks = Vec::new();
        let heading = full_width_heading(SectionKind::Experience, MUTED_COLOR);
        push_experience(&mut blocks, &resume, Region::Full, heading, None, 5);
        let bullets = blocks
            .iter()
            .filter(|b| b.kind == crate::layout::block::BlockKind::Bullet)
            .count();
        assert_eq!(bullets, 5);
    }

    #[test]
    fn test_push_experience_filters_before_capping() {
        let mut achievements = vec![
            "March 2021".to_string(),
            "**bold artifact**".to_string(),
            "2019".to_string(),
        ];
        achievements.extend((0..6).map(|i| format!("Shipped feature {i} to 10,000 users")));
        let resume = ResumeStructure {
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                achievements,
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut blocks = Vec::new();
        let heading = full_width_heading(SectionKind::Experience, MUTED_COLOR);
        push_experience(&mut blocks, &resume, Region::Full, heading, None, 5);
        let bullets: Vec<&str> = blocks
            .iter()
            .filter(|b| b.kind == crate::layout::block::BlockKind::Bullet)
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(bullets.len(), 5, "five real bullets survive the cap: {bullets:?}");
        assert!(bullets.iter().all(|b| b.starts_with("Shipped feature")));
    }
}

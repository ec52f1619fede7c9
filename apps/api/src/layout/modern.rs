//! Modern: tinted sidebar (~30%) plus a main column, accent-colored name and headings.
//!
//! Sidebar order: contact, skills, languages, education, certifications.
//! Main order: name, summary, experience. Each main heading is underlined by a rule.

use crate::layout::block::{
    AccentBar, DocumentLayout, LayoutBlock, PageBackground, Region, SectionKind, SizeClass,
};
use crate::layout::geometry::PageGeometry;
use crate::layout::metrics::FontFamily;
use crate::layout::strategy::{push_education, push_experience, LayoutStrategy};
use crate::models::resume::ResumeStructure;
use crate::models::template::{Rgb, Template, TemplateConfig, MUTED_COLOR};

pub const MAX_BULLETS: usize = 5;
const ACCENT_BAR_HEIGHT: f32 = 10.0;
/// How far the sidebar tint is mixed toward white.
const SIDEBAR_TINT: f32 = 0.92;

pub struct ModernLayout;

impl LayoutStrategy for ModernLayout {
    fn template(&self) -> Template {
        Template::Modern
    }

    fn layout(
        &self,
        resume: &ResumeStructure,
        config: &TemplateConfig,
        geometry: &PageGeometry,
    ) -> DocumentLayout {
        let accent = config.accent();
        let mut blocks = Vec::new();

        push_main(&mut blocks, resume, accent);
        push_sidebar(&mut blocks, resume, accent);

        DocumentLayout {
            template: Template::Modern,
            family: FontFamily::Sans,
            bullet_glyph: '•',
            geometry: *geometry,
            accent,
            accent_bar: Some(AccentBar {
                color: accent,
                height: ACCENT_BAR_HEIGHT,
            }),
            page_background: vec![PageBackground {
                region: Region::Sidebar,
                color: accent.tint(SIDEBAR_TINT),
            }],
            blocks,
        }
    }
}

fn main_heading(section: SectionKind, accent: Rgb) -> (LayoutBlock, Option<LayoutBlock>) {
    (
        LayoutBlock::heading(section.title(), Region::Main, section, accent),
        Some(LayoutBlock::rule(Region::Main, section, accent)),
    )
}

fn sidebar_heading(section: SectionKind, accent: Rgb) -> LayoutBlock {
    LayoutBlock::heading(section.title(), Region::Sidebar, section, accent).size(SizeClass::Subheading)
}

fn push_main(blocks: &mut Vec<LayoutBlock>, resume: &ResumeStructure, accent: Rgb) {
    if !resume.name.trim().is_empty() {
        blocks.push(
            LayoutBlock::heading(&resume.name, Region::Main, SectionKind::Header, accent)
                .size(SizeClass::Name),
        );
    }

    if !resume.summary.trim().is_empty() {
        let (heading, rule) = main_heading(SectionKind::Summary, accent);
        blocks.push(heading);
        blocks.extend(rule);
        blocks.push(LayoutBlock::body(&resume.summary, Region::Main, SectionKind::Summary));
    }

    let (heading, rule) = main_heading(SectionKind::Experience, accent);
    push_experience(blocks, resume, Region::Main, heading, rule, MAX_BULLETS);
}

fn push_sidebar(blocks: &mut Vec<LayoutBlock>, resume: &ResumeStructure, accent: Rgb) {
    let region = Region::Sidebar;

    let contact = resume.contact.fields();
    if !contact.is_empty() {
        blocks.push(sidebar_heading(SectionKind::Contact, accent));
        for value in contact {
            blocks.push(
                LayoutBlock::body(value, region, SectionKind::Contact)
                    .size(SizeClass::Small)
                    .color(MUTED_COLOR),
            );
        }
    }

    let skills = &resume.skills;
    if !skills.technical.is_empty() || !skills.soft.is_empty() {
        blocks.push(sidebar_heading(SectionKind::Skills, accent));
        for skill in skills.technical.iter().chain(&skills.soft) {
            blocks.push(LayoutBlock::body(skill, region, SectionKind::Skills).size(SizeClass::Small));
        }
    }

    if !skills.languages.is_empty() {
        blocks.push(sidebar_heading(SectionKind::Languages, accent));
        for language in &skills.languages {
            blocks.push(
                LayoutBlock::body(language, region, SectionKind::Languages).size(SizeClass::Small),
            );
        }
    }

    push_education(
        blocks,
        resume,
        region,
        sidebar_heading(SectionKind::Education, accent),
        None,
    );

    if !resume.certifications.is_empty() {
        blocks.push(sidebar_heading(SectionKind::Certifications, accent));
        for cert in &resume.certifications {
            blocks.push(
                LayoutBlock::body(cert, region, SectionKind::Certifications).size(SizeClass::Small),
            );
        }
    }
}

//! Traditional: one serif column, centered header, underlined headings, fixed section order.

use crate::layout::block::{DocumentLayout, LayoutBlock, Region, SectionKind, SizeClass};
use crate::layout::geometry::PageGeometry;
use crate::layout::metrics::FontFamily;
use crate::layout::strategy::{
    contact_line, full_width_heading, join_non_empty, push_education, push_experience,
    LayoutStrategy,
};
use crate::models::resume::ResumeStructure;
use crate::models::template::{Template, TemplateConfig, BODY_COLOR, MUTED_COLOR};

pub const MAX_BULLETS: usize = 8;

/// Rendered in this order whatever order the source had.
pub const SECTION_ORDER: [SectionKind; 6] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Certifications,
    SectionKind::Languages,
];

pub struct TraditionalLayout;

impl LayoutStrategy for TraditionalLayout {
    fn template(&self) -> Template {
        Template::Traditional
    }

    fn layout(
        &self,
        resume: &ResumeStructure,
        _config: &TemplateConfig,
        geometry: &PageGeometry,
    ) -> DocumentLayout {
        let mut blocks = Vec::new();
        let region = Region::Full;

        if !resume.name.trim().is_empty() {
            blocks.push(
                LayoutBlock::heading(&resume.name, region, SectionKind::Header, BODY_COLOR)
                    .size(SizeClass::Name)
                    .centered(),
            );
        }
        let contact = contact_line(&resume.contact, " | ");
        if !contact.is_empty() {
            blocks.push(
                LayoutBlock::body(contact, region, SectionKind::Header)
                    .size(SizeClass::Small)
                    .color(MUTED_COLOR)
                    .centered(),
            );
        }

        for section in SECTION_ORDER {
            push_section(&mut blocks, resume, section);
        }

        DocumentLayout {
            template: Template::Traditional,
            family: FontFamily::Serif,
            bullet_glyph: '•',
            geometry: *geometry,
            accent: BODY_COLOR,
            accent_bar: None,
            page_background: Vec::new(),
            blocks,
        }
    }
}

fn heading(section: SectionKind) -> (LayoutBlock, Option<LayoutBlock>) {
    (
        full_width_heading(section, BODY_COLOR),
        Some(LayoutBlock::rule(Region::Full, section, BODY_COLOR)),
    )
}

fn push_section(blocks: &mut Vec<LayoutBlock>, resume: &ResumeStructure, section: SectionKind) {
    let region = Region::Full;
    match section {
        SectionKind::Summary if !resume.summary.trim().is_empty() => {
            let (h, rule) = heading(section);
            blocks.push(h);
            blocks.extend(rule);
            blocks.push(LayoutBlock::body(&resume.summary, region, section));
        }
        SectionKind::Experience => {
            let (h, rule) = heading(section);
            push_experience(blocks, resume, region, h, rule, MAX_BULLETS);
        }
        SectionKind::Education => {
            let (h, rule) = heading(section);
            push_education(blocks, resume, region, h, rule);
        }
        SectionKind::Skills => {
            let skills = &resume.skills;
            if skills.technical.is_empty() && skills.soft.is_empty() {
                return;
            }
            let (h, rule) = heading(section);
            blocks.push(h);
            blocks.extend(rule);
            if !skills.technical.is_empty() {
                let line = format!("Technical: {}", join_non_empty(skills.technical.iter().map(String::as_str), ", "));
                blocks.push(LayoutBlock::body(line, region, section));
            }
            if !skills.soft.is_empty() {
                let line = format!("Soft Skills: {}", join_non_empty(skills.soft.iter().map(String::as_str), ", "));
                blocks.push(LayoutBlock::body(line, region, section));
            }
        }
        SectionKind::Certifications if !resume.certifications.is_empty() => {
            let (h, rule) = heading(section);
            blocks.push(h);
            blocks.extend(rule);
            for cert in &resume.certifications {
                blocks.push(LayoutBlock::bullet(cert, region, section));
            }
        }
        SectionKind::Languages if !resume.skills.languages.is_empty() => {
            let (h, rule) = heading(section);
            blocks.push(h);
            blocks.extend(rule);
            let line = join_non_empty(resume.skills.languages.iter().map(String::as_str), ", ");
            blocks.push(LayoutBlock::body(line, region, section));
        }
        _ => {}
    }
}

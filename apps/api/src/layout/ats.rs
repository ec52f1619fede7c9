//! ATS: plain single column for machine parsing.
//!
//! No accent bar, no rules, no tint. Headings are ALL CAPS and bold only; every
//! string is folded to ASCII and bullets use `-`.

use crate::layout::block::{DocumentLayout, LayoutBlock, Region, SectionKind, SizeClass};
use crate::layout::geometry::PageGeometry;
use crate::layout::metrics::FontFamily;
use crate::layout::strategy::{
    contact_line, full_width_heading, join_non_empty, push_education, push_experience,
    LayoutStrategy,
};
use crate::layout::traditional::SECTION_ORDER;
use crate::models::resume::ResumeStructure;
use crate::models::template::{Template, TemplateConfig, BODY_COLOR};
use deunicode::deunicode_with_tofu;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const MAX_BULLETS: usize = 8;

pub struct AtsLayout;

impl LayoutStrategy for AtsLayout {
    fn template(&self) -> Template {
        Template::Ats
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
                    .size(SizeClass::Name),
            );
        }
        let contact = contact_line(&resume.contact, " | ");
        if !contact.is_empty() {
            blocks.push(LayoutBlock::body(contact, region, SectionKind::Header));
        }

        for section in SECTION_ORDER {
            push_section(&mut blocks, resume, section);
        }

        for block in &mut blocks {
            block.text = ascii_safe(&block.text);
            block.color = BODY_COLOR;
        }

        DocumentLayout {
            template: Template::Ats,
            family: FontFamily::Sans,
            bullet_glyph: '-',
            geometry: *geometry,
            accent: BODY_COLOR,
            accent_bar: None,
            page_background: Vec::new(),
            blocks,
        }
    }
}

fn push_section(blocks: &mut Vec<LayoutBlock>, resume: &ResumeStructure, section: SectionKind) {
    let region = Region::Full;
    let heading = full_width_heading(section, BODY_COLOR);
    match section {
        SectionKind::Summary if !resume.summary.trim().is_empty() => {
            blocks.push(heading);
            blocks.push(LayoutBlock::body(&resume.summary, region, section));
        }
        SectionKind::Experience => push_experience(blocks, resume, region, heading, None, MAX_BULLETS),
        SectionKind::Education => push_education(blocks, resume, region, heading, None),
        SectionKind::Skills => {
            let skills = &resume.skills;
            let all: Vec<&str> = skills
                .technical
                .iter()
                .chain(&skills.soft)
                .map(String::as_str)
                .collect();
            if all.is_empty() {
                return;
            }
            blocks.push(heading);
            blocks.push(LayoutBlock::body(join_non_empty(all, ", "), region, section));
        }
        SectionKind::Certifications if !resume.certifications.is_empty() => {
            blocks.push(heading);
            for cert in &resume.certifications {
                blocks.push(LayoutBlock::bullet(cert, region, section));
            }
        }
        SectionKind::Languages if !resume.skills.languages.is_empty() => {
            blocks.push(heading);
            let line = join_non_empty(resume.skills.languages.iter().map(String::as_str), ", ");
            blocks.push(LayoutBlock::body(line, region, section));
        }
        _ => {}
    }
}

/// Folds text to ASCII without losing letters.
///
/// Typographic punctuation maps to its plain form. Accented letters lose their
/// marks after NFKD decomposition. Whatever is still outside ASCII (stroked
/// Latin letters, Cyrillic, CJK) is transliterated.
pub fn ascii_safe(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.nfkd().filter(|c| !is_combining_mark(*c)) {
        match c {
            '‘' | '’' | '‚' | '′' => folded.push('\''),
            '“' | '”' | '„' | '″' => folded.push('"'),
            '–' | '—' | '‒' | '―' | '−' => folded.push('-'),
            '•' | '▪' | '◦' | '·' | '●' => folded.push('-'),
            c => folded.push(c),
        }
    }
    if folded.is_ascii() {
        return folded;
    }
    deunicode_with_tofu(&folded, "?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block::{BlockKind, Emphasis};
    use crate::models::resume::ExperienceEntry;
    use crate::models::template::ColorPreset;
    use proptest::prelude::*;

    fn sample() -> ResumeStructure {
        ResumeStructure {
            name: "José Núñez".to_string(),
            summary: "Engineer — “pragmatic” and fast…".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                period: "2019 – 2021".to_string(),
                achievements: vec!["Led the migration of a legacy billing system".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn layout(resume: &ResumeStructure) -> DocumentLayout {
        let config = TemplateConfig::new(Template::Ats, ColorPreset::Purple);
        AtsLayout.layout(resume, &config, &PageGeometry::default())
    }

    #[test]
    fn test_no_decorations() {
        let doc = layout(&sample());
        assert!(doc.accent_bar.is_none());
        assert!(doc.page_background.is_empty());
        assert!(!doc.is_two_column());
        assert!(doc.blocks.iter().all(|b| b.kind != BlockKind::Rule));
        assert_eq!(doc.bullet_glyph, '-');
    }

    #[test]
    fn test_headings_caps_and_bold() {
        let doc = layout(&sample());
        for block in doc.blocks.iter().filter(|b| b.kind == BlockKind::Heading && b.section != SectionKind::Header) {
            assert_eq!(block.text, block.text.to_uppercase());
            assert_eq!(block.emphasis, Emphasis::Bold);
            assert_eq!(block.color, BODY_COLOR);
        }
    }

    #[test]
    fn test_text_is_ascii() {
        let doc = layout(&sample());
        assert!(doc.blocks.iter().all(|b| b.text.is_ascii()), "{:?}", doc.blocks);
        assert_eq!(doc.blocks[0].text, "Jose Nunez");
        let summary = doc.blocks.iter().find(|b| b.section == SectionKind::Summary && b.kind == BlockKind::Body).unwrap();
        assert_eq!(summary.text, "Engineer - \"pragmatic\" and fast...");
    }

    #[test]
    fn test_non_latin1_names_keep_their_letters() {
        assert_eq!(ascii_safe("Łukasz Nowak"), "Lukasz Nowak");
        assert_eq!(ascii_safe("Đorđe Petrović"), "Dorde Petrovic");
        assert_eq!(ascii_safe("Søren Kierkegaard"), "Soren Kierkegaard");
        let chinese = ascii_safe("王伟");
        assert!(!chinese.trim().is_empty() && chinese.is_ascii(), "got {chinese:?}");
        assert!(chinese.contains("Wang"), "got {chinese:?}");
    }

    #[test]
    fn test_ats_name_never_disappears() {
        let resume = ResumeStructure {
            name: "王伟".to_string(),
            ..Default::default()
        };
        let doc = layout(&resume);
        assert_eq!(doc.blocks[0].section, SectionKind::Header);
        assert!(!doc.blocks[0].text.trim().is_empty());
        assert!(doc.blocks[0].text.is_ascii());
    }

    #[test]
    fn proptest_ascii_safe_output_is_ascii() {
        proptest!(|(text in "\\PC{0,80}")| {
            prop_assert!(ascii_safe(&text).is_ascii());
        });
    }

    #[test]
    fn proptest_ascii_safe_keeps_every_letter() {
        proptest!(|(text in "[a-zA-ZàéîõüçñłđøŁĐØ ]{0,40}")| {
            let letters = |s: &str| s.chars().filter(|c| c.is_alphabetic()).count();
            prop_assert_eq!(letters(&ascii_safe(&text)), letters(&text));
        });
    }
}

//! Cover-letter layout. Single column for every template; the template only
//! picks the font family, the header alignment, and the decorations.

use chrono::NaiveDate;

use crate::layout::ats::ascii_safe;
use crate::layout::block::{AccentBar, DocumentLayout, LayoutBlock, Region, SectionKind, SizeClass};
use crate::layout::geometry::PageGeometry;
use crate::layout::metrics::FontFamily;
use crate::layout::strategy::contact_line;
use crate::models::cover_letter::CoverLetter;
use crate::models::template::{Template, TemplateConfig, BODY_COLOR, MUTED_COLOR};
use crate::parsing::normalize::clean_inline;

const DEFAULT_CLOSING: &str = "Sincerely,";
const CLOSING_OPENERS: &[&str] = &[
    "sincerely",
    "best regards",
    "kind regards",
    "warm regards",
    "regards",
    "best,",
    "respectfully",
    "thank you,",
];

pub fn layout_cover_letter(
    letter: &CoverLetter,
    config: &TemplateConfig,
    geometry: &PageGeometry,
    date: NaiveDate,
) -> DocumentLayout {
    let template = config.template;
    let accent = config.accent();
    let region = Region::Full;
    let mut blocks = Vec::new();

    let centered = template == Template::Traditional;
    let header = |block: LayoutBlock| if centered { block.centered() } else { block };

    let name = clean_inline(&letter.name);
    if !name.is_empty() {
        blocks.push(header(
            LayoutBlock::heading(&name, region, SectionKind::Header, accent).size(SizeClass::Name),
        ));
    }
    let contact = contact_line(&letter.contact, " | ");
    if !contact.is_empty() {
        blocks.push(header(
            LayoutBlock::body(contact, region, SectionKind::Header)
                .size(SizeClass::Small)
                .color(MUTED_COLOR),
        ));
    }
    if template == Template::Traditional {
        blocks.push(LayoutBlock::rule(region, SectionKind::Header, BODY_COLOR));
    }

    let section = SectionKind::Letter;
    blocks.push(LayoutBlock::body(date.format("%B %-d, %Y").to_string(), region, section));

    let paragraphs = paragraphs(&letter.body);
    let has_salutation = paragraphs
        .first()
        .is_some_and(|p| p.to_lowercase().starts_with("dear"));
    if let Some(recipient) = letter.recipient.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        if !has_salutation {
            blocks.push(LayoutBlock::body(format!("Dear {recipient},"), region, section));
        }
    }

    let has_closing = paragraphs.last().is_some_and(|p| {
        let lower = p.to_lowercase();
        CLOSING_OPENERS.iter().any(|opener| lower.starts_with(opener))
    });
    for paragraph in &paragraphs {
        blocks.push(LayoutBlock::body(paragraph, region, section));
    }
    if !has_closing && !paragraphs.is_empty() {
        let closing = letter
            .closing
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CLOSING);
        blocks.push(LayoutBlock::body(closing, region, section));
        if !name.is_empty() {
            blocks.push(LayoutBlock::body(&name, region, section).bold());
        }
    }

    let (family, accent_bar) = match template {
        Template::Modern => (
            FontFamily::Sans,
            Some(AccentBar {
                color: accent,
                height: 10.0,
            }),
        ),
        Template::Traditional => (FontFamily::Serif, None),
        Template::Ats => (FontFamily::Sans, None),
    };
    if template == Template::Ats {
        for block in &mut blocks {
            block.text = ascii_safe(&block.text);
        }
    }

    DocumentLayout {
        template,
        family,
        bullet_glyph: if template == Template::Ats { '-' } else { '•' },
        geometry: *geometry,
        accent,
        accent_bar,
        page_background: Vec::new(),
        blocks,
    }
}

/// Splits prose on blank lines and joins each paragraph's lines with spaces.
fn paragraphs(body: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(clean_inline(&current.join(" ")));
                current.clear();
            }
            continue;
        }
        current.push(line.trim_start_matches('#').trim());
    }
    if !current.is_empty() {
        out.push(clean_inline(&current.join(" ")));
    }
    out.retain(|p| !p.is_empty());
    out
}

//! Section Classifier: assigns the token stream to named resume sections.
//!
//! A small state machine over [`Token`]s: a heading switches the current
//! section, everything else accumulates under it. Text before the first heading
//! lands in the implicit `header` section. Headings are folded onto canonical
//! keys through a fixed synonym table; unknown headings keep their cleaned,
//! lower-cased text as key.

use crate::parsing::tokenizer::{tokenize, Token};

pub const HEADER: &str = "header";
pub const CONTACT: &str = "contact";
pub const SUMMARY: &str = "summary";
pub const EXPERIENCE: &str = "experience";
pub const EDUCATION: &str = "education";
pub const SKILLS: &str = "skills";
pub const CERTIFICATIONS: &str = "certifications";
pub const LANGUAGES: &str = "languages";

const SYNONYMS: &[(&str, &str)] = &[
    ("contact", CONTACT),
    ("contact information", CONTACT),
    ("contact info", CONTACT),
    ("contact details", CONTACT),
    ("personal information", CONTACT),
    ("personal details", CONTACT),
    ("summary", SUMMARY),
    ("professional summary", SUMMARY),
    ("executive summary", SUMMARY),
    ("career summary", SUMMARY),
    ("summary of qualifications", SUMMARY),
    ("profile", SUMMARY),
    ("professional profile", SUMMARY),
    ("about", SUMMARY),
    ("about me", SUMMARY),
    ("objective", SUMMARY),
    ("career objective", SUMMARY),
    ("experience", EXPERIENCE),
    ("work experience", EXPERIENCE),
    ("professional experience", EXPERIENCE),
    ("relevant experience", EXPERIENCE),
    ("employment", EXPERIENCE),
    ("employment history", EXPERIENCE),
    ("work history", EXPERIENCE),
    ("career history", EXPERIENCE),
    ("education", EDUCATION),
    ("education and training", EDUCATION),
    ("academic background", EDUCATION),
    ("academic history", EDUCATION),
    ("skills", SKILLS),
    ("technical skills", SKILLS),
    ("core competencies", SKILLS),
    ("competencies", SKILLS),
    ("key skills", SKILLS),
    ("core skills", SKILLS),
    ("skills and tools", SKILLS),
    ("skills and expertise", SKILLS),
    ("areas of expertise", SKILLS),
    ("expertise", SKILLS),
    ("technologies", SKILLS),
    ("certifications", CERTIFICATIONS),
    ("certificates", CERTIFICATIONS),
    ("certification", CERTIFICATIONS),
    ("professional certifications", CERTIFICATIONS),
    ("licenses and certifications", CERTIFICATIONS),
    ("certifications and licenses", CERTIFICATIONS),
    ("languages", LANGUAGES),
    ("language skills", LANGUAGES),
    ("language proficiency", LANGUAGES),
];

/// One named section and its lines (never headings or blanks).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub key: String,
    pub lines: Vec<Token>,
}

/// Sections in the order they first appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSectionMap {
    sections: Vec<RawSection>,
}

impl RawSectionMap {
    fn new() -> Self {
        Self {
            sections: vec![RawSection {
                key: HEADER.to_string(),
                lines: Vec::new(),
            }],
        }
    }

    pub fn get(&self, key: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Lines under `key`, empty when the section is absent.
    pub fn lines(&self, key: &str) -> &[Token] {
        self.get(key).map(|s| s.lines.as_slice()).unwrap_or(&[])
    }

    pub fn header(&self) -> &[Token] {
        self.lines(HEADER)
    }

    /// Index of `key`, creating the section when missing.
    fn section_index(&mut self, key: &str) -> usize {
        match self.sections.iter().position(|s| s.key == key) {
            Some(index) => index,
            None => {
                self.sections.push(RawSection {
                    key: key.to_string(),
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

/// Splits raw resume prose into sections.
///
/// Text without any heading ends up entirely in `header`.
pub fn classify(text: &str) -> RawSectionMap {
    let mut map = RawSectionMap::new();
    let mut current = 0usize;
    let mut seen_heading = false;

    for token in tokenize(text) {
        match token {
            Token::Blank => {}
            Token::Heading(heading) => {
                let key = canonical_key(&heading);
                // An all-caps name on the very first line is header text, not a section.
                if !seen_heading && map.sections[0].lines.is_empty() && !is_known_section(&key) {
                    map.sections[0].lines.push(Token::Text(heading));
                    continue;
                }
                seen_heading = true;
                current = map.section_index(&key);
            }
            line => map.sections[current].lines.push(line),
        }
    }

    map
}

/// Lower-cases, strips punctuation, and maps known aliases to their canonical key.
pub fn canonical_key(heading: &str) -> String {
    let cleaned: String = heading
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == cleaned)
        .map(|(_, key)| key.to_string())
        .unwrap_or(cleaned)
}

pub fn is_known_section(key: &str) -> bool {
    SYNONYMS.iter().any(|(_, canonical)| *canonical == key)
}

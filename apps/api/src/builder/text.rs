//! From-classified-text building: the section map is the structure.
//!
//! Every recovered value goes through the normalizers. Nothing here fails;
//! a line that fits no pattern is skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::builder::providers::join_prose;
use crate::models::resume::{insert_unique, Contact, EducationEntry, ExperienceEntry, ResumeStructure, Skills};
use crate::parsing::bullets::filter_bullets;
use crate::parsing::classifier::{
    classify, RawSectionMap, CERTIFICATIONS, CONTACT, EDUCATION, EXPERIENCE, LANGUAGES, SKILLS,
    SUMMARY,
};
use crate::parsing::normalize::{clean_inline, format_month_year, normalize_name, normalize_skill, title_case};
use crate::parsing::Token;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s().-]{7,}$").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://|www\.)\S+$|^[a-z0-9-]+(\.[a-z0-9-]+)*\.(com|dev|io|me|net|org|app|co)(/\S*)?$")
        .unwrap()
});
static CONTACT_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[|•·]\s*").unwrap());
static ENTRY_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[|•]\s*|\s+[-–—]\s+|\s*[–—]\s*").unwrap());
static DATE_SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+)?\d{4}(?:-\d{1,2})?$|^(?:present|current|now)$",
    )
    .unwrap()
});
static YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").unwrap());
static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(bachelor|master|mba|ph\.?d|doctor|associate|diploma|b\.?sc?\b|b\.?a\b|m\.?sc?\b|m\.?a\b|b\.?eng|m\.?eng)",
    )
    .unwrap()
});
static SKILL_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,;|•]\s*").unwrap());

/// Skill items longer than this are prose, not skills.
const MAX_SKILL_CHARS: usize = 40;
/// Location segments longer than this are taglines.
const MAX_LOCATION_CHARS: usize = 50;

/// Builds a structure from raw resume prose.
pub fn build_from_text(raw: &str) -> ResumeStructure {
    let sections = classify(raw);
    build_from_sections(&sections)
}

pub fn build_from_sections(sections: &RawSectionMap) -> ResumeStructure {
    let mut contact = Contact::default();
    let name = parse_header(sections.header(), &mut contact);
    for token in sections.lines(CONTACT) {
        if let Some(line) = token.text() {
            parse_contact_line(line, &mut contact);
        }
    }

    let mut skills = Skills::default();
    collect_skills(sections.lines(SKILLS), &mut skills);
    for token in sections.lines(LANGUAGES) {
        for item in token.text().map(split_items).unwrap_or_default() {
            skills.add_language(title_case(&item));
        }
    }

    let mut certifications = Vec::new();
    for token in sections.lines(CERTIFICATIONS) {
        if let Some(line) = token.text() {
            let cert = clean_inline(line);
            if cert.chars().count() >= 3 {
                insert_unique(&mut certifications, cert);
            }
        }
    }

    ResumeStructure {
        name,
        contact,
        summary: join_prose(sections.lines(SUMMARY)),
        experience: parse_experience(sections.lines(EXPERIENCE)),
        education: parse_education(sections.lines(EDUCATION)),
        skills,
        certifications,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header & contact
// ────────────────────────────────────────────────────────────────────────────

/// Returns the name and fills `contact` from the header lines.
fn parse_header(lines: &[Token], contact: &mut Contact) -> String {
    let mut name = String::new();
    for (index, token) in lines.iter().enumerate() {
        let Some(line) = token.text() else { continue };
        if index == 0 && !token.is_bullet() {
            let mut segments = CONTACT_SPLIT_RE.split(line);
            let first = segments.next().unwrap_or_default();
            if !looks_like_contact(first) {
                name = normalize_name(first);
                for segment in segments {
                    parse_contact_segment(segment, contact);
                }
                continue;
            }
        }
        parse_contact_line(line, contact);
    }
    name
}

fn parse_contact_line(line: &str, contact: &mut Contact) {
    for segment in CONTACT_SPLIT_RE.split(line) {
        parse_contact_segment(segment, contact);
    }
}

fn looks_like_contact(segment: &str) -> bool {
    EMAIL_RE.is_match(segment) || is_phone(segment) || URL_RE.is_match(segment.trim())
}

fn is_phone(segment: &str) -> bool {
    let segment = segment.trim();
    PHONE_RE.is_match(segment) && segment.chars().filter(char::is_ascii_digit).count() >= 7
}

/// Assigns one contact segment to the first matching empty field.
fn parse_contact_segment(segment: &str, contact: &mut Contact) {
    let value = strip_label(segment.trim());
    if value.is_empty() {
        return;
    }
    let lower = value.to_lowercase();

    if let Some(email) = EMAIL_RE.find(value) {
        if contact.email.is_empty() {
            contact.email = email.as_str().to_string();
        }
    } else if lower.contains("linkedin.com") {
        contact.linkedin.get_or_insert_with(|| value.to_string());
    } else if URL_RE.is_match(value) {
        contact.portfolio.get_or_insert_with(|| value.to_string());
    } else if is_phone(value) {
        if contact.phone.is_empty() {
            contact.phone = value.to_string();
        }
    } else if contact.location.is_empty() && looks_like_location(value) {
        contact.location = value.to_string();
    }
}

fn looks_like_location(value: &str) -> bool {
    value.chars().count() <= MAX_LOCATION_CHARS
        && value.chars().any(char::is_alphabetic)
        && (value.contains(',') || value.eq_ignore_ascii_case("remote"))
}

/// Drops an `Email:`-style label in front of a value.
fn strip_label(segment: &str) -> &str {
    const LABELS: &[&str] = &[
        "email", "e-mail", "phone", "tel", "mobile", "location", "address", "linkedin",
        "portfolio", "website", "github",
    ];
    if let Some((label, rest)) = segment.split_once(':') {
        // "https://..." also contains a colon.
        if LABELS.contains(&label.trim().to_lowercase().as_str()) {
            return rest.trim();
        }
    }
    segment
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// An entry line split into text and date segments.
struct EntryLine {
    texts: Vec<String>,
    period: String,
}

fn split_entry_line(line: &str) -> EntryLine {
    let mut texts = Vec::new();
    let mut dates = Vec::new();
    for segment in ENTRY_SPLIT_RE.split(line) {
        let segment = segment.trim().trim_matches(|c| c == '(' || c == ')').trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(caps) = YEAR_RANGE_RE.captures(segment) {
            dates.push(caps[1].to_string());
            dates.push(caps[2].to_string());
        } else if DATE_SEGMENT_RE.is_match(segment) {
            dates.push(format_month_year(segment));
        } else {
            texts.push(segment.to_string());
        }
    }
    EntryLine {
        texts,
        period: dates.join(" - "),
    }
}

fn parse_experience(lines: &[Token]) -> Vec<ExperienceEntry> {
    let mut entries: Vec<ExperienceEntry> = Vec::new();
    let mut raw_bullets: Vec<Vec<String>> = Vec::new();

    for token in lines {
        match token {
            Token::Bullet(text) => {
                if entries.is_empty() {
                    entries.push(ExperienceEntry::default());
                    raw_bullets.push(Vec::new());
                }
                if let Some(bullets) = raw_bullets.last_mut() {
                    bullets.push(text.clone());
                }
            }
            Token::Text(text) => {
                let parsed = split_entry_line(text);
                let open = entries
                    .last_mut()
                    .zip(raw_bullets.last())
                    .filter(|(_, bullets)| bullets.is_empty())
                    .map(|(entry, _)| entry);

                if let Some(entry) = open {
                    if parsed.texts.is_empty() && entry.period.is_empty() {
                        entry.period = parsed.period;
                        continue;
                    }
                    if parsed.texts.len() == 1 && !entry.title.is_empty() && entry.company.is_empty() {
                        fill_company(entry, &parsed.texts[0]);
                        if entry.period.is_empty() {
                            entry.period = parsed.period;
                        }
                        continue;
                    }
                }

                if parsed.texts.is_empty() {
                    continue;
                }
                entries.push(entry_from_line(parsed));
                raw_bullets.push(Vec::new());
            }
            Token::Heading(_) | Token::Blank => {}
        }
    }

    entries
        .into_iter()
        .zip(raw_bullets)
        .map(|(mut entry, bullets)| {
            entry.title = title_case(&entry.title);
            entry.achievements = filter_bullets(bullets);
            entry
        })
        .filter(|e| !e.title.is_empty() || !e.company.is_empty() || !e.achievements.is_empty())
        .collect()
}

fn entry_from_line(parsed: EntryLine) -> ExperienceEntry {
    let mut texts = parsed.texts.into_iter();
    let mut entry = ExperienceEntry {
        period: parsed.period,
        ..Default::default()
    };

    if let Some(first) = texts.next() {
        match first.split_once(" at ") {
            Some((title, company)) => {
                entry.title = title.trim().to_string();
                fill_company(&mut entry, company.trim());
            }
            None => entry.title = first,
        }
    }
    for text in texts {
        if entry.company.is_empty() {
            entry.company = text;
        } else if entry.location.is_empty() {
            entry.location = text;
        }
    }
    entry
}

/// `"Acme Corp, Austin, TX"` fills company and, if still empty, location.
fn fill_company(entry: &mut ExperienceEntry, text: &str) {
    match text.split_once(',') {
        Some((company, location)) if entry.location.is_empty() => {
            entry.company = company.trim().to_string();
            entry.location = location.trim().to_string();
        }
        _ => entry.company = text.trim().to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

fn parse_education(lines: &[Token]) -> Vec<EducationEntry> {
    let mut entries: Vec<EducationEntry> = Vec::new();

    for token in lines {
        match token {
            Token::Bullet(text) => {
                if let Some(entry) = entries.last_mut() {
                    append_detail(entry, text);
                }
            }
            Token::Text(text) => {
                let parsed = split_entry_line(text);
                let starts_entry = parsed.texts.iter().any(|t| DEGREE_RE.is_match(t)) || entries.is_empty();

                if starts_entry {
                    entries.push(education_from_line(parsed));
                    continue;
                }
                let Some(entry) = entries.last_mut() else { continue };
                if entry.period.is_empty() {
                    entry.period = parsed.period;
                }
                let joined = parsed.texts.join(", ");
                if joined.is_empty() {
                    continue;
                }
                if entry.school.is_empty() {
                    entry.school = joined;
                } else {
                    append_detail(entry, &joined);
                }
            }
            Token::Heading(_) | Token::Blank => {}
        }
    }

    entries
        .into_iter()
        .map(|mut entry| {
            entry.degree = title_case(&entry.degree);
            entry
        })
        .filter(|e| !e.degree.is_empty() || !e.school.is_empty())
        .collect()
}

fn education_from_line(parsed: EntryLine) -> EducationEntry {
    let mut entry = EducationEntry {
        period: parsed.period,
        ..Default::default()
    };

    // "BSc Computer Science, University of Texas, 2016" arrives as one segment.
    let parts: Vec<String> = if parsed.texts.len() == 1 {
        parsed.texts[0].split(',').map(|p| p.trim().to_string()).collect()
    } else {
        parsed.texts
    };

    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if DATE_SEGMENT_RE.is_match(&part) {
            if entry.period.is_empty() {
                entry.period = format_month_year(&part);
            }
        } else if entry.degree.is_empty() && DEGREE_RE.is_match(&part) {
            entry.degree = part;
        } else if entry.school.is_empty() {
            entry.school = part;
        } else {
            append_detail(&mut entry, &part);
        }
    }
    entry
}

fn append_detail(entry: &mut EducationEntry, text: &str) {
    let text = clean_inline(text);
    if text.is_empty() {
        return;
    }
    entry.details = Some(match entry.details.take() {
        Some(existing) => format!("{existing}; {text}"),
        None => text,
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Routes skill lines into `skills`. `Soft Skills: a, b` and `Languages: c`
/// labels pick the target set; everything else is technical.
pub fn collect_skills(lines: &[Token], skills: &mut Skills) {
    for token in lines {
        let Some(line) = token.text() else { continue };
        let (label, items) = match line.split_once(':') {
            Some((label, items)) => (label.to_lowercase(), items),
            None => (String::new(), line),
        };

        for item in split_items(items) {
            if label.contains("soft") {
                skills.add_soft(title_case(&item));
            } else if label.contains("language") && !label.contains("programming") {
                skills.add_language(title_case(&item));
            } else {
                skills.add_technical(normalize_skill(&item));
            }
        }
    }
}

fn split_items(line: &str) -> Vec<String> {
    SKILL_SPLIT_RE
        .split(line)
        .map(clean_inline)
        .filter(|item| !item.is_empty() && item.chars().count() <= MAX_SKILL_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
JANE DOE
jane@x.com | (555) 010-2000 | Austin, TX | linkedin.com/in/janedoe | janedoe.dev

PROFESSIONAL SUMMARY
Backend engineer with a decade of payments experience.

WORK EXPERIENCE
Senior Engineer | Acme Corp | Remote | 2020-06 - Present
- Led the migration of a legacy billing system to a new platform
- Fixed bugs
Software Engineer at Globex
Jan 2016 – May 2020
- Built churn dashboards used by 40 account managers

EDUCATION
BSc Computer Science, University of Texas, 2016
- Dean's list, graduated with honors

SKILLS
Technical: python, sql
Soft Skills: leadership; mentoring
kubernetes

LANGUAGES
English, spanish

CERTIFICATIONS
AWS Certified Solutions Architect
";

    #[test]
    fn test_header_and_contact() {
        let resume = build_from_text(RESUME);
        assert_eq!(resume.name, "Jane Doe");
        assert_eq!(resume.contact.email, "jane@x.com");
        assert_eq!(resume.contact.phone, "(555) 010-2000");
        assert_eq!(resume.contact.location, "Austin, TX");
        assert_eq!(resume.contact.linkedin.as_deref(), Some("linkedin.com/in/janedoe"));
        assert_eq!(resume.contact.portfolio.as_deref(), Some("janedoe.dev"));
    }

    #[test]
    fn test_summary() {
        let resume = build_from_text(RESUME);
        assert_eq!(resume.summary, "Backend engineer with a decade of payments experience.");
    }

    #[test]
    fn test_experience_entries() {
        let resume = build_from_text(RESUME);
        assert_eq!(resume.experience.len(), 2);

        let first = &resume.experience[0];
        assert_eq!(first.title, "Senior Engineer");
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(first.location, "Remote");
        assert_eq!(first.period, "June 2020 - Present");
        assert_eq!(
            first.achievements,
            vec!["Led the migration of a legacy billing system to a new platform"],
            "short bullet filtered"
        );

        let second = &resume.experience[1];
        assert_eq!(second.title, "Software Engineer");
        assert_eq!(second.company, "Globex");
        assert_eq!(second.period, "Jan 2016 - May 2020");
        assert_eq!(second.achievements.len(), 1);
    }

    #[test]
    fn test_education_entry() {
        let resume = build_from_text(RESUME);
        assert_eq!(resume.education.len(), 1);
        let edu = &resume.education[0];
        assert_eq!(edu.degree, "BSc Computer Science");
        assert_eq!(edu.school, "University of Texas");
        assert_eq!(edu.period, "2016");
        assert_eq!(edu.details.as_deref(), Some("Dean's list, graduated with honors"));
    }

    #[test]
    fn test_skills_routing() {
        let resume = build_from_text(RESUME);
        assert_eq!(resume.skills.technical, vec!["Python", "SQL", "Kubernetes"]);
        assert_eq!(resume.skills.soft, vec!["Leadership", "Mentoring"]);
        assert_eq!(resume.skills.languages, vec!["English", "Spanish"]);
    }

    #[test]
    fn test_certifications() {
        let resume = build_from_text(RESUME);
        assert_eq!(resume.certifications, vec!["AWS Certified Solutions Architect"]);
    }

    #[test]
    fn test_unstructured_text_degrades_to_name_only() {
        let resume = build_from_text("just a name\nand a second line");
        assert_eq!(resume.name, "Just a Name");
        assert!(resume.experience.is_empty());
        assert!(resume.summary.is_empty());
    }

    #[test]
    fn test_empty_text_gives_empty_structure() {
        assert!(build_from_text("").is_empty());
    }

    #[test]
    fn test_split_entry_line_year_range() {
        let parsed = split_entry_line("Analyst | Initech | 2014-2016");
        assert_eq!(parsed.texts, vec!["Analyst", "Initech"]);
        assert_eq!(parsed.period, "2014 - 2016");
    }

    #[test]
    fn test_strip_label_keeps_urls() {
        assert_eq!(strip_label("Email: jane@x.com"), "jane@x.com");
        assert_eq!(strip_label("https://janedoe.dev"), "https://janedoe.dev");
    }
}

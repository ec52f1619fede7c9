//! Bullet quality filter: the last gate before an achievement line reaches a document.
//!
//! Mis-parsed fragments (dates, markdown residue, cut-off job titles) would
//! otherwise print as real achievements, so anything suspect is dropped silently.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::tokenizer::strip_bullet_marker;

/// Achievements shorter than this (in characters) are rejected.
pub const MIN_BULLET_CHARS: usize = 20;
/// Fragments ending in a role word are rejected below this length.
const TITLE_FRAGMENT_MAX_CHARS: usize = 30;

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?|sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)\.?\s+\d{4}$",
    )
    .unwrap()
});
static BARE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());
static DASH_PRESENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[-–—]\s*(present|current)$").unwrap());
static ROLE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(engineer|developer|manager|analyst|designer|director|specialist|consultant|lead|intern|architect|coordinator|administrator|officer|scientist|associate|assistant|representative|executive)$",
    )
    .unwrap()
});
static SENTENCE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").unwrap());

/// Words whose trailing period does not end a sentence. Stored without the final dot.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "approx", "inc", "ltd", "llc", "corp", "co", "dept", "no", "dr",
    "mr", "mrs", "ms", "jr", "sr", "st", "u.s", "u.k",
];

/// Why a candidate was rejected. Useful in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    MonthYear,
    BareYear,
    MarkdownBold,
    DashPresent,
    TitleFragment,
}

/// Returns the reason `candidate` must not be used as an achievement, if any.
pub fn rejection_reason(candidate: &str) -> Option<Rejection> {
    let text = candidate.trim();
    let chars = text.chars().count();

    if MONTH_YEAR_RE.is_match(text) {
        return Some(Rejection::MonthYear);
    }
    if BARE_YEAR_RE.is_match(text) {
        return Some(Rejection::BareYear);
    }
    if DASH_PRESENT_RE.is_match(text) {
        return Some(Rejection::DashPresent);
    }
    if text.contains("**") {
        return Some(Rejection::MarkdownBold);
    }
    if chars < MIN_BULLET_CHARS {
        return Some(Rejection::TooShort);
    }
    if chars < TITLE_FRAGMENT_MAX_CHARS && ROLE_SUFFIX_RE.is_match(text) {
        return Some(Rejection::TitleFragment);
    }
    None
}

pub fn is_quality_bullet(candidate: &str) -> bool {
    rejection_reason(candidate).is_none()
}

/// Keeps the candidates that pass the filter, trimmed, in their original order.
pub fn filter_bullets<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let text = candidate.as_ref().trim();
            match rejection_reason(text) {
                None => Some(text.to_string()),
                Some(reason) => {
                    tracing::debug!(?reason, candidate = text, "Dropped achievement candidate");
                    None
                }
            }
        })
        .collect()
}

/// Splits a free-text job description into achievement candidates and filters them.
///
/// Multi-line input splits on lines; a single paragraph splits on sentence ends.
pub fn split_description(description: &str) -> Vec<String> {
    let lines: Vec<&str> = description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let candidates: Vec<String> = if lines.len() > 1 {
        lines
            .into_iter()
            .map(|line| strip_bullet_marker(line).unwrap_or(line).trim().to_string())
            .collect()
    } else {
        lines
            .first()
            .map(|paragraph| {
                split_sentences(paragraph)
                    .into_iter()
                    .map(|s| s.trim().trim_end_matches('.').to_string())
                    .collect()
            })
            .unwrap_or_default()
    };

    filter_bullets(candidates)
}

/// Splits at `. ` unless the period closes an abbreviation or a single-letter initial.
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for found in SENTENCE_BREAK_RE.find_iter(paragraph) {
        let word = paragraph[start..found.start()]
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .trim_start_matches(['(', '[', '"', '\''])
            .to_lowercase();
        let initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
        if initial || ABBREVIATIONS.contains(&word.as_str()) {
            continue;
        }
        sentences.push(&paragraph[start..found.start()]);
        start = found.end();
    }
    sentences.push(&paragraph[start..]);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_filter_scenario_from_mixed_list() {
        let kept = filter_bullets([
            "March 2021",
            "Shipped feature X to 10,000 users",
            "**bold artifact**",
        ]);
        assert_eq!(kept, vec!["Shipped feature X to 10,000 users"]);
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(rejection_reason("short"), Some(Rejection::TooShort));
        assert_eq!(rejection_reason("June 2020"), Some(Rejection::MonthYear));
        assert_eq!(rejection_reason("Sept. 2019"), Some(Rejection::MonthYear));
        assert_eq!(rejection_reason("2021"), Some(Rejection::BareYear));
        assert_eq!(rejection_reason("- Present"), Some(Rejection::DashPresent));
        assert_eq!(
            rejection_reason("Led **migration** of the billing platform"),
            Some(Rejection::MarkdownBold)
        );
        assert_eq!(
            rejection_reason("Senior Software Engineer"),
            Some(Rejection::TitleFragment)
        );
    }

    #[test]
    fn test_long_line_ending_in_role_word_is_kept() {
        assert!(is_quality_bullet(
            "Mentored and promoted a junior engineer to senior engineer"
        ));
    }

    #[test]
    fn test_realistic_achievement_is_kept() {
        assert!(is_quality_bullet(
            "Led the migration of a legacy billing system to a new platform"
        ));
    }

    #[test]
    fn test_split_description_by_lines() {
        let bullets = split_description(
            "- Built a data pipeline processing 2M events per day\n- Fixed bugs\n• Reduced cloud spend by 30% through rightsizing",
        );
        assert_eq!(
            bullets,
            vec![
                "Built a data pipeline processing 2M events per day",
                "Reduced cloud spend by 30% through rightsizing",
            ]
        );
    }

    #[test]
    fn test_split_description_by_sentences() {
        let bullets = split_description(
            "Owned the onboarding funnel for the mobile app. Ran standups. Grew activation by 12% in two quarters.",
        );
        assert_eq!(
            bullets,
            vec![
                "Owned the onboarding funnel for the mobile app",
                "Grew activation by 12% in two quarters",
            ]
        );
    }

    #[test]
    fn test_split_description_keeps_abbreviations_inside_sentences() {
        let bullets = split_description(
            "Built internal tools (e.g. deploy bots and dashboards) for the platform team. Partnered with Acme Inc. on a data sharing agreement worth $2M. Led migration to AWS vs. on-prem hosting for all services.",
        );
        assert_eq!(
            bullets,
            vec![
                "Built internal tools (e.g. deploy bots and dashboards) for the platform team",
                "Partnered with Acme Inc. on a data sharing agreement worth $2M",
                "Led migration to AWS vs. on-prem hosting for all services",
            ],
            "abbreviations must not end a sentence"
        );
    }

    #[test]
    fn test_split_sentences_skips_initials() {
        assert_eq!(
            split_sentences("Worked with J. Smith on pricing. Shipped it"),
            vec!["Worked with J. Smith on pricing", "Shipped it"]
        );
    }

    #[test]
    fn test_split_description_empty() {
        assert!(split_description("").is_empty());
        assert!(split_description("   \n  ").is_empty());
    }

    #[test]
    fn proptest_short_strings_always_rejected() {
        proptest!(|(text in "\\PC{0,19}")| {
            prop_assume!(text.trim().chars().count() < MIN_BULLET_CHARS);
            prop_assert!(!is_quality_bullet(&text));
        });
    }

    #[test]
    fn proptest_month_year_always_rejected() {
        let months = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        proptest!(|(month in 0usize..12, year in 1900u32..2100)| {
            let text = format!("{} {}", months[month], year);
            prop_assert!(!is_quality_bullet(&text));
        });
    }
}

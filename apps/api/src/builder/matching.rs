//! Locates the block of AI-enhanced bullets that belongs to one form job.
//!
//! Anchor search runs in three passes, strongest first:
//! 1. a line (or adjacent line pair) naming both the company and the title;
//! 2. a line naming the company alone;
//! 3. a line naming the title alone, only when no other job shares the title.
//!
//! In every pass a line that mentions a longer sibling company containing our
//! company name ("Acme Corp" while looking for "Acme") is skipped, so a short
//! name never steals a longer name's bullets. Lines under a summary, education,
//! skills or other known non-experience heading are never anchors.

use regex::Regex;
use tracing::{debug, warn};

use crate::models::form::FormExperience;
use crate::parsing::bullets::filter_bullets;
use crate::parsing::classifier::{canonical_key, is_known_section, EXPERIENCE};
use crate::parsing::tokenizer::{tokenize, Token};

/// Returns the quality-filtered bullets under this job's block in `ai_text`.
///
/// Empty when no block can be anchored.
pub fn find_job_bullets(
    ai_text: &str,
    job: &FormExperience,
    all_jobs: &[FormExperience],
) -> Vec<String> {
    let tokens = tokenize(ai_text);
    let Some(anchor) = locate_anchor(&tokens, job, all_jobs) else {
        debug!(company = %job.company, title = %job.title, "No AI block found for job");
        return Vec::new();
    };

    let sibling_companies: Vec<WordMatcher> = all_jobs
        .iter()
        .filter(|other| !same_job(other, job))
        .filter_map(|other| WordMatcher::new(&other.company))
        .collect();

    let mut raw = Vec::new();
    for token in &tokens[anchor + 1..] {
        match token {
            Token::Heading(_) => break,
            Token::Bullet(text) => raw.push(text.as_str()),
            Token::Text(text) => {
                // A plain line after bullets starts the next job; before bullets
                // it is a period or company line belonging to this one.
                if !raw.is_empty() || sibling_companies.iter().any(|m| m.is_match(text)) {
                    break;
                }
            }
            Token::Blank => {}
        }
    }

    filter_bullets(raw)
}

fn locate_anchor(tokens: &[Token], job: &FormExperience, all_jobs: &[FormExperience]) -> Option<usize> {
    let company = WordMatcher::new(&job.company);
    let title = WordMatcher::new(&job.title);

    let longer_siblings: Vec<WordMatcher> = all_jobs
        .iter()
        .filter(|other| !same_job(other, job))
        .filter(|other| {
            let ours = job.company.trim().to_lowercase();
            let theirs = other.company.trim().to_lowercase();
            !ours.is_empty() && theirs.len() > ours.len() && theirs.contains(&ours)
        })
        .filter_map(|other| WordMatcher::new(&other.company))
        .collect();

    let searchable = job_search_mask(tokens);
    let candidate = |index: usize| {
        let token: &Token = tokens.get(index)?;
        if token.is_bullet() || !searchable[index] {
            return None;
        }
        let text = token.text()?;
        if longer_siblings.iter().any(|m| m.is_match(text)) {
            return None;
        }
        Some(text)
    };

    // Pass 1: company and title together, on one line or two adjacent lines.
    if let (Some(company), Some(title)) = (&company, &title) {
        for index in 0..tokens.len() {
            let Some(line) = candidate(index) else { continue };
            let has_company = company.is_match(line);
            let has_title = title.is_match(line);
            if has_company && has_title {
                return Some(index);
            }
            if has_company || has_title {
                if let Some(next) = candidate(index + 1) {
                    let pair = (has_company && title.is_match(next))
                        || (has_title && company.is_match(next));
                    if pair {
                        return Some(index + 1);
                    }
                }
            }
        }
    }

    if !longer_siblings.is_empty() {
        warn!(
            company = %job.company,
            "Company name is a substring of another job's company; matching conservatively"
        );
    }

    // Pass 2: company alone.
    if let Some(company) = &company {
        if let Some(index) = (0..tokens.len()).find(|&i| candidate(i).is_some_and(|l| company.is_match(l))) {
            debug!(company = %job.company, "AI block anchored on company only");
            return Some(index);
        }
    }

    // Pass 3: title alone, only if no other job has the same title.
    let title = title?;
    let shared_title = all_jobs
        .iter()
        .filter(|other| other.title.trim().eq_ignore_ascii_case(job.title.trim()))
        .count()
        > 1;
    if shared_title {
        warn!(title = %job.title, "Title shared by several jobs; refusing title-only match");
        return None;
    }
    let index = (0..tokens.len()).find(|&i| candidate(i).is_some_and(|l| title.is_match(l)))?;
    debug!(title = %job.title, "AI block anchored on title only");
    Some(index)
}

/// Per token: may it anchor a job block? False under any known section
/// heading other than experience; text before the first heading and under
/// unknown headings stays searchable.
fn job_search_mask(tokens: &[Token]) -> Vec<bool> {
    let mut searchable = true;
    tokens
        .iter()
        .map(|token| {
            if let Token::Heading(heading) = token {
                let key = canonical_key(heading);
                searchable = key == EXPERIENCE || !is_known_section(&key);
            }
            searchable
        })
        .collect()
}

fn same_job(a: &FormExperience, b: &FormExperience) -> bool {
    std::ptr::eq(a, b) || (a.company == b.company && a.title == b.title && a.start_date == b.start_date)
}

/// Case-insensitive whole-word matcher for a literal phrase.
struct WordMatcher(Regex);

impl WordMatcher {
    fn new(phrase: &str) -> Option<Self> {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return None;
        }
        let pattern = format!(r"(?i)(?:^|[^\w]){}(?:$|[^\w])", regex::escape(phrase));
        Regex::new(&pattern).ok().map(WordMatcher)
    }

    fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

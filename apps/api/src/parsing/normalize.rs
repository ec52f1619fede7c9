//! Entry Normalizer: pure casing and date helpers applied to every extracted value.

use chrono::Month;
use once_cell::sync::Lazy;
use regex::Regex;

/// Connective words kept lower-case anywhere but first position.
const CONNECTIVES: &[&str] = &[
    "of", "in", "and", "the", "for", "to", "a", "an", "on", "at", "by", "with",
];

/// Always rendered upper-case.
const ACRONYMS: &[&str] = &[
    "it", "ceo", "cto", "cfo", "coo", "cio", "vp", "mba", "bs", "ba", "aws",
    "gcp", "ui", "ux", "api", "sql", "hr", "qa", "seo", "crm", "erp", "saas", "b2b", "b2c", "ai",
    "ml", "kpi", "pmp", "usa", "uk", "nyc", "etl", "rest", "html", "css", "php", "dba", "sre",
];

/// Words with irregular casing. Keys are the lower-case form of the value.
const SPECIAL_WORDS: &[(&str, &str)] = &[
    ("linkedin", "LinkedIn"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("ios", "iOS"),
    ("macos", "macOS"),
    ("iphone", "iPhone"),
    ("devops", "DevOps"),
    ("mongodb", "MongoDB"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("graphql", "GraphQL"),
    ("node.js", "Node.js"),
    ("youtube", "YouTube"),
    ("wordpress", "WordPress"),
    ("powerpoint", "PowerPoint"),
    ("ebay", "eBay"),
    ("phd", "PhD"),
    ("bsc", "BSc"),
    ("msc", "MSc"),
];

/// Canonical casing for technology terms. Matched against the whole lower-cased skill.
const TECH_TERMS: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("js", "JavaScript"),
    ("typescript", "TypeScript"),
    ("ts", "TypeScript"),
    ("sql", "SQL"),
    ("nosql", "NoSQL"),
    ("node.js", "Node.js"),
    ("nodejs", "Node.js"),
    ("node", "Node.js"),
    ("react", "React"),
    ("reactjs", "React"),
    ("react.js", "React"),
    ("vue", "Vue.js"),
    ("vue.js", "Vue.js"),
    ("angular", "Angular"),
    ("html", "HTML"),
    ("html5", "HTML5"),
    ("css", "CSS"),
    ("css3", "CSS3"),
    ("aws", "AWS"),
    ("gcp", "GCP"),
    ("azure", "Azure"),
    ("c++", "C++"),
    ("c#", "C#"),
    (".net", ".NET"),
    ("python", "Python"),
    ("java", "Java"),
    ("go", "Go"),
    ("golang", "Go"),
    ("rust", "Rust"),
    ("ruby on rails", "Ruby on Rails"),
    ("php", "PHP"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("k8s", "Kubernetes"),
    ("terraform", "Terraform"),
    ("postgresql", "PostgreSQL"),
    ("postgres", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mongodb", "MongoDB"),
    ("redis", "Redis"),
    ("kafka", "Kafka"),
    ("graphql", "GraphQL"),
    ("rest", "REST"),
    ("rest api", "REST API"),
    ("rest apis", "REST APIs"),
    ("ci/cd", "CI/CD"),
    ("git", "Git"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("linux", "Linux"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("scikit-learn", "scikit-learn"),
    ("pandas", "pandas"),
    ("numpy", "NumPy"),
    ("fastapi", "FastAPI"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("excel", "Excel"),
    ("power bi", "Power BI"),
    ("tableau", "Tableau"),
    ("salesforce", "Salesforce"),
    ("jira", "Jira"),
    ("figma", "Figma"),
    ("ios", "iOS"),
    ("android", "Android"),
    ("swift", "Swift"),
    ("kotlin", "Kotlin"),
    ("machine learning", "Machine Learning"),
];

static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})(?:-\d{1,2})?$").unwrap());
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Title case
// ────────────────────────────────────────────────────────────────────────────

/// Title-cases `input`.
///
/// Whitespace collapses to single spaces. Each word is lower-cased and then
/// capitalized, except connectives after the first word, acronyms, and the
/// special-word table. A word already written in mixed case (`McKinsey`,
/// `PostgreSQL`) is kept as typed. Hyphenated words are handled per part.
/// Idempotent.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| title_case_token(token, index == 0))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_token(token: &str, first_word: bool) -> String {
    let (prefix, core, suffix) = split_affixes(token);
    if core.is_empty() {
        return token.to_string();
    }

    let body = if let Some(special) = lookup(SPECIAL_WORDS, &core.to_lowercase()) {
        special.to_string()
    } else {
        core.split('-')
            .enumerate()
            .map(|(part_index, part)| {
                if is_mixed_case(part) {
                    part.to_string()
                } else {
                    title_case_word(&part.to_lowercase(), first_word && part_index == 0)
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    };

    format!("{prefix}{body}{suffix}")
}

/// An upper-case letter past the first position alongside a lower-case one.
fn is_mixed_case(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase) && word.chars().any(char::is_lowercase)
}

/// Cases one already lower-cased word.
fn title_case_word(lower: &str, first: bool) -> String {
    if let Some(special) = lookup(SPECIAL_WORDS, lower) {
        return special.to_string();
    }
    if ACRONYMS.contains(&lower) {
        return lower.to_uppercase();
    }
    if !first && CONNECTIVES.contains(&lower) {
        return lower.to_string();
    }
    capitalize(lower)
}

/// Upper-cases the first character when that maps cleanly back to itself.
fn capitalize(lower: &str) -> String {
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u.to_lowercase().eq(std::iter::once(first)) => {
            let mut out = String::with_capacity(lower.len());
            out.push(u);
            out.push_str(chars.as_str());
            out
        }
        _ => lower.to_string(),
    }
}

/// Splits surrounding punctuation off a token: `"(Acme),"` → `("(", "Acme", "),")`.
fn split_affixes(token: &str) -> (&str, &str, &str) {
    const LEADING: &[char] = &['(', '[', '"', '\'', '“', '‘'];
    const TRAILING: &[char] = &[')', ']', '"', '\'', '”', '’', ',', ';', ':', '.', '!', '?'];
    let start = token.len() - token.trim_start_matches(LEADING).len();
    let rest = &token[start..];
    let core = rest.trim_end_matches(TRAILING);
    let suffix = &rest[core.len()..];
    (&token[..start], core, suffix)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

/// Title-cases a person's name only when it was typed entirely in one case.
pub fn normalize_name(name: &str) -> String {
    let cleaned = clean_inline(name);
    let letters: Vec<char> = cleaned.chars().filter(|c| c.is_alphabetic()).collect();
    let single_case = letters.iter().all(|c| c.is_lowercase())
        || letters.iter().all(|c| c.is_uppercase());
    if single_case {
        title_case(&cleaned)
    } else {
        cleaned
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Canonical casing for a skill: the technology table first, then title case.
pub fn normalize_skill(term: &str) -> String {
    let cleaned = clean_inline(term);
    let lower = cleaned.to_lowercase();
    match lookup(TECH_TERMS, &lower) {
        Some(canonical) => canonical.to_string(),
        None => title_case(&cleaned),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Renders a `YYYY-MM` token as `"<Month> <YYYY>"`.
///
/// Empty stays empty, `current`/`present` becomes `Present`, and anything
/// else (already formatted text) passes through trimmed.
pub fn format_month_year(raw: &str) -> String {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("present") || value.eq_ignore_ascii_case("current") {
        return "Present".to_string();
    }
    if let Some(caps) = YEAR_MONTH_RE.captures(value) {
        let month = caps[2]
            .parse::<u8>()
            .ok()
            .and_then(|m| Month::try_from(m).ok());
        if let Some(month) = month {
            return format!("{} {}", month.name(), &caps[1]);
        }
    }
    value.to_string()
}

/// Joins a start and end date into a display period.
pub fn format_period(start: &str, end: &str, current: bool) -> String {
    let start = format_month_year(start);
    let end = if current {
        "Present".to_string()
    } else {
        format_month_year(end)
    };
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inline cleanup
// ────────────────────────────────────────────────────────────────────────────

/// Removes inline markdown (`**`, `__`, backticks) and collapses whitespace.
pub fn clean_inline(text: &str) -> String {
    let stripped = text.replace("**", "").replace("__", "").replace('`', "");
    SPACES_RE.replace_all(stripped.trim(), " ").into_owned()
}

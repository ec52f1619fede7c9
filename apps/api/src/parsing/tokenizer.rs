//! Line tokenizer for loosely formatted resume prose.
//!
//! Each input line becomes exactly one [`Token`]. The heading rules are the
//! only place the "what is a section boundary" heuristic lives:
//! - a `#`-prefixed line is a markdown heading (the `#` run is stripped);
//! - an ALL CAPS line under 30 characters that is not a bullet;
//! - a line ending in `:` with at most 4 words.
//!
//! Lines that look like contact rows or comma lists (`@`, `|`, `,`) are never
//! headings even when upper-cased.

use serde::{Deserialize, Serialize};

use crate::parsing::normalize::clean_inline;

/// ALL CAPS headings must be shorter than this many characters.
const MAX_CAPS_HEADING_CHARS: usize = 30;
/// Colon-terminated headings may have at most this many words.
const MAX_COLON_HEADING_WORDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Heading(String),
    Bullet(String),
    Text(String),
    Blank,
}

impl Token {
    /// Inner text for every token except `Blank`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Heading(t) | Token::Bullet(t) | Token::Text(t) => Some(t),
            Token::Blank => None,
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Token::Bullet(_))
    }
}

/// Tokenizes `text` line by line.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.lines().map(classify_line).collect()
}

/// Classifies a single line.
pub fn classify_line(raw: &str) -> Token {
    let line = raw.trim();
    if line.is_empty() || is_horizontal_rule(line) {
        return Token::Blank;
    }

    if line.starts_with('#') {
        let heading = clean_inline(line.trim_start_matches('#'));
        return if heading.is_empty() {
            Token::Blank
        } else {
            Token::Heading(heading.trim_end_matches(':').trim().to_string())
        };
    }

    if let Some(rest) = strip_bullet_marker(line) {
        let text = rest.trim();
        return if text.is_empty() {
            Token::Blank
        } else {
            Token::Bullet(text.to_string())
        };
    }

    if is_section_boundary(line) {
        let heading = clean_inline(line);
        return Token::Heading(heading.trim_end_matches(':').trim().to_string());
    }

    Token::Text(clean_inline(line))
}

/// Returns the text after a leading `-`, `•`, or `*` bullet marker.
///
/// `**bold**` openers are not bullets.
pub fn strip_bullet_marker(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if line.starts_with("**") {
        return None;
    }
    let mut chars = line.chars();
    match chars.next() {
        Some('-') | Some('•') | Some('*') | Some('▪') | Some('◦') => Some(chars.as_str()),
        _ => None,
    }
}

/// Applies the two heading heuristics to an already-trimmed, non-bullet line.
pub fn is_section_boundary(line: &str) -> bool {
    let stripped = line.trim().trim_matches('*').trim();
    if stripped.is_empty() || strip_bullet_marker(stripped).is_some() {
        return false;
    }
    if stripped.contains(['@', '|', ',']) {
        return false;
    }

    let has_letters = stripped.chars().any(char::is_alphabetic);
    let all_caps = has_letters
        && stripped
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| !c.is_lowercase());
    if all_caps && stripped.chars().count() < MAX_CAPS_HEADING_CHARS {
        return true;
    }

    stripped.ends_with(':')
        && stripped.len() > 1
        && stripped.split_whitespace().count() <= MAX_COLON_HEADING_WORDS
}

fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| matches!(c, '-' | '_' | '=' | '*'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_heading_is_stripped() {
        assert_eq!(
            classify_line("## Professional Experience"),
            Token::Heading("Professional Experience".to_string())
        );
    }

    #[test]
    fn test_caps_line_is_heading() {
        assert_eq!(
            classify_line("EDUCATION"),
            Token::Heading("EDUCATION".to_string())
        );
    }

    #[test]
    fn test_bold_caps_line_is_heading() {
        assert_eq!(classify_line("**SKILLS**"), Token::Heading("SKILLS".to_string()));
    }

    #[test]
    fn test_long_caps_line_is_text() {
        let line = "THIS LINE IS DEFINITELY LONGER THAN THIRTY CHARACTERS";
        assert!(matches!(classify_line(line), Token::Text(_)));
    }

    #[test]
    fn test_colon_heading_with_few_words() {
        assert_eq!(
            classify_line("Work Experience:"),
            Token::Heading("Work Experience".to_string())
        );
    }

    #[test]
    fn test_colon_line_with_many_words_is_text() {
        assert!(matches!(
            classify_line("Here is a list of my main achievements:"),
            Token::Text(_)
        ));
    }

    #[test]
    fn test_bullet_markers() {
        for line in ["- Built things", "• Built things", "* Built things"] {
            assert_eq!(
                classify_line(line),
                Token::Bullet("Built things".to_string()),
                "marker in {line:?}"
            );
        }
    }

    #[test]
    fn test_caps_bullet_is_not_heading() {
        assert_eq!(classify_line("- AWS"), Token::Bullet("AWS".to_string()));
    }

    #[test]
    fn test_bold_opener_is_not_bullet() {
        assert!(matches!(
            classify_line("**Senior Engineer** at Acme"),
            Token::Text(_)
        ));
    }

    #[test]
    fn test_contact_row_in_caps_is_not_heading() {
        assert!(matches!(
            classify_line("JANE@X.COM | 555-0100"),
            Token::Text(_)
        ));
    }

    #[test]
    fn test_blank_and_rules() {
        assert_eq!(classify_line("   "), Token::Blank);
        assert_eq!(classify_line("---"), Token::Blank);
        assert_eq!(classify_line("-"), Token::Blank);
    }

    #[test]
    fn test_tokenize_preserves_line_count() {
        let text = "JANE DOE\njane@x.com\n\nEXPERIENCE\n- Did a thing";
        assert_eq!(tokenize(text).len(), 5);
    }
}

//! Static font-metric tables for the two document font families.
//!
//! Widths are the standard Type 1 AFM advance widths in 1/1000 em for the
//! built-in PDF fonts (Helvetica, Times). The word-processor output uses the
//! metric-compatible Arial and Times New Roman, so one table serves both.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Modern and ATS templates.
    Sans,
    /// Traditional template.
    Serif,
}

impl FontFamily {
    /// Font name written into word-processor runs.
    pub fn docx_name(self) -> &'static str {
        match self {
            FontFamily::Sans => "Arial",
            FontFamily::Serif => "Times New Roman",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Built-in PDF base font for a family and weight.
pub fn pdf_base_font(family: FontFamily, weight: FontWeight) -> &'static str {
    match (family, weight) {
        (FontFamily::Sans, FontWeight::Regular) => "Helvetica",
        (FontFamily::Sans, FontWeight::Bold) => "Helvetica-Bold",
        (FontFamily::Serif, FontWeight::Regular) => "Times-Roman",
        (FontFamily::Serif, FontWeight::Bold) => "Times-Bold",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in 1/1000 em.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    pub fn space_width(&self, size_pt: f32) -> f32 {
        f32::from(self.widths[0]) * size_pt / 1000.0
    }
}

/// Greedy word-wrap of `text` into lines no wider than `max_width` points.
///
/// A single word wider than the line is broken by characters so nothing
/// ever runs past the column edge. Empty text yields no lines.
pub fn wrap_lines(text: &str, metrics: &FontMetricTable, size_pt: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let space_w = metrics.space_width(size_pt);

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word, size_pt);

        if word_w > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            let mut pieces = break_word(word, metrics, size_pt, max_width);
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current_width = metrics.measure_str(&last, size_pt);
                current = last;
            }
            continue;
        }

        if !current.is_empty() && current_width + space_w + word_w > max_width {
            // Current line is full: push it and start a new one.
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += space_w;
        }
        current.push_str(word);
        current_width += word_w;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, metrics: &FontMetricTable, size_pt: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let w = f32::from(metrics.char_width(c)) * size_pt / 1000.0;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_char_width: 500,
};

static TIMES_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %     &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W     X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [    \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {    |    }    ~
        394, 220, 394, 520,
    ],
    average_char_width: 540,
};

/// Returns the static metric table for a family and weight.
pub fn get_metrics(family: FontFamily, weight: FontWeight) -> &'static FontMetricTable {
    match (family, weight) {
        (FontFamily::Sans, FontWeight::Regular) => &HELVETICA,
        (FontFamily::Sans, FontWeight::Bold) => &HELVETICA_BOLD,
        (FontFamily::Serif, FontWeight::Regular) => &TIMES_ROMAN,
        (FontFamily::Serif, FontWeight::Bold) => &TIMES_BOLD,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Sans, FontWeight::Regular);
        assert_eq!(metrics.measure_str("", 10.0), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Sans, FontWeight::Regular);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056 units
        let width = metrics.measure_str("Rust", 10.0);
        assert!(
            (width - 20.56).abs() < 1e-3,
            "Rust width at 10pt should be ~20.56, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Serif, FontWeight::Regular);
        let width = metrics.measure_str("é", 1000.0);
        assert!(
            (width - f32::from(metrics.average_char_width)).abs() < 1e-2,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Architected distributed caching layer";
        let regular = get_metrics(FontFamily::Sans, FontWeight::Regular).measure_str(text, 10.0);
        let bold = get_metrics(FontFamily::Sans, FontWeight::Bold).measure_str(text, 10.0);
        assert!(bold > regular, "bold ({bold}) should measure wider than regular ({regular})");
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let metrics = get_metrics(FontFamily::Sans, FontWeight::Regular);
        assert_eq!(wrap_lines("Rust", metrics, 10.0, 200.0), vec!["Rust"]);
        assert!(wrap_lines("   ", metrics, 10.0, 200.0).is_empty());
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let metrics = get_metrics(FontFamily::Serif, FontWeight::Regular);
        let bullet = "Architected a distributed caching layer using Redis and consistent hashing, \
                      reducing p99 latency by 40% under 50k RPS peak load";
        let lines = wrap_lines(bullet, metrics, 10.0, 150.0);
        assert!(lines.len() > 1, "bullet should wrap, got {lines:?}");
        for line in &lines {
            assert!(metrics.measure_str(line, 10.0) <= 150.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), bullet.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_is_broken() {
        let metrics = get_metrics(FontFamily::Sans, FontWeight::Regular);
        let url = "https://example.com/a/very/long/path/that/never/ends/anywhere";
        let lines = wrap_lines(url, metrics, 10.0, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
    }

    #[test]
    fn proptest_wrapped_lines_fit() {
        proptest!(|(text in "[a-zA-Z ,.]{0,300}", width in 40.0f32..400.0)| {
            let metrics = get_metrics(FontFamily::Sans, FontWeight::Bold);
            for line in wrap_lines(&text, metrics, 10.0, width) {
                prop_assert!(metrics.measure_str(&line, 10.0) <= width + 1e-3);
            }
        });
    }

    #[test]
    fn test_pdf_base_font_names() {
        assert_eq!(pdf_base_font(FontFamily::Serif, FontWeight::Bold), "Times-Bold");
        assert_eq!(FontFamily::Sans.docx_name(), "Arial");
    }
}

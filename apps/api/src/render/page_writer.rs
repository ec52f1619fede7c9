//! PageWriter: the cursor and page-break bookkeeping behind the PDF output.
//!
//! Each column region keeps its own `(page, y)` cursor so the sidebar and the
//! main column paginate independently. Whenever a cursor moves onto a page that
//! does not exist yet, the page is created and every persistent background
//! (the Modern sidebar tint) is painted before any text lands on it.
//!
//! The writer emits plain [`DrawOp`]s in top-down coordinates; turning them
//! into PDF operators is the PDF module's job.

use std::collections::HashMap;

use crate::layout::block::{Align, BlockKind, DocumentLayout, LayoutBlock, Region, SizeClass};
use crate::layout::metrics::{get_metrics, wrap_lines, FontWeight};
use crate::models::template::Rgb;

/// Space above a heading unless it starts a column.
const HEADING_GAP: f32 = 10.0;
/// Space after a body, bullet, or rule block.
const BLOCK_GAP: f32 = 3.0;
const RULE_HEIGHT: f32 = 6.0;
const RULE_THICKNESS: f32 = 0.75;
/// Extra room between the accent bar and the first line of text.
const ACCENT_BAR_CLEARANCE: f32 = 20.0;
const BULLET_TEXT_GAP: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle; `y` is the top edge.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        baseline: f32,
        text: String,
        weight: FontWeight,
        size: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    page: usize,
    y: f32,
}

pub struct PageWriter<'a> {
    layout: &'a DocumentLayout,
    pages: Vec<Page>,
    cursors: HashMap<Region, Cursor>,
}

impl<'a> PageWriter<'a> {
    pub fn new(layout: &'a DocumentLayout) -> Self {
        let mut writer = Self {
            layout,
            pages: Vec::new(),
            cursors: HashMap::new(),
        };
        writer.start_page();
        if let Some(bar) = layout.accent_bar {
            writer.pages[0].ops.push(DrawOp::Rect {
                x: 0.0,
                y: 0.0,
                width: layout.geometry.width,
                height: bar.height,
                color: bar.color,
            });
        }
        writer
    }

    /// Lays out every block of the layout, in order.
    pub fn write_all(mut self) -> Self {
        let layout = self.layout;
        let blocks = &layout.blocks;
        for (index, block) in blocks.iter().enumerate() {
            let next = blocks[index + 1..].iter().find(|b| b.region == block.region);
            self.write_block(block, next);
        }
        self
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    // ── Cursor bookkeeping ────────────────────────────────────────────────

    fn top_of(&self, page: usize) -> f32 {
        let margin = self.layout.geometry.margin_top;
        match self.layout.accent_bar {
            Some(bar) if page == 0 => margin.max(bar.height + ACCENT_BAR_CLEARANCE),
            _ => margin,
        }
    }

    fn cursor(&mut self, region: Region) -> Cursor {
        let top = self.top_of(0);
        *self.cursors.entry(region).or_insert(Cursor { page: 0, y: top })
    }

    fn set_cursor(&mut self, region: Region, cursor: Cursor) {
        self.cursors.insert(region, cursor);
    }

    fn at_column_top(&mut self, region: Region) -> bool {
        let cursor = self.cursor(region);
        cursor.y <= self.top_of(cursor.page) + f32::EPSILON
    }

    /// Appends a page and repaints the persistent backgrounds on it.
    fn start_page(&mut self) {
        let geometry = &self.layout.geometry;
        let mut page = Page::default();
        for background in &self.layout.page_background {
            let (x, width) = match background.region {
                Region::Sidebar => (0.0, geometry.sidebar_width()),
                Region::Main => (geometry.sidebar_width(), geometry.width - geometry.sidebar_width()),
                Region::Full => (0.0, geometry.width),
            };
            page.ops.push(DrawOp::Rect {
                x,
                y: 0.0,
                width,
                height: geometry.height,
                color: background.color,
            });
        }
        self.pages.push(page);
    }

    /// Moves `region` to the top of its next page when `needed` points do not
    /// fit above the bottom margin. Returns whether a break happened.
    ///
    /// A column already at the top of a page never breaks again, so content
    /// taller than a page cannot loop.
    pub fn new_page_if_needed(&mut self, region: Region, needed: f32) -> bool {
        let cursor = self.cursor(region);
        let fits = cursor.y + needed <= self.layout.geometry.bottom_limit();
        if fits || self.at_column_top(region) {
            return false;
        }

        let page = cursor.page + 1;
        while self.pages.len() <= page {
            self.start_page();
        }
        let top = self.top_of(page);
        self.set_cursor(region, Cursor { page, y: top });
        true
    }

    fn advance(&mut self, region: Region, amount: f32) {
        let mut cursor = self.cursor(region);
        cursor.y += amount;
        self.set_cursor(region, cursor);
    }

    fn push_op(&mut self, region: Region, op: DrawOp) {
        let page = self.cursor(region).page;
        self.pages[page].ops.push(op);
    }

    // ── Writing ───────────────────────────────────────────────────────────

    /// Writes one already-wrapped line at the region's cursor.
    ///
    /// `indent` shifts left-aligned text right; centered text ignores it.
    pub fn write_line(&mut self, block: &LayoutBlock, text: &str, indent: f32) {
        let region = block.region;
        let size = block.size;
        self.new_page_if_needed(region, size.line_height());

        let frame = self.layout.geometry.column(region);
        let weight = block.emphasis.weight();
        let x = match block.align {
            Align::Left => frame.x + indent,
            Align::Center => {
                let width = get_metrics(self.layout.family, weight).measure_str(text, size.points());
                frame.x + ((frame.width - width) / 2.0).max(0.0)
            }
        };
        let baseline = self.cursor(region).y + size.points();
        self.push_op(
            region,
            DrawOp::Text {
                x,
                baseline,
                text: text.to_string(),
                weight,
                size: size.points(),
                color: block.color,
            },
        );
        self.advance(region, size.line_height());
    }

    /// Writes a heading, keeping it on the same page as `keep_with` points of
    /// whatever follows it.
    pub fn write_heading(&mut self, block: &LayoutBlock, keep_with: f32) {
        let region = block.region;
        let lines = self.wrap(block, 0.0);
        if !self.at_column_top(region) {
            self.advance(region, HEADING_GAP);
        }
        let needed = lines.len() as f32 * block.size.line_height() + keep_with;
        self.new_page_if_needed(region, needed);
        for line in &lines {
            self.write_line(block, line, 0.0);
        }
    }

    pub fn write_rule(&mut self, region: Region, color: Rgb) {
        self.new_page_if_needed(region, RULE_HEIGHT);
        let frame = self.layout.geometry.column(region);
        let y = self.cursor(region).y + 1.0;
        self.push_op(
            region,
            DrawOp::Line {
                x1: frame.x,
                x2: frame.x + frame.width,
                y,
                thickness: RULE_THICKNESS,
                color,
            },
        );
        self.advance(region, RULE_HEIGHT);
    }

    fn write_block(&mut self, block: &LayoutBlock, next: Option<&LayoutBlock>) {
        match block.kind {
            BlockKind::Heading => {
                let keep_with = next
                    .map(|n| match n.kind {
                        BlockKind::Rule => RULE_HEIGHT + SizeClass::Body.line_height(),
                        _ => n.size.line_height(),
                    })
                    .unwrap_or(0.0);
                self.write_heading(block, keep_with);
            }
            BlockKind::Body => {
                for line in self.wrap(block, 0.0) {
                    self.write_line(block, &line, 0.0);
                }
                self.advance(block.region, BLOCK_GAP);
            }
            BlockKind::Bullet => self.write_bullet(block),
            BlockKind::Rule => self.write_rule(block.region, block.color),
        }
    }

    /// Glyph in the left gutter, text hang-indented after it.
    fn write_bullet(&mut self, block: &LayoutBlock) {
        let glyph = self.layout.bullet_glyph.to_string();
        let metrics = get_metrics(self.layout.family, block.emphasis.weight());
        let indent = metrics.measure_str(&glyph, block.size.points()) + BULLET_TEXT_GAP;

        for (index, line) in self.wrap(block, indent).into_iter().enumerate() {
            if index == 0 {
                // The glyph shares the first line's page and baseline.
                self.new_page_if_needed(block.region, block.size.line_height());
                let frame = self.layout.geometry.column(block.region);
                let baseline = self.cursor(block.region).y + block.size.points();
                self.push_op(
                    block.region,
                    DrawOp::Text {
                        x: frame.x,
                        baseline,
                        text: glyph.clone(),
                        weight: block.emphasis.weight(),
                        size: block.size.points(),
                        color: block.color,
                    },
                );
            }
            self.write_line(block, &line, indent);
        }
        self.advance(block.region, BLOCK_GAP);
    }

    fn wrap(&self, block: &LayoutBlock, indent: f32) -> Vec<String> {
        let frame = self.layout.geometry.column(block.region);
        let metrics = get_metrics(self.layout.family, block.emphasis.weight());
        wrap_lines(&block.text, metrics, block.size.points(), frame.width - indent)
    }
}

/// Paginates a whole layout.
pub fn paginate(layout: &DocumentLayout) -> Vec<Page> {
    PageWriter::new(layout).write_all().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::PageGeometry;
    use crate::layout::strategy_for;
    use crate::models::resume::{ExperienceEntry, ResumeStructure, Skills};
    use crate::models::template::{ColorPreset, Template, TemplateConfig};

    fn long_resume() -> ResumeStructure {
        ResumeStructure {
            name: "Jane Doe".to_string(),
            summary: "Backend engineer with a long record of shipping payment systems.".to_string(),
            experience: (0..12)
                .map(|i| ExperienceEntry {
                    title: format!("Engineer {i}"),
                    company: "Acme".to_string(),
                    period: "2019 - 2021".to_string(),
                    achievements: (0..5)
                        .map(|j| format!("Delivered milestone {j} for project {i}, cutting costs across several teams and regions"))
                        .collect(),
                    ..Default::default()
                })
                .collect(),
            skills: Skills {
                technical: vec!["Python".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn layout(template: Template, resume: &ResumeStructure) -> DocumentLayout {
        let config = TemplateConfig::new(template, ColorPreset::Blue);
        strategy_for(template).layout(resume, &config, &PageGeometry::default())
    }

    fn sidebar_tint_count(page: &Page, tint: Rgb) -> usize {
        page.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { x, y, color, .. } if *x == 0.0 && *y == 0.0 && *color == tint))
            .count()
    }

    #[test]
    fn test_long_resume_paginates() {
        let doc = layout(Template::Traditional, &long_resume());
        let pages = paginate(&doc);
        assert!(pages.len() >= 2, "12 jobs must overflow one page, got {}", pages.len());
        let bottom = doc.geometry.bottom_limit();
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { baseline, .. } = op {
                    assert!(*baseline <= bottom + 1e-3, "text below bottom margin: {baseline}");
                }
            }
        }
    }

    #[test]
    fn test_sidebar_repainted_on_every_page() {
        let doc = layout(Template::Modern, &long_resume());
        let tint = doc.page_background[0].color;
        let pages = paginate(&doc);
        assert!(pages.len() >= 2);
        for (index, page) in pages.iter().enumerate() {
            assert_eq!(sidebar_tint_count(page, tint), 1, "page {index} sidebar tint");
            assert!(
                matches!(page.ops.first(), Some(DrawOp::Rect { .. })),
                "background must be painted before text on page {index}"
            );
        }
    }

    #[test]
    fn test_accent_bar_only_on_first_page() {
        let doc = layout(Template::Modern, &long_resume());
        let pages = paginate(&doc);
        let has_bar = |page: &Page| {
            page.ops.iter().any(|op| matches!(op, DrawOp::Rect { height, .. } if *height == 10.0))
        };
        assert!(has_bar(&pages[0]));
        assert!(pages[1..].iter().all(|p| !has_bar(p)));
    }

    #[test]
    fn test_block_order_is_preserved() {
        let doc = layout(Template::Ats, &long_resume());
        let texts: Vec<String> = paginate(&doc)
            .iter()
            .flat_map(|p| p.texts().map(str::to_string).collect::<Vec<_>>())
            .filter(|t| t.starts_with("Engineer "))
            .collect();
        let expected: Vec<String> = (0..12).map(|i| format!("Engineer {i}")).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_heading_not_stranded_at_page_bottom() {
        let doc = layout(Template::Traditional, &long_resume());
        for page in paginate(&doc) {
            let last_text = page.texts().last().map(str::to_string);
            assert_ne!(last_text.as_deref(), Some("EXPERIENCE"));
        }
    }

    #[test]
    fn test_new_page_if_needed_at_top_does_not_break() {
        let doc = layout(Template::Ats, &long_resume());
        let mut writer = PageWriter::new(&doc);
        assert!(!writer.new_page_if_needed(Region::Full, 10_000.0));
        assert_eq!(writer.page_count(), 1);
    }
}

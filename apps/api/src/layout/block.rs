//! The layout contract shared by both renderers.
//!
//! A template strategy turns a resume into an ordered list of [`LayoutBlock`]s
//! plus page decorations. Renderers never look at the resume again: anything
//! that affects appearance (color, size, emphasis, alignment, region) is
//! resolved here, so PDF and DOCX output stay in step.

use serde::Serialize;

use crate::layout::geometry::PageGeometry;
use crate::layout::metrics::{FontFamily, FontWeight};
use crate::models::template::{Rgb, Template, BODY_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Body,
    Bullet,
    /// A thin horizontal line under the preceding heading.
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Sidebar,
    Main,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Bold,
    Normal,
}

impl Emphasis {
    pub fn weight(self) -> FontWeight {
        match self {
            Emphasis::Bold => FontWeight::Bold,
            Emphasis::Normal => FontWeight::Regular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Name,
    Heading,
    Subheading,
    Body,
    Small,
}

impl SizeClass {
    pub fn points(self) -> f32 {
        match self {
            SizeClass::Name => 24.0,
            SizeClass::Heading => 12.0,
            SizeClass::Subheading => 10.5,
            SizeClass::Body => 10.0,
            SizeClass::Small => 9.0,
        }
    }

    /// Baseline-to-baseline distance.
    pub fn line_height(self) -> f32 {
        self.points() * 1.35
    }

    /// DOCX run size in half-points.
    pub fn half_points(self) -> usize {
        (self.points() * 2.0).round() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

/// The logical section a block belongs to. Renderers keep blocks of one
/// section together and in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Letter,
}

impl SectionKind {
    /// Heading text printed above the section.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Header => "",
            SectionKind::Contact => "CONTACT",
            SectionKind::Summary => "PROFESSIONAL SUMMARY",
            SectionKind::Experience => "EXPERIENCE",
            SectionKind::Education => "EDUCATION",
            SectionKind::Skills => "SKILLS",
            SectionKind::Languages => "LANGUAGES",
            SectionKind::Certifications => "CERTIFICATIONS",
            SectionKind::Letter => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBlock {
    pub kind: BlockKind,
    pub text: String,
    pub region: Region,
    pub emphasis: Emphasis,
    pub size: SizeClass,
    pub color: Rgb,
    pub align: Align,
    pub section: SectionKind,
}

impl LayoutBlock {
    fn new(kind: BlockKind, text: impl Into<String>, region: Region, section: SectionKind) -> Self {
        Self {
            kind,
            text: text.into(),
            region,
            emphasis: Emphasis::Normal,
            size: SizeClass::Body,
            color: BODY_COLOR,
            align: Align::Left,
            section,
        }
    }

    /// A bold section heading in `color`.
    pub fn heading(text: impl Into<String>, region: Region, section: SectionKind, color: Rgb) -> Self {
        Self::new(BlockKind::Heading, text, region, section)
            .bold()
            .size(SizeClass::Heading)
            .color(color)
    }

    pub fn body(text: impl Into<String>, region: Region, section: SectionKind) -> Self {
        Self::new(BlockKind::Body, text, region, section)
    }

    /// Bullet text without its glyph; the renderer adds [`DocumentLayout::bullet_glyph`].
    pub fn bullet(text: impl Into<String>, region: Region, section: SectionKind) -> Self {
        Self::new(BlockKind::Bullet, text, region, section)
    }

    pub fn rule(region: Region, section: SectionKind, color: Rgb) -> Self {
        Self::new(BlockKind::Rule, "", region, section).color(color)
    }

    pub fn bold(mut self) -> Self {
        self.emphasis = Emphasis::Bold;
        self
    }

    pub fn size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// Full-width colored band across the top of the first page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccentBar {
    pub color: Rgb,
    pub height: f32,
}

/// A region tinted on every page, e.g. the Modern sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageBackground {
    pub region: Region,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub template: Template,
    pub family: FontFamily,
    pub bullet_glyph: char,
    pub geometry: PageGeometry,
    pub accent: Rgb,
    pub accent_bar: Option<AccentBar>,
    pub page_background: Vec<PageBackground>,
    pub blocks: Vec<LayoutBlock>,
}

impl DocumentLayout {
    /// True when any block sits in the sidebar or main column.
    pub fn is_two_column(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b.region, Region::Sidebar | Region::Main))
    }

    pub fn blocks_in(&self, region: Region) -> impl Iterator<Item = &LayoutBlock> {
        self.blocks.iter().filter(move |b| b.region == region)
    }

    /// Sections in the order their first block appears.
    pub fn section_order(&self) -> Vec<SectionKind> {
        let mut order = Vec::new();
        for block in &self.blocks {
            if !order.contains(&block.section) {
                order.push(block.section);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_defaults() {
        let block = LayoutBlock::heading("SKILLS", Region::Full, SectionKind::Skills, BODY_COLOR);
        assert_eq!(block.kind, BlockKind::Heading);
        assert_eq!(block.emphasis, Emphasis::Bold);
        assert_eq!(block.size, SizeClass::Heading);
        assert_eq!(block.align, Align::Left);
    }

    #[test]
    fn test_size_classes_are_ordered() {
        let sizes = [
            SizeClass::Name,
            SizeClass::Heading,
            SizeClass::Subheading,
            SizeClass::Body,
            SizeClass::Small,
        ];
        for pair in sizes.windows(2) {
            assert!(pair[0].points() > pair[1].points(), "{:?} should be larger than {:?}", pair[0], pair[1]);
        }
        assert_eq!(SizeClass::Body.half_points(), 20);
    }
}

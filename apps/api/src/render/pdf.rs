//! PDF output via `lopdf`.
//!
//! Pages come from [`paginate`]; this module only maps draw ops onto PDF
//! operators. The page writer works top-down, so every y is flipped here.
//! Text uses the standard Type1 faces with WinAnsiEncoding, which keeps the
//! file small and the content streams readable.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::errors::SynthesisError;
use crate::layout::block::DocumentLayout;
use crate::layout::metrics::{pdf_base_font, FontWeight};
use crate::models::template::{OutputFormat, Rgb};
use crate::render::page_writer::{paginate, DrawOp, Page};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

pub fn render_pdf(layout: &DocumentLayout) -> Result<RenderedPdf, SynthesisError> {
    let pages = paginate(layout);
    let page_count = pages.len();
    let bytes = write_document(layout, &pages)
        .map_err(|e| SynthesisError::render(OutputFormat::Pdf, e))?;
    Ok(RenderedPdf {
        bytes,
        pages: page_count,
    })
}

fn write_document(layout: &DocumentLayout, pages: &[Page]) -> Result<Vec<u8>, lopdf::Error> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let mut fonts = Dictionary::new();
    for (key, weight) in [(REGULAR_FONT, FontWeight::Regular), (BOLD_FONT, FontWeight::Bold)] {
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set(
            "BaseFont",
            Object::Name(pdf_base_font(layout.family, weight).as_bytes().to_vec()),
        );
        font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let font_id = document.add_object(Object::Dictionary(font));
        fonts.set(key, Object::Reference(font_id));
    }
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    let resources_id = document.add_object(Object::Dictionary(resources));

    let geometry = &layout.geometry;
    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, geometry.height),
        };
        let content_id = document.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set("Resources", Object::Reference(resources_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(geometry.width),
                Object::Real(geometry.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        let page_id: ObjectId = document.add_object(Object::Dictionary(page_dict));
        kids.push(Object::Reference(page_id));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(kids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    document
        .objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = document.add_object(Object::Dictionary(catalog));

    let mut info = Dictionary::new();
    info.set("Producer", Object::string_literal("resume-api"));
    info.set(
        "Title",
        Object::String(encode_win_ansi(&document_title(layout)), StringFormat::Literal),
    );
    let info_id = document.add_object(Object::Dictionary(info));

    document.trailer.set("Root", Object::Reference(catalog_id));
    document.trailer.set("Info", Object::Reference(info_id));

    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;
    Ok(bytes)
}

fn document_title(layout: &DocumentLayout) -> String {
    layout
        .blocks
        .first()
        .map(|b| b.text.clone())
        .unwrap_or_default()
}

fn page_operations(page: &Page, page_height: f32) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![
                        Object::Real(*x),
                        Object::Real(page_height - y - height),
                        Object::Real(*width),
                        Object::Real(*height),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let (r, g, b) = color.unit();
                let flipped = page_height - y;
                ops.push(Operation::new(
                    "RG",
                    vec![Object::Real(r), Object::Real(g), Object::Real(b)],
                ));
                ops.push(Operation::new("w", vec![Object::Real(*thickness)]));
                ops.push(Operation::new("m", vec![Object::Real(*x1), Object::Real(flipped)]));
                ops.push(Operation::new("l", vec![Object::Real(*x2), Object::Real(flipped)]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text {
                x,
                baseline,
                text,
                weight,
                size,
                color,
            } => {
                let font = match weight {
                    FontWeight::Regular => REGULAR_FONT,
                    FontWeight::Bold => BOLD_FONT,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.as_bytes().to_vec()), Object::Real(*size)],
                ));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "Td",
                    vec![Object::Real(*x), Object::Real(page_height - baseline)],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

fn fill_color(color: Rgb) -> Operation {
    let (r, g, b) = color.unit();
    Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)])
}

/// Maps text onto the WinAnsi code page used by the standard fonts.
/// Characters outside it become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '…' => 0x85,
            '€' => 0x80,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::PageGeometry;
    use crate::layout::strategy_for;
    use crate::models::resume::{Contact, ExperienceEntry, ResumeStructure, Skills};
    use crate::models::template::{ColorPreset, Template, TemplateConfig};

    fn jane_doe() -> ResumeStructure {
        ResumeStructure {
            name: "Jane Doe".to_string(),
            contact: Contact {
                email: "jane@x.com".to_string(),
                ..Default::default()
            },
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                period: "June 2020 - Present".to_string(),
                achievements: vec![
                    "Led the migration of a legacy billing system to a new platform".to_string(),
                ],
                ..Default::default()
            }],
            skills: Skills {
                technical: vec!["Python".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn render(template: Template, color: ColorPreset) -> RenderedPdf {
        let config = TemplateConfig::new(template, color);
        let layout = strategy_for(template).layout(&jane_doe(), &config, &PageGeometry::default());
        render_pdf(&layout).expect("render should succeed")
    }

    fn real(object: &Object) -> f32 {
        match object {
            Object::Real(v) => *v as f32,
            Object::Integer(v) => *v as f32,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    fn first_page_operations(bytes: &[u8]) -> Vec<Operation> {
        let document = Document::load_mem(bytes).expect("PDF should parse");
        let pages = document.get_pages();
        let first = *pages.values().next().expect("at least one page");
        let data = document.get_page_content(first).expect("page content");
        Content::decode(&data).expect("content decodes").operations
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_scenario_contains_content() {
        let pdf = render(Template::Modern, ColorPreset::Blue);
        assert!(pdf.bytes.starts_with(b"%PDF-1.5"));
        for needle in ["Jane Doe", "Acme", "Python"] {
            assert!(contains(&pdf.bytes, needle), "PDF should contain {needle}");
        }
        for forbidden in ["undefined", "NaN"] {
            assert!(!contains(&pdf.bytes, forbidden), "PDF must not contain {forbidden}");
        }
        assert_eq!(pdf.pages, 1);
    }

    #[test]
    fn test_name_drawn_in_accent_color() {
        let pdf = render(Template::Modern, ColorPreset::Blue);
        let ops = first_page_operations(&pdf.bytes);
        let name_index = ops
            .iter()
            .position(|op| {
                op.operator == "Tj"
                    && matches!(op.operands.first(), Some(Object::String(s, _)) if s.as_slice() == b"Jane Doe")
            })
            .expect("name is drawn");
        let color = ops[..name_index]
            .iter()
            .rev()
            .find(|op| op.operator == "rg")
            .expect("fill color set before the name");
        let (r, g, b) = ColorPreset::Blue.rgb().unit();
        let actual: Vec<f32> = color.operands.iter().map(real).collect();
        for (got, want) in actual.iter().zip([r, g, b]) {
            assert!((got - want).abs() < 0.01, "accent {actual:?} vs {:?}", (r, g, b));
        }
    }

    #[test]
    fn test_sidebar_tint_painted_before_text() {
        let pdf = render(Template::Modern, ColorPreset::Teal);
        let ops = first_page_operations(&pdf.bytes);
        let first_fill = ops.iter().position(|op| op.operator == "f").expect("background fill");
        let first_text = ops.iter().position(|op| op.operator == "Tj").expect("text");
        assert!(first_fill < first_text);
    }

    #[test]
    fn test_traditional_underlines_headings() {
        let pdf = render(Template::Traditional, ColorPreset::Blue);
        let ops = first_page_operations(&pdf.bytes);
        assert!(ops.iter().any(|op| op.operator == "S"), "rules are stroked");
        let fonts = Document::load_mem(&pdf.bytes).expect("parse");
        let serif = fonts.objects.values().any(|o| {
            matches!(o, Object::Dictionary(d) if matches!(d.get(b"BaseFont"), Ok(Object::Name(n)) if n.as_slice() == b"Times-Roman"))
        });
        assert!(serif, "traditional uses the serif face");
    }

    #[test]
    fn test_structured_garbage_bullets_not_printed() {
        let mut resume = jane_doe();
        resume.experience[0].achievements = vec![
            "March 2021".to_string(),
            "**bold artifact**".to_string(),
            "Shipped feature X to 10,000 users".to_string(),
        ];
        let config = TemplateConfig::new(Template::Modern, ColorPreset::Blue);
        let layout = strategy_for(Template::Modern).layout(&resume, &config, &PageGeometry::default());
        let pdf = render_pdf(&layout).expect("render should succeed");
        assert!(contains(&pdf.bytes, "Shipped feature X"));
        assert!(!contains(&pdf.bytes, "March 2021"), "date fragment must be filtered");
        assert!(!contains(&pdf.bytes, "bold artifact"), "markdown residue must be filtered");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("• café – “x”"), vec![0x95, b' ', b'c', b'a', b'f', 0xE9, b' ', 0x96, b' ', 0x93, b'x', 0x94]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}

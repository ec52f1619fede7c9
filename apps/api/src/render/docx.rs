//! DOCX output via `docx-rs`.
//!
//! Word has no free positioning, so the Modern two-column page becomes a
//! borderless two-cell table: a shaded sidebar cell and a plain main cell.
//! Single-column layouts map straight onto a paragraph sequence. A rule block
//! turns the heading before it into an underlined run; Word draws no lines.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, LineSpacing, PageMargin, Paragraph, Run, RunFonts, Shading, Table,
    TableCell, TableLayoutType, TableRow, VAlignType, WidthType,
};

use crate::errors::SynthesisError;
use crate::layout::block::{Align, BlockKind, DocumentLayout, Emphasis, LayoutBlock, Region};
use crate::layout::geometry::PageGeometry;
use crate::models::template::{OutputFormat, Rgb};

fn twips(points: f32) -> usize {
    (points * 20.0).round() as usize
}

pub fn render_docx(layout: &DocumentLayout) -> Result<Vec<u8>, SynthesisError> {
    let mut buffer = Cursor::new(Vec::new());
    build_docx(layout)
        .build()
        .pack(&mut buffer)
        .map_err(|e| SynthesisError::render(OutputFormat::Docx, e))?;
    Ok(buffer.into_inner())
}

fn build_docx(layout: &DocumentLayout) -> Docx {
    let geometry = &layout.geometry;
    let font = layout.family.docx_name();
    let mut docx = Docx::new()
        .page_size(twips(geometry.width) as u32, twips(geometry.height) as u32)
        .page_margin(
            PageMargin::new()
                .top(twips(geometry.margin_top) as i32)
                .bottom(twips(geometry.margin_bottom) as i32)
                .left(twips(geometry.margin_left) as i32)
                .right(twips(geometry.margin_right) as i32),
        )
        .default_fonts(RunFonts::new().ascii(font).hi_ansi(font).cs(font));

    let content_width = twips(geometry.width - geometry.margin_left - geometry.margin_right);

    if let Some(bar) = layout.accent_bar {
        docx = docx.add_table(shaded_band(bar.color, content_width));
    }

    // Full-width blocks come first; in a two-column layout they sit above the table.
    for paragraph in paragraphs(layout, Region::Full) {
        docx = docx.add_paragraph(paragraph);
    }
    if layout.is_two_column() {
        docx = docx.add_table(two_column_table(layout, geometry, content_width));
    }
    docx
}

fn shaded_band(color: Rgb, width: usize) -> Table {
    let cell = TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().size(8)))
        .width(width, WidthType::Dxa)
        .shading(Shading::new().fill(color.hex()));
    Table::new(vec![TableRow::new(vec![cell])])
        .set_grid(vec![width])
        .layout(TableLayoutType::Fixed)
        .width(width, WidthType::Dxa)
        .clear_all_border()
}

fn two_column_table(layout: &DocumentLayout, geometry: &PageGeometry, width: usize) -> Table {
    let sidebar_width = twips(geometry.sidebar_width() - geometry.margin_left).max(width / 4);
    let main_width = width.saturating_sub(sidebar_width);

    let mut sidebar = TableCell::new()
        .width(sidebar_width, WidthType::Dxa)
        .vertical_align(VAlignType::Top);
    if let Some(tint) = layout
        .page_background
        .iter()
        .find(|bg| bg.region == Region::Sidebar)
    {
        sidebar = sidebar.shading(Shading::new().fill(tint.color.hex()));
    }
    sidebar = fill_cell(sidebar, paragraphs(layout, Region::Sidebar));

    let main = fill_cell(
        TableCell::new()
            .width(main_width, WidthType::Dxa)
            .vertical_align(VAlignType::Top),
        paragraphs(layout, Region::Main),
    );

    Table::new(vec![TableRow::new(vec![sidebar, main])])
        .set_grid(vec![sidebar_width, main_width])
        .layout(TableLayoutType::Fixed)
        .width(width, WidthType::Dxa)
        .clear_all_border()
}

/// Word rejects a cell without a paragraph.
fn fill_cell(mut cell: TableCell, paragraphs: Vec<Paragraph>) -> TableCell {
    if paragraphs.is_empty() {
        return cell.add_paragraph(Paragraph::new());
    }
    for paragraph in paragraphs {
        cell = cell.add_paragraph(paragraph);
    }
    cell
}

/// Paragraphs for one region, in block order.
fn paragraphs(layout: &DocumentLayout, region: Region) -> Vec<Paragraph> {
    let blocks: Vec<&LayoutBlock> = layout.blocks_in(region).collect();
    let mut out = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let underlined = block.kind == BlockKind::Heading
            && blocks
                .get(index + 1)
                .is_some_and(|next| next.kind == BlockKind::Rule);
        if let Some(paragraph) = paragraph(block, layout.bullet_glyph, underlined) {
            out.push(paragraph);
        }
    }
    out
}

fn paragraph(block: &LayoutBlock, glyph: char, underlined: bool) -> Option<Paragraph> {
    let text = match block.kind {
        BlockKind::Rule => return None,
        BlockKind::Bullet => format!("{glyph} {}", block.text),
        BlockKind::Heading | BlockKind::Body => block.text.clone(),
    };

    let mut run = Run::new()
        .add_text(text)
        .size(block.size.half_points())
        .color(block.color.hex());
    if block.emphasis == Emphasis::Bold {
        run = run.bold();
    }
    if underlined {
        run = run.underline("single");
    }

    let spacing = match block.kind {
        BlockKind::Heading => LineSpacing::new().before(200).after(60),
        BlockKind::Bullet => LineSpacing::new().before(0).after(40),
        _ => LineSpacing::new().before(0).after(60),
    };
    let mut paragraph = Paragraph::new().add_run(run).line_spacing(spacing);
    if block.align == Align::Center {
        paragraph = paragraph.align(AlignmentType::Center);
    }
    Some(paragraph)
}

//! # PDF Rendering
//!
//! Lays the report table out on A4 portrait pages.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────── 210mm ────────────────────────────┐
//! │ margin 14mm                                                   │
//! │   Movements Report                      ← title (page 1)      │
//! │   Type: Sales                           ← summary lines       │
//! │   Generated: 15/01/2024 09:05                                 │
//! │  ┌─────┬────┬───────┬──────┬────────┬──────┐                  │
//! │  │Date │Type│Product│Barcod│Details │Employ│ ← header, filled │
//! │  ├─────┼────┼───────┼──────┼────────┼──────┤   on every page  │
//! │  │ ... │ ...│ wrapped cell text, 8pt     │                    │
//! │  └─────┴────┴───────┴──────┴────────┴──────┘                  │
//! │                                            1 / 3  ← footer    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Layout (row heights, page breaks) is computed first as plain data, then
//! drawn. A row too tall for the space left on a page moves to the next
//! page; a row too tall for any page is split between its wrapped lines,
//! and each continuation page starts with the header row again. The built-in Helvetica fonts only cover Latin-1, so text is mapped
//! through [`sanitize`] before drawing.

use std::ops::Range;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use tracing::debug;

use kardex_core::MovementReport;

use crate::error::ExportResult;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.3528;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// Header fill, RGB 66/139/202.
const HEADER_FILL: (f32, f32, f32) = (66.0 / 255.0, 139.0 / 255.0, 202.0 / 255.0);

// =============================================================================
// Layout Settings
// =============================================================================

/// Page geometry and type sizes, in millimetres and points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub title_size_pt: f32,
    pub summary_size_pt: f32,
    pub body_size_pt: f32,
    pub line_height_mm: f32,
    pub cell_padding_mm: f32,
}

impl Default for PdfLayout {
    /// A4 portrait, 14mm margins, 8pt body text.
    fn default() -> Self {
        PdfLayout {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 14.0,
            title_size_pt: 16.0,
            summary_size_pt: 10.0,
            body_size_pt: 8.0,
            line_height_mm: 3.6,
            cell_padding_mm: 1.5,
        }
    }
}

impl PdfLayout {
    /// Characters that fit on one line of a column.
    pub fn chars_per_line(&self, width_mm: f32) -> usize {
        let glyph_mm = self.body_size_pt * PT_TO_MM * AVG_GLYPH_EM;
        let usable = (width_mm - 2.0 * self.cell_padding_mm).max(glyph_mm);
        ((usable / glyph_mm).floor() as usize).max(1)
    }

    fn row_height(&self, lines: usize) -> f32 {
        lines.max(1) as f32 * self.line_height_mm + 2.0 * self.cell_padding_mm
    }

    /// Whole text lines a row slice can hold in `space_mm`.
    fn lines_fitting(&self, space_mm: f32) -> usize {
        let usable = space_mm - 2.0 * self.cell_padding_mm;
        if usable < self.line_height_mm {
            return 0;
        }
        (usable / self.line_height_mm).floor() as usize
    }

    /// Table space between the header row and the footer.
    fn body_mm(&self, header_mm: f32) -> f32 {
        self.page_height_mm - 2.0 * self.margin_mm - self.footer_mm() - header_mm
    }

    fn summary_line_mm(&self) -> f32 {
        self.summary_size_pt * PT_TO_MM * 1.6
    }

    fn title_block_mm(&self, summary_lines: usize) -> f32 {
        self.title_size_pt * PT_TO_MM * 1.8
            + (summary_lines + 1) as f32 * self.summary_line_mm()
            + 3.0
    }

    fn footer_mm(&self) -> f32 {
        self.body_size_pt * PT_TO_MM * 2.0
    }
}

// =============================================================================
// Text Handling
// =============================================================================

/// Maps text into what the built-in fonts can show.
///
/// Arrows, dashes and quotes get ASCII stand-ins, the rest of Latin-1 passes
/// through, and anything else becomes `?`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '→' => out.push_str("->"),
            '←' => out.push_str("<-"),
            '–' | '—' => out.push('-'),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            '…' => out.push_str("..."),
            c if c.is_control() => out.push(' '),
            c if (c as u32) <= 0xFF => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Word-wraps cell text to at most `max_chars` characters per line.
///
/// Words longer than a line are split. Empty text yields one empty line.
pub fn wrap_cell(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };

        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Layout Planning
// =============================================================================

/// A table row with its cells already wrapped.
#[derive(Debug, Clone, PartialEq)]
struct PlannedRow {
    cells: Vec<Vec<String>>,
    /// Line count of the tallest cell.
    lines: usize,
}

fn plan_row(cells: &[String], widths: &[f32], layout: &PdfLayout) -> PlannedRow {
    let cells: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| wrap_cell(&sanitize(text), layout.chars_per_line(*width)))
        .collect();
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);

    PlannedRow { cells, lines }
}

/// The wrapped lines `lines` of row `row`, drawn together on one page.
#[derive(Debug, Clone, PartialEq)]
struct RowSlice {
    row: usize,
    lines: Range<usize>,
}

/// Splits rows into pages. The first page loses `first_page_offset_mm` to
/// the title block; every page repeats the header row.
///
/// Rows are kept whole when a page can hold them. A row taller than a page
/// body fills the rest of the current page and continues on the next ones.
fn paginate(
    line_counts: &[usize],
    header_mm: f32,
    first_page_offset_mm: f32,
    layout: &PdfLayout,
) -> Vec<Vec<RowSlice>> {
    let body = layout.body_mm(header_mm);
    let mut pages = Vec::new();
    let mut page: Vec<RowSlice> = Vec::new();
    let mut free = body - first_page_offset_mm;

    for (row, &count) in line_counts.iter().enumerate() {
        let count = count.max(1);
        let mut start = 0;

        while start < count {
            let remaining = layout.row_height(count - start);
            if remaining <= free {
                page.push(RowSlice {
                    row,
                    lines: start..count,
                });
                free -= remaining;
                break;
            }

            let fitting = layout.lines_fitting(free);
            if !page.is_empty() && (remaining <= body || fitting == 0) {
                pages.push(std::mem::take(&mut page));
                free = body;
                continue;
            }

            // At least one line per page, even on a degenerate layout.
            let take = fitting.clamp(1, count - start);
            page.push(RowSlice {
                row,
                lines: start..start + take,
            });
            start += take;
            pages.push(std::mem::take(&mut page));
            free = body;
        }
    }

    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the report with the default A4 layout.
pub fn render_pdf(report: &MovementReport) -> ExportResult<Vec<u8>> {
    render_pdf_with(report, &PdfLayout::default())
}

/// Renders the report with an explicit layout.
pub fn render_pdf_with(report: &MovementReport, layout: &PdfLayout) -> ExportResult<Vec<u8>> {
    let widths: Vec<f32> = report.columns.iter().map(|c| c.width_mm).collect();
    let headers: Vec<String> = report.columns.iter().map(|c| c.header.clone()).collect();

    let header = plan_row(&headers, &widths, layout);
    let rows: Vec<PlannedRow> = report
        .rows
        .iter()
        .map(|cells| plan_row(cells, &widths, layout))
        .collect();
    let line_counts: Vec<usize> = rows.iter().map(|r| r.lines).collect();
    let header_mm = layout.row_height(header.lines);
    let pages = paginate(
        &line_counts,
        header_mm,
        layout.title_block_mm(report.summary.len()),
        layout,
    );

    debug!(
        rows = rows.len(),
        pages = pages.len(),
        "Rendering movements PDF"
    );

    let page_w = Mm(layout.page_width_mm);
    let page_h = Mm(layout.page_height_mm);
    let (doc, first_page, first_layer) =
        PdfDocument::new(sanitize(&report.title), page_w, page_h, "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let total_pages = pages.len();
    for (page_no, slices) in pages.into_iter().enumerate() {
        let (page, layer) = if page_no == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(page_w, page_h, "Layer 1")
        };
        let canvas = doc.get_page(page).get_layer(layer);
        let mut y = layout.page_height_mm - layout.margin_mm;

        if page_no == 0 {
            y = draw_title_block(&canvas, report, layout, &regular, &bold, y);
        }

        fill_header(&canvas, &widths, layout, y, y - header_mm);
        set_text_color(&canvas, 1.0);
        y = draw_row(&canvas, &header, 0..header.lines, &widths, layout, &bold, y);

        set_text_color(&canvas, 0.0);
        for slice in slices {
            let row = &rows[slice.row];
            y = draw_row(&canvas, row, slice.lines, &widths, layout, &regular, y);
        }

        set_text_color(&canvas, 0.4);
        canvas.use_text(
            format!("{} / {}", page_no + 1, total_pages),
            layout.body_size_pt,
            Mm(layout.page_width_mm - layout.margin_mm - 12.0),
            Mm(layout.margin_mm),
            &regular,
        );
    }

    Ok(doc.save_to_bytes()?)
}

fn draw_title_block(
    canvas: &PdfLayerReference,
    report: &MovementReport,
    layout: &PdfLayout,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    top: f32,
) -> f32 {
    set_text_color(canvas, 0.0);

    let mut y = top - layout.title_size_pt * PT_TO_MM;
    canvas.use_text(
        sanitize(&report.title),
        layout.title_size_pt,
        Mm(layout.margin_mm),
        Mm(y),
        bold,
    );
    y -= layout.title_size_pt * PT_TO_MM * 0.8;

    for line in report.summary.iter().chain(std::iter::once(&report.generated)) {
        y -= layout.summary_line_mm();
        canvas.use_text(
            sanitize(line),
            layout.summary_size_pt,
            Mm(layout.margin_mm),
            Mm(y),
            regular,
        );
    }

    y - 3.0
}

fn fill_header(canvas: &PdfLayerReference, widths: &[f32], layout: &PdfLayout, top: f32, bottom: f32) {
    let table_width: f32 = widths.iter().sum();
    let (r, g, b) = HEADER_FILL;
    canvas.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    canvas.add_rect(
        Rect::new(
            Mm(layout.margin_mm),
            Mm(bottom),
            Mm(layout.margin_mm + table_width),
            Mm(top),
        )
        .with_mode(PaintMode::Fill),
    );
}

/// Draws lines `lines` of a planned row below `top` in the current fill
/// colour; returns the new top.
fn draw_row(
    canvas: &PdfLayerReference,
    row: &PlannedRow,
    lines: Range<usize>,
    widths: &[f32],
    layout: &PdfLayout,
    font: &IndirectFontRef,
    top: f32,
) -> f32 {
    let bottom = top - layout.row_height(lines.len());

    let first_baseline = top - layout.cell_padding_mm - layout.body_size_pt * PT_TO_MM;
    let mut x = layout.margin_mm;
    for (cell, width) in row.cells.iter().zip(widths) {
        let mut y = first_baseline;
        for line in cell.iter().skip(lines.start).take(lines.len()) {
            canvas.use_text(
                line.as_str(),
                layout.body_size_pt,
                Mm(x + layout.cell_padding_mm),
                Mm(y),
                font,
            );
            y -= layout.line_height_mm;
        }
        x += width;
    }

    bottom
}

/// Grey level text colour: 0.0 black, 1.0 white.
fn set_text_color(canvas: &PdfLayerReference, level: f32) {
    canvas.set_fill_color(Color::Rgb(Rgb::new(level, level, level, None)));
}

// =============================================================================
// Unit Tests
// =============================================================================

use std::fs;
use std::path::Path;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 40.0;
const ROW_H: f32 = 18.0;
const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
/// Rough Helvetica advance per character, as a fraction of the font size.
const CHAR_W: f32 = 0.55;

const FONT: Name<'static> = Name(b"F1");

/// Renders a titled table to PDF bytes, repeating the header row on every
/// page. An empty table still produces one page with title and header.
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> Vec<u8> {
    let widths = column_widths(headers, rows);
    let chunks: Vec<&[Vec<String>]> = if rows.is_empty() {
        vec![rows]
    } else {
        rows.chunks(rows_per_page()).collect()
    };

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let font_id = Ref::new(3);
    let mut next_id = 4;

    let mut pdf = Pdf::new();
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

    let mut page_ids = Vec::with_capacity(chunks.len());
    let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    for (index, chunk) in chunks.iter().enumerate() {
        let page_id = Ref::new(next_id);
        let content_id = Ref::new(next_id + 1);
        next_id += 2;
        page_ids.push(page_id);

        let mut page = pdf.page(page_id);
        page.parent(pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        page.resources().fonts().pair(FONT, font_id);
        drop(page);

        let mut content = Content::new();
        text(&mut content, MARGIN, PAGE_H - MARGIN, TITLE_SIZE, title);
        text(
            &mut content,
            PAGE_W - MARGIN - 60.0,
            MARGIN / 2.0,
            BODY_SIZE,
            &format!("Page {} of {}", index + 1, chunks.len()),
        );

        let mut y = PAGE_H - MARGIN - 30.0;
        shade(&mut content, y, &widths, 0.85);
        row(&mut content, y, &widths, &header_row, HEADER_SIZE);

        for (i, cells) in chunk.iter().enumerate() {
            y -= ROW_H;
            if i % 2 == 1 {
                shade(&mut content, y, &widths, 0.95);
            }
            row(&mut content, y, &widths, cells, BODY_SIZE);
        }

        pdf.stream(content_id, &content.finish());
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    pdf.finish()
}

pub fn save_table(path: &Path, title: &str, headers: &[&str], rows: &[Vec<String>]) -> std::io::Result<()> {
    fs::write(path, render_table(title, headers, rows))
}

/// Body rows that fit under the title and header row.
fn rows_per_page() -> usize {
    (((PAGE_H - 2.0 * MARGIN - 30.0) / ROW_H) as usize)
        .saturating_sub(1)
        .max(1)
}

/// Widths proportional to the longest cell per column, scaled down to fit
/// between the margins.
fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
    let mut chars: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in rows {
        for (width, cell) in chars.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut widths: Vec<f32> = chars
        .iter()
        .map(|&n| n as f32 * HEADER_SIZE * CHAR_W + 8.0)
        .collect();

    let total: f32 = widths.iter().sum();
    let available = PAGE_W - 2.0 * MARGIN;
    if total > available {
        let scale = available / total;
        widths.iter_mut().for_each(|w| *w *= scale);
    }

    widths
}

fn text(content: &mut Content, x: f32, y: f32, size: f32, value: &str) {
    // Helvetica via the standard encoding only covers ASCII.
    let ascii: String = value
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect();

    content.begin_text();
    content.set_font(FONT, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(ascii.as_bytes()));
    content.end_text();
}

fn shade(content: &mut Content, y: f32, widths: &[f32], gray: f32) {
    content.save_state();
    content.set_fill_rgb(gray, gray, gray);
    content.rect(MARGIN, y, widths.iter().sum(), ROW_H);
    content.fill_nonzero();
    content.restore_state();
}

fn row(content: &mut Content, y: f32, widths: &[f32], cells: &[String], size: f32) {
    let mut x = MARGIN;

    for (width, cell) in widths.iter().zip(cells) {
        let max_chars = ((width - 6.0) / (size * CHAR_W)).max(1.0) as usize;
        let clipped: String = cell.chars().take(max_chars).collect();
        text(content, x + 3.0, y + 5.0, size, &clipped);

        content.save_state();
        content.set_stroke_rgb(0.6, 0.6, 0.6);
        content.rect(x, y, *width, ROW_H);
        content.stroke();
        content.restore_state();

        x += width;
    }
}

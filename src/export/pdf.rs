//! Paginated PDF rendering of a deck.
//!
//! Every `SLIDE n` heading opens a new page, long lines are word-wrapped, and a section that
//! outgrows one page continues on the next. Pages use the standard Helvetica fonts with WinAnsi
//! encoding, so no font data is embedded.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::Exporter;
use crate::error::ExportError;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 9.0;
const LEADING: f32 = 15.0;
const TITLE_GAP: f32 = 30.0;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");
const WIN_ANSI: Name<'static> = Name(b"WinAnsiEncoding");

/// One rendered page: optional bold heading plus wrapped body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PdfExporter {
    wrap_columns: usize,
    lines_per_page: usize,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self {
            wrap_columns: 88,
            lines_per_page: 44,
        }
    }
}

impl PdfExporter {
    pub fn new(wrap_columns: usize, lines_per_page: usize) -> Self {
        Self {
            wrap_columns: wrap_columns.max(8),
            lines_per_page: lines_per_page.max(1),
        }
    }

    /// Splits deck text into pages without rendering them.
    pub fn paginate(&self, content: &str) -> Vec<PdfPage> {
        let mut sections: Vec<PdfPage> = Vec::new();
        let mut current = PdfPage {
            title: None,
            lines: Vec::new(),
        };

        for raw in content.lines() {
            let line = strip_markup(raw);
            if is_slide_heading(&line) {
                sections.push(std::mem::replace(
                    &mut current,
                    PdfPage {
                        title: Some(line.trim().to_string()),
                        lines: Vec::new(),
                    },
                ));
            } else {
                current.lines.extend(wrap(&line, self.wrap_columns));
            }
        }
        sections.push(current);

        sections
            .into_iter()
            .filter_map(trim_blank_edges)
            .flat_map(|section| self.split_section(section))
            .collect()
    }

    fn split_section(&self, section: PdfPage) -> Vec<PdfPage> {
        if section.lines.len() <= self.lines_per_page {
            return vec![section];
        }

        section
            .lines
            .chunks(self.lines_per_page)
            .enumerate()
            .map(|(i, chunk)| PdfPage {
                title: match (&section.title, i) {
                    (Some(title), 0) => Some(title.clone()),
                    (Some(title), _) => Some(format!("{title} (cont.)")),
                    (None, _) => None,
                },
                lines: chunk.to_vec(),
            })
            .collect()
    }
}

impl Exporter for PdfExporter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn export(&self, content: &str) -> Result<Vec<u8>, ExportError> {
        if content.trim().is_empty() {
            return Err(ExportError::EmptyContent);
        }
        Ok(render(&self.paginate(content)))
    }
}

fn strip_markup(line: &str) -> String {
    line.replace("**", "").trim_end().to_string()
}

fn is_slide_heading(line: &str) -> bool {
    let head = line.trim_start_matches(|c: char| !c.is_alphanumeric());
    let Some(prefix) = head.get(..5) else {
        return false;
    };
    prefix.eq_ignore_ascii_case("slide")
        && head[5..]
            .trim_start()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
}

fn trim_blank_edges(mut page: PdfPage) -> Option<PdfPage> {
    while page.lines.last().is_some_and(|l| l.trim().is_empty()) {
        page.lines.pop();
    }
    let leading = page
        .lines
        .iter()
        .take_while(|l| l.trim().is_empty())
        .count();
    page.lines.drain(..leading);

    (page.title.is_some() || !page.lines.is_empty()).then_some(page)
}

/// Greedy word wrap; words longer than `width` are hard-split. Blank input stays one blank line.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let indent: String = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .take(4)
        .collect();
    let mut out = Vec::new();
    let mut current = indent.clone();

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.trim().is_empty() {
                out.push(std::mem::replace(&mut current, indent.clone()));
            }
            out.push(word.drain(..width).collect());
        }

        let word: String = word.into_iter().collect();
        let used = current.chars().count();
        let needs_space = !current.trim().is_empty();
        if needs_space && used + 1 + word.chars().count() > width {
            out.push(std::mem::replace(&mut current, indent.clone()));
        }
        if !current.trim().is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.trim().is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

fn render(pages: &[PdfPage]) -> Vec<u8> {
    let mut next_id = Ref::new(1);
    let catalog_id = next_id.bump();
    let tree_id = next_id.bump();
    let regular_id = next_id.bump();
    let bold_id = next_id.bump();
    let ids: Vec<(Ref, Ref)> = pages
        .iter()
        .map(|_| (next_id.bump(), next_id.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(ids.iter().map(|&(page_id, _)| page_id))
        .count(i32::try_from(pages.len()).unwrap_or(i32::MAX));
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(WIN_ANSI);
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(WIN_ANSI);

    let media_box = Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
    for (i, (page, &(page_id, content_id))) in pages.iter().zip(&ids).enumerate() {
        {
            let mut writer = pdf.page(page_id);
            writer
                .media_box(media_box)
                .parent(tree_id)
                .contents(content_id);
            writer
                .resources()
                .fonts()
                .pair(REGULAR, regular_id)
                .pair(BOLD, bold_id);
        }

        pdf.stream(content_id, &page_content(page, i + 1, pages.len()));
    }

    pdf.finish()
}

fn page_content(page: &PdfPage, number: usize, total: usize) -> Vec<u8> {
    let mut content = Content::new();
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE / 3.0;

    if let Some(title) = &page.title {
        show_line(&mut content, BOLD, TITLE_SIZE, (MARGIN, y), title);
        y -= TITLE_GAP;
    }

    if !page.lines.is_empty() {
        content
            .begin_text()
            .set_font(REGULAR, BODY_SIZE)
            .set_leading(LEADING)
            .next_line(MARGIN, y);
        for (i, line) in page.lines.iter().enumerate() {
            if i > 0 {
                content.next_line_using_leading();
            }
            content.show(Str(&encode_text(line)));
        }
        content.end_text();
    }

    let footer = format!("{number} / {total}");
    let footer_at = (PAGE_WIDTH / 2.0 - 10.0, MARGIN / 2.0);
    show_line(&mut content, REGULAR, FOOTER_SIZE, footer_at, &footer);
    content.finish().to_vec()
}

fn show_line(content: &mut Content, font: Name<'_>, size: f32, (x, y): (f32, f32), text: &str) {
    content
        .begin_text()
        .set_font(font, size)
        .next_line(x, y)
        .show(Str(&encode_text(text)))
        .end_text();
}

/// Maps text onto WinAnsi bytes. Pictographs are dropped, anything else outside the encoding
/// becomes `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|ch| {
            let byte = match ch {
                '\t' => b' ',
                '€' => 0x80,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '™' => 0x99,
                '\u{200d}' | '\u{fe0f}' => return None,
                '\u{2190}'..='\u{2bff}' | '\u{1f000}'..='\u{10ffff}' => return None,
                _ => match u8::try_from(ch) {
                    Ok(b) if (0x20..0x7f).contains(&b) || b >= 0xa0 => b,
                    _ => b'?',
                },
            };
            Some(byte)
        })
        .collect()
}

//! Minimal flowing layout over `pdf-writer`: centered headings, fixed-width
//! tables with a repeated header row, and automatic page breaks.
//!
//! Only the standard Helvetica faces are used, so no font program is embedded.
//! Text outside printable ASCII is replaced with `?`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 36.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Space kept free above the bottom margin for the page number
const FOOTER_BAND: f32 = 18.0;
const CELL_PADDING: f32 = 4.0;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }
}

pub const WHITE: Color = Color::hex(0xffffff);
pub const WHITESMOKE: Color = Color::hex(0xf5f5f5);
pub const GREY: Color = Color::hex(0x808080);
pub const SLATE: Color = Color::hex(0x2c3e50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn name(self) -> Name<'static> {
        match self {
            Font::Regular => REGULAR,
            Font::Bold => BOLD,
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Replace anything outside printable ASCII with `?`.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { '?' })
        .collect()
}

/// Advance width in points of already-sanitized `text`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let widths = font.widths();
    let units: u32 = text
        .bytes()
        .map(|b| match b {
            32..=126 => u32::from(widths[usize::from(b - 32)]),
            _ => u32::from(widths[usize::from(b'?' - 32)]),
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Shorten `text` until it fits `max_width`, marking the cut with "...".
fn fit(text: String, font: Font, size: f32, max_width: f32) -> String {
    if text_width(&text, font, size) <= max_width {
        return text;
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if text_width(&candidate, font, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}

pub struct Column {
    pub title: &'static str,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub const fn new(title: &'static str, width: f32, align: Align) -> Self {
        Self { title, width, align }
    }
}

/// One table cell; `emphasis` overrides color and face.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub emphasis: Option<Color>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: None,
        }
    }

    pub fn emphasized(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            emphasis: Some(color),
        }
    }
}

pub struct TableStyle {
    pub header_background: Color,
    /// Alternating data row backgrounds
    pub stripes: [Color; 2],
    pub font_size: f32,
    pub header_font_size: f32,
    pub row_height: f32,
    pub header_height: f32,
}

/// Two-row headline table: labels over big bold figures.
pub struct SummaryStyle {
    pub header_background: Color,
    pub body_background: Color,
    pub value_color: Color,
    pub value_size: f32,
    pub column_width: f32,
}

/// Page-by-page content builder.
pub struct Canvas {
    finished: Vec<Content>,
    page: Content,
    y: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            finished: Vec::new(),
            page: Content::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn floor() -> f32 {
        MARGIN + FOOTER_BAND
    }

    pub fn new_page(&mut self) {
        let page = std::mem::replace(&mut self.page, Content::new());
        self.finished.push(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Break the page unless `height` still fits; true when a break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.y - height < Self::floor() {
            self.new_page();
            return true;
        }
        false
    }

    pub fn space(&mut self, height: f32) {
        self.y -= height;
        if self.y < Self::floor() {
            self.new_page();
        }
    }

    fn draw_text(
        &mut self,
        x: f32,
        baseline: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Color,
    ) {
        self.page.set_fill_rgb(color.r, color.g, color.b);
        self.page
            .begin_text()
            .set_font(font.name(), size)
            .next_line(x, baseline)
            .show(Str(text.as_bytes()))
            .end_text();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.page
            .set_fill_rgb(color.r, color.g, color.b)
            .rect(x, y, width, height)
            .fill_nonzero();
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, line: f32) {
        self.page
            .set_stroke_rgb(color.r, color.g, color.b)
            .set_line_width(line)
            .rect(x, y, width, height)
            .stroke();
    }

    /// A line of text centered on the page, advancing the cursor.
    pub fn centered(&mut self, text: &str, font: Font, size: f32, color: Color) {
        let leading = size * 1.3;
        self.ensure_space(leading);
        let text = sanitize(text);
        let x = (PAGE_WIDTH - text_width(&text, font, size)) / 2.0;
        self.y -= leading;
        self.draw_text(x, self.y + size * 0.25, &text, font, size, color);
    }

    /// A left-aligned line of text, advancing the cursor.
    pub fn line(&mut self, text: &str, font: Font, size: f32, color: Color) {
        let leading = size * 1.4;
        self.ensure_space(leading);
        let text = fit(sanitize(text), font, size, CONTENT_WIDTH);
        self.y -= leading;
        self.draw_text(MARGIN, self.y + size * 0.3, &text, font, size, color);
    }

    pub fn summary(&mut self, labels: &[&str], values: &[String], style: &SummaryStyle) {
        let header_height = 28.0;
        let body_height = style.value_size + 20.0;
        self.ensure_space(header_height + body_height);

        let width = style.column_width * labels.len() as f32;
        let left = (PAGE_WIDTH - width) / 2.0;

        let header_bottom = self.y - header_height;
        self.fill_rect(left, header_bottom, width, header_height, style.header_background);
        let body_bottom = header_bottom - body_height;
        self.fill_rect(left, body_bottom, width, body_height, style.body_background);

        for (i, (label, value)) in labels.iter().zip(values).enumerate() {
            let cell_left = left + style.column_width * i as f32;
            let inner = style.column_width - 2.0 * CELL_PADDING;
            let label = fit(sanitize(label), Font::Bold, 11.0, inner);
            let x = cell_left + (style.column_width - text_width(&label, Font::Bold, 11.0)) / 2.0;
            self.draw_text(x, header_bottom + 10.0, &label, Font::Bold, 11.0, WHITESMOKE);

            let value = sanitize(value);
            let value_width = text_width(&value, Font::Bold, style.value_size);
            let x = cell_left + (style.column_width - value_width) / 2.0;
            self.draw_text(
                x,
                body_bottom + 10.0,
                &value,
                Font::Bold,
                style.value_size,
                style.value_color,
            );

            self.stroke_rect(
                cell_left,
                body_bottom,
                style.column_width,
                header_height + body_height,
                style.header_background,
                1.0,
            );
        }

        self.y = body_bottom;
    }

    fn table_header(&mut self, columns: &[Column], style: &TableStyle) {
        let width: f32 = columns.iter().map(|c| c.width).sum();
        let left = (PAGE_WIDTH - width) / 2.0;
        let bottom = self.y - style.header_height;
        self.fill_rect(left, bottom, width, style.header_height, style.header_background);

        let mut x = left;
        for column in columns {
            let size = style.header_font_size;
            let title = fit(
                sanitize(column.title),
                Font::Bold,
                size,
                column.width - 2.0 * CELL_PADDING,
            );
            let offset = (column.width - text_width(&title, Font::Bold, size)) / 2.0;
            let baseline = bottom + (style.header_height - size) / 2.0 + 2.0;
            self.draw_text(x + offset, baseline, &title, Font::Bold, size, WHITESMOKE);
            self.stroke_rect(x, bottom, column.width, style.header_height, GREY, 0.5);
            x += column.width;
        }
        self.y = bottom;
    }

    /// Draw a table; the header row is repeated after every page break.
    pub fn table(&mut self, columns: &[Column], rows: &[Vec<Cell>], style: &TableStyle) {
        self.ensure_space(style.header_height + style.row_height);
        self.table_header(columns, style);

        let width: f32 = columns.iter().map(|c| c.width).sum();
        let left = (PAGE_WIDTH - width) / 2.0;

        for (index, row) in rows.iter().enumerate() {
            if self.ensure_space(style.row_height) {
                self.table_header(columns, style);
            }
            let bottom = self.y - style.row_height;
            self.fill_rect(left, bottom, width, style.row_height, style.stripes[index % 2]);

            let mut x = left;
            for (column, cell) in columns.iter().zip(row) {
                let (font, color) = match cell.emphasis {
                    Some(color) => (Font::Bold, color),
                    None => (Font::Regular, SLATE),
                };
                let inner = column.width - 2.0 * CELL_PADDING;
                let text = fit(sanitize(&cell.text), font, style.font_size, inner);
                let offset = match column.align {
                    Align::Left => CELL_PADDING,
                    Align::Center => {
                        (column.width - text_width(&text, font, style.font_size)) / 2.0
                    }
                };
                let baseline = bottom + (style.row_height - style.font_size) / 2.0 + 2.0;
                self.draw_text(x + offset, baseline, &text, font, style.font_size, color);
                self.stroke_rect(x, bottom, column.width, style.row_height, GREY, 0.5);
                x += column.width;
            }
            self.y = bottom;
        }
    }

    /// Serialize every page, stamping "Page n of m" at the bottom of each.
    pub fn finish(mut self) -> Vec<u8> {
        self.finished.push(self.page);
        let total = self.finished.len();

        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let page_ids: Vec<Ref> = (0..total).map(|i| Ref::new(5 + 2 * i as i32)).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().copied())
            .count(total as i32);
        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        let pages = self.finished.into_iter().zip(&page_ids).enumerate();
        for (number, (mut content, page_id)) in pages {
            let content_id = Ref::new(page_id.get() + 1);

            let label = format!("Page {} of {}", number + 1, total);
            let x = (PAGE_WIDTH - text_width(&label, Font::Regular, 8.0)) / 2.0;
            content.set_fill_rgb(GREY.r, GREY.g, GREY.b);
            content
                .begin_text()
                .set_font(REGULAR, 8.0)
                .next_line(x, MARGIN - 12.0)
                .show(Str(label.as_bytes()))
                .end_text();

            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
            page.parent(tree_id);
            page.contents(content_id);
            page.resources()
                .fonts()
                .pair(REGULAR, regular_id)
                .pair(BOLD, bold_id);
            page.finish();

            pdf.stream(content_id, &content.finish());
        }

        pdf.finish()
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 278, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    278, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

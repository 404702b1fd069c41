//! Paginated PDF renderer.
//!
//! # Responsibility
//! - Flow the celebration header, every non-empty part and the footer into
//!   pages of positioned lines (`layout`).
//! - Serialize the laid-out pages with the standard Type 1 fonts (`render_to`).
//!
//! # Invariants
//! - Layout is pure and deterministic for a given document and style.
//! - Pagination is flow-based only: a line that does not fit starts a page.
//! - A heading is never left alone at the bottom of a page.
//! - The layout always has at least one page.

use crate::mass::document::MassDocument;
use crate::model::celebration::Celebration;
use crate::model::part::Part;
use crate::render::style::RenderStyle;
use crate::render::{split_paragraphs, RenderError, RenderResult, FOOTER_TEXT};
use log::debug;
use std::io::Write;

const POINTS_PER_INCH: f32 = 72.0;
const TITLE_LEADING: f32 = 1.2;
const HEADING_LEADING: f32 = 1.3;
const BODY_LEADING: f32 = 1.4;
const TITLE_SPACE_AFTER: f32 = 20.0;
const HEADER_SPACER: f32 = 0.3 * POINTS_PER_INCH;
const HEADING_SPACE_BEFORE: f32 = 15.0;
const HEADING_SPACE_AFTER: f32 = 10.0;
const PARAGRAPH_SPACE_AFTER: f32 = 6.0;
const PART_SPACER: f32 = 0.15 * POINTS_PER_INCH;
const FOOTER_SPACER: f32 = 0.5 * POINTS_PER_INCH;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const GRAY: (f32, f32, f32) = (0.5, 0.5, 0.5);

/// Horizontal placement of a line inside the text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of text at its final page position (PDF user space).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    /// Baseline, measured from the bottom edge of the page.
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    pub color: (f32, f32, f32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub lines: Vec<PlacedLine>,
}

/// Pages of positioned lines, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub title: String,
    pub pages: Vec<PdfPage>,
}

impl PdfLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every line in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> + '_ {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font_size: f32,
    leading: f32,
    bold: bool,
    color: (f32, f32, f32),
    align: Align,
}

/// Flow cursor over the page column.
struct Flow<'a> {
    style: &'a RenderStyle,
    page_width: f32,
    top: f32,
    bottom: f32,
    cursor: f32,
    pages: Vec<PdfPage>,
}

impl<'a> Flow<'a> {
    fn new(style: &'a RenderStyle) -> RenderResult<Self> {
        let (page_width, page_height) = style.page_size.dimensions();
        let margin = style.margin_points;
        if page_width - 2.0 * margin <= style.base_font_size
            || page_height - 2.0 * margin <= style.title_font_size * TITLE_LEADING
        {
            return Err(RenderError::Pdf(format!(
                "margins of {margin}pt leave no printable area on {}",
                style.page_size.name()
            )));
        }
        Ok(Self {
            style,
            page_width,
            top: page_height - margin,
            bottom: margin,
            cursor: page_height - margin,
            pages: vec![PdfPage::default()],
        })
    }

    fn column_width(&self) -> f32 {
        self.page_width - 2.0 * self.style.margin_points
    }

    fn current_page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |page| page.lines.is_empty())
    }

    fn new_page(&mut self) {
        self.pages.push(PdfPage::default());
        self.cursor = self.top;
    }

    /// Vertical gap; dropped at the top of a page.
    fn space(&mut self, amount: f32) {
        if self.cursor < self.top {
            self.cursor -= amount;
        }
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < self.bottom && !self.current_page_is_empty() {
            self.new_page();
        }
    }

    fn paragraph(&mut self, lines: &[&str], text_style: TextStyle) {
        let advance = self
            .style
            .font_family
            .average_advance(text_style.bold)
            * text_style.font_size;
        let column_width = self.column_width();
        for source_line in lines {
            for visual in wrap_line(source_line, column_width, advance) {
                self.ensure_room(text_style.leading);
                self.cursor -= text_style.leading;
                let text_width = visual.chars().count() as f32 * advance;
                let x = match text_style.align {
                    Align::Left => self.style.margin_points,
                    Align::Center => {
                        self.style.margin_points + ((column_width - text_width) / 2.0).max(0.0)
                    }
                };
                let y = self.cursor + (text_style.leading - text_style.font_size);
                if let Some(page) = self.pages.last_mut() {
                    page.lines.push(PlacedLine {
                        text: visual,
                        x,
                        y,
                        font_size: text_style.font_size,
                        bold: text_style.bold,
                        color: text_style.color,
                    });
                }
            }
        }
    }
}

/// Lays out the document into pages without touching any output.
///
/// # Errors
/// - Returns [`RenderError::Pdf`] when the margins leave no printable area.
pub fn layout(document: &MassDocument, style: &RenderStyle) -> RenderResult<PdfLayout> {
    let mut flow = Flow::new(style)?;

    if style.include_header {
        if let Some(celebration) = document.celebration() {
            push_header(&mut flow, celebration);
        }
    }

    for part in document.ordered_non_empty_parts() {
        push_part(&mut flow, part);
    }

    if style.include_footer {
        flow.space(FOOTER_SPACER);
        let size = style.footer_font_size();
        flow.paragraph(
            &[FOOTER_TEXT],
            TextStyle {
                font_size: size,
                leading: size * BODY_LEADING,
                bold: false,
                color: GRAY,
                align: Align::Center,
            },
        );
    }

    let (page_width, page_height) = style.page_size.dimensions();
    let layout = PdfLayout {
        page_width,
        page_height,
        title: document
            .celebration()
            .map(|celebration| celebration.name.clone())
            .unwrap_or_else(|| "Missa".to_string()),
        pages: flow.pages,
    };
    debug!(
        "event=pdf_layout module=render status=ok pages={} lines={}",
        layout.page_count(),
        layout.lines().count()
    );
    Ok(layout)
}

fn push_header(flow: &mut Flow<'_>, celebration: &Celebration) {
    let style = flow.style;
    let title = celebration.name.to_uppercase();
    flow.paragraph(
        &[title.as_str()],
        TextStyle {
            font_size: style.title_font_size,
            leading: style.title_font_size * TITLE_LEADING,
            bold: true,
            color: BLACK,
            align: Align::Center,
        },
    );
    flow.space(TITLE_SPACE_AFTER);

    let info = format!(
        "Data: {} | Cor Litúrgica: {}",
        celebration.display_date(),
        capitalize(celebration.color.name())
    );
    flow.paragraph(&[info.as_str()], body_style(style));
    flow.space(PARAGRAPH_SPACE_AFTER);
    flow.space(HEADER_SPACER);
}

fn push_part(flow: &mut Flow<'_>, part: &Part) {
    let style = flow.style;
    let heading_size = style.heading_font_size();
    let heading = TextStyle {
        font_size: heading_size,
        leading: heading_size * HEADING_LEADING,
        bold: true,
        color: style.accent_color(),
        align: Align::Left,
    };
    let body = body_style(style);

    flow.space(HEADING_SPACE_BEFORE);
    flow.ensure_room(heading.leading + HEADING_SPACE_AFTER + body.leading);
    flow.paragraph(&[part.title.as_str()], heading);
    flow.space(HEADING_SPACE_AFTER);

    for paragraph in split_paragraphs(&part.content) {
        flow.paragraph(&paragraph, body);
        flow.space(PARAGRAPH_SPACE_AFTER);
    }
    flow.space(PART_SPACER);
}

fn body_style(style: &RenderStyle) -> TextStyle {
    TextStyle {
        font_size: style.base_font_size,
        leading: style.base_font_size * BODY_LEADING,
        bold: false,
        color: BLACK,
        align: Align::Left,
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Greedy word wrap by estimated advance width.
///
/// Words longer than the column are split across lines.
fn wrap_line(line: &str, column_width: f32, advance: f32) -> Vec<String> {
    let max_chars = ((column_width / advance).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut word_chars = word.chars().collect::<Vec<_>>();
        while word_chars.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word_chars.split_off(max_chars);
            lines.push(word_chars.into_iter().collect());
            word_chars = rest;
        }
        let word_len = word_chars.len();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word_chars);
        current_len += word_len;
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Renders the document as PDF bytes.
pub fn render(document: &MassDocument, style: &RenderStyle) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    render_to(document, style, &mut bytes)?;
    Ok(bytes)
}

/// Renders the document as PDF into `writer`.
///
/// # Errors
/// - Returns [`RenderError::RenderingUnavailable`] when built without the
///   `pdf` feature.
/// - Returns [`RenderError::Pdf`] / [`RenderError::Io`] on layout or write
///   failures.
pub fn render_to<W: Write>(
    document: &MassDocument,
    style: &RenderStyle,
    writer: &mut W,
) -> RenderResult<()> {
    let layout = layout(document, style)?;
    write_layout(&layout, style, writer)
}

#[cfg(not(feature = "pdf"))]
fn write_layout<W: Write>(_: &PdfLayout, _: &RenderStyle, _: &mut W) -> RenderResult<()> {
    Err(RenderError::RenderingUnavailable {
        format: "pdf",
        hint: "rebuild liturgia_core with the `pdf` feature to enable PDF export",
    })
}

#[cfg(feature = "pdf")]
fn write_layout<W: Write>(layout: &PdfLayout, style: &RenderStyle, writer: &mut W) -> RenderResult<()> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.font_family.regular_face(),
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.font_family.bold_face(),
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let mut operations = Vec::with_capacity(page.lines.len() * 6);
        for line in &page.lines {
            let (red, green, blue) = line.color;
            let font = if line.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "rg",
                vec![red.into(), green.into(), blue.into()],
            ));
            operations.push(Operation::new("Tf", vec![font.into(), line.font_size.into()]));
            operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&line.text))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations }
            .encode()
            .map_err(|err| RenderError::Pdf(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            layout.page_width.into(),
            layout.page_height.into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&layout.title)),
        "Producer" => Object::string_literal(concat!("liturgia_core ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    doc.save_to(writer)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    Ok(())
}

/// Encodes text for the standard fonts' WinAnsi encoding.
///
/// Latin-1 characters map to themselves; typographic punctuation maps to the
/// Windows-1252 slots; anything else becomes `?`.
#[cfg(feature = "pdf")]
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{layout, wrap_line};
    use crate::mass::document::MassDocument;
    use crate::model::celebration::{CelebrationKind, LiturgicalColor};
    use crate::render::style::{PageSize, RenderStyle};
    use crate::render::FOOTER_TEXT;

    fn epiphany() -> MassDocument {
        let mut mass = MassDocument::new();
        mass.set_celebration(
            "Epifania do Senhor",
            "2026-01-06",
            CelebrationKind::Solemnity,
            LiturgicalColor::White,
            "Tempo do Natal",
        )
        .expect("valid date");
        mass
    }

    #[test]
    fn wrap_line_respects_column_and_splits_long_words() {
        let lines = wrap_line("aa bb cc dd", 50.0, 10.0);
        assert_eq!(lines, ["aa bb", "cc dd"]);

        let long = wrap_line("abcdefghijkl", 50.0, 10.0);
        assert_eq!(long, ["abcde", "fghij", "kl"]);
    }

    #[test]
    fn header_parts_and_footer_appear_in_order() {
        let mut mass = epiphany();
        mass.set_part_content("gospel", "Evangelho: Mt 2,1-12");

        let layout = layout(&mass, &RenderStyle::default()).expect("layout");
        let texts = layout.lines().map(|line| line.text.as_str()).collect::<Vec<_>>();

        assert_eq!(texts.first(), Some(&"EPIFANIA DO SENHOR"));
        assert!(texts.contains(&"Data: 06/01/2026 | Cor Litúrgica: Branco"));
        let gospel = texts.iter().position(|text| *text == "Evangelho").expect("heading");
        assert_eq!(texts[gospel + 1], "Evangelho: Mt 2,1-12");
        assert_eq!(texts.last(), Some(&FOOTER_TEXT));
    }

    #[test]
    fn headings_use_accent_color_and_larger_font() {
        let mut mass = MassDocument::new();
        mass.set_part_content("gloria", "Glória a Deus nas alturas");
        let style = RenderStyle {
            liturgical_color: LiturgicalColor::Red,
            ..RenderStyle::default()
        };

        let layout = layout(&mass, &style).expect("layout");
        let heading = layout
            .lines()
            .find(|line| line.text == "Glória")
            .expect("gloria heading");
        assert!(heading.bold);
        assert_eq!(heading.font_size, 14.0);
        assert_eq!(heading.color, LiturgicalColor::Red.accent_rgb());
    }

    #[test]
    fn header_and_footer_toggles_are_honored() {
        let mass = epiphany();
        let style = RenderStyle {
            include_header: false,
            include_footer: false,
            ..RenderStyle::default()
        };

        let layout = layout(&mass, &style).expect("layout");
        assert!(layout.lines().all(|line| line.text != "EPIFANIA DO SENHOR"));
        assert!(layout.lines().all(|line| line.text != FOOTER_TEXT));
    }

    #[test]
    fn long_content_flows_onto_more_pages_and_stays_inside_margins() {
        let mut mass = MassDocument::new();
        let verse = "Glória a Deus nas alturas, e paz na terra aos homens por ele amados.\n";
        mass.set_part_content("gloria", verse.repeat(200));
        let style = RenderStyle {
            page_size: PageSize::A5,
            margin_points: 36.0,
            ..RenderStyle::default()
        };

        let layout = layout(&mass, &style).expect("layout");
        assert!(layout.page_count() > 3);
        for line in layout.lines() {
            assert!(line.y >= style.margin_points - 0.01, "line below margin: {line:?}");
            assert!(line.y <= layout.page_height - style.margin_points);
            assert!(line.x >= style.margin_points);
        }
    }

    #[test]
    fn footer_is_centered() {
        let layout = layout(&MassDocument::new(), &RenderStyle::default()).expect("layout");
        let footer = layout
            .lines()
            .find(|line| line.text == FOOTER_TEXT)
            .expect("footer line");
        let (page_width, _) = PageSize::A4.dimensions();
        let text_width = FOOTER_TEXT.chars().count() as f32 * 0.47 * 10.0;
        assert!((footer.x - (page_width - text_width) / 2.0).abs() < 0.5);
    }

    #[test]
    fn excessive_margins_are_rejected() {
        let style = RenderStyle {
            page_size: PageSize::A5,
            margin_points: 300.0,
            ..RenderStyle::default()
        };
        assert!(layout(&MassDocument::new(), &style).is_err());
    }
}

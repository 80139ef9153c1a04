//! Paginated PDF reports drawn over a fixed background template.
//!
//! A report is any [`ReportSource`]: it supplies the header values, the rows
//! and how one row is drawn inside its table slot. [`generate_report`] runs the
//! source's export check, splits rows into pages of [`ROWS_PER_PAGE`], draws
//! each page's overlay and merges every overlay over the template page.
//!
//! Coordinates are PDF points on a landscape Letter page, origin bottom-left.

pub mod canvas;
pub mod evaluation_plan;
pub mod learning_plan;
pub mod template;

use crate::text::wrap_text;
use crate::types::Timestamp;
use crate::weights::ExportBlockedError;

use canvas::{Canvas, Font, LINE_LEADING};
pub use template::ReportTemplate;

pub const PAGE_WIDTH: f32 = 792.0;
pub const PAGE_HEIGHT: f32 = 612.0;

/// Table rows per page.
pub const ROWS_PER_PAGE: usize = 6;

const MARGIN: f32 = 30.0;
const TITLE_Y: f32 = 580.0;
const SUBTITLE_Y: f32 = 563.0;
const TABLE_TOP: f32 = 500.0;
const HEADING_HEIGHT: f32 = 20.0;
const ROW_HEIGHT: f32 = 70.0;
const FOOTER_Y: f32 = 35.0;

pub const BODY_FONT_SIZE: f32 = 8.0;
const HEADER_FONT_SIZE: f32 = 9.0;

/// Report generation failures.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Blocked(#[from] ExportBlockedError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Invalid template: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Values printed in the page header, already resolved to display labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub program: String,
    pub campus: String,
    pub shift: String,
    pub course_unit: String,
    pub group_code: String,
    pub teacher: String,
    pub date: String,
}

impl ReportHeader {
    /// Header date: last modification if any, otherwise creation, as `dd/mm/YYYY`.
    pub fn format_date(created_at: Timestamp, modified_at: Option<Timestamp>) -> String {
        modified_at
            .unwrap_or(created_at)
            .format("%d/%m/%Y")
            .to_string()
    }
}

/// Where a header value is printed: label position, value offset and width.
struct HeaderSlot {
    label: &'static str,
    x: f32,
    y: f32,
    value_x: f32,
    max_chars: usize,
}

const HEADER_SLOTS: [HeaderSlot; 7] = [
    HeaderSlot { label: "PNF:", x: 40.0, y: 540.0, value_x: 65.0, max_chars: 44 },
    HeaderSlot { label: "Núcleo:", x: 330.0, y: 540.0, value_x: 368.0, max_chars: 22 },
    HeaderSlot { label: "Turno:", x: 500.0, y: 540.0, value_x: 532.0, max_chars: 18 },
    HeaderSlot { label: "Fecha:", x: 640.0, y: 540.0, value_x: 673.0, max_chars: 12 },
    HeaderSlot { label: "Unidad curricular:", x: 40.0, y: 520.0, value_x: 125.0, max_chars: 36 },
    HeaderSlot { label: "Sección:", x: 330.0, y: 520.0, value_x: 372.0, max_chars: 24 },
    HeaderSlot { label: "Docente:", x: 500.0, y: 520.0, value_x: 543.0, max_chars: 40 },
];

impl ReportHeader {
    fn values(&self) -> [&str; 7] {
        [
            &self.program,
            &self.campus,
            &self.shift,
            &self.date,
            &self.course_unit,
            &self.group_code,
            &self.teacher,
        ]
    }
}

/// One table column: heading text and left edge.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub heading: &'static str,
    pub x: f32,
}

/// Static page layout of one report kind.
#[derive(Debug, Clone, Copy)]
pub struct ReportLayout {
    pub title: &'static str,
    pub columns: &'static [Column],
}

impl ReportLayout {
    /// Draw the fixed parts of the page: title, header labels and table grid.
    pub fn draw_background(&self, canvas: &mut Canvas) {
        canvas.text(Font::Bold, 14.0, 40.0, TITLE_Y, self.title);
        for slot in &HEADER_SLOTS {
            canvas.text(Font::Bold, HEADER_FONT_SIZE, slot.x, slot.y, slot.label);
        }

        let left = MARGIN;
        let right = PAGE_WIDTH - MARGIN;
        let bottom = table_bottom();

        canvas.line_width(0.8);
        canvas.rect(left, bottom, right - left, TABLE_TOP - bottom);
        canvas.line(left, TABLE_TOP - HEADING_HEIGHT, right, TABLE_TOP - HEADING_HEIGHT);

        canvas.line_width(0.3);
        for row in 1..ROWS_PER_PAGE {
            let y = first_row_top() - row as f32 * ROW_HEIGHT;
            canvas.line(left, y, right, y);
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                canvas.line(column.x - 5.0, bottom, column.x - 5.0, TABLE_TOP);
            }
            canvas.text(
                Font::Bold,
                BODY_FONT_SIZE,
                column.x,
                TABLE_TOP - HEADING_HEIGHT + 7.0,
                column.heading,
            );
        }
    }
}

fn first_row_top() -> f32 {
    TABLE_TOP - HEADING_HEIGHT
}

fn table_bottom() -> f32 {
    first_row_top() - ROWS_PER_PAGE as f32 * ROW_HEIGHT
}

/// Slot a row is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPosition {
    /// Index within the page, `0..ROWS_PER_PAGE`.
    pub index: usize,
    /// 1-based position in the whole report.
    pub number: usize,
    /// Y coordinate of the slot's upper edge.
    pub top: f32,
}

impl RowPosition {
    /// Baseline of the first text line in the slot.
    pub fn baseline(&self) -> f32 {
        self.top - 12.0
    }
}

/// An aggregate that can be rendered as a report.
pub trait ReportSource {
    type Row;

    fn header_fields(&self) -> &ReportHeader;

    fn rows(&self) -> &[Self::Row];

    fn draw_row(&self, row: &Self::Row, position: RowPosition, canvas: &mut Canvas);

    /// Optional line printed under the title.
    fn subtitle(&self) -> Option<&str> {
        None
    }

    fn check_exportable(&self) -> Result<(), ExportBlockedError> {
        Ok(())
    }
}

/// Split rows into page groups. No rows still yields one (empty) page.
pub fn paginate<T>(rows: &[T]) -> Vec<&[T]> {
    if rows.is_empty() {
        return vec![rows];
    }
    rows.chunks(ROWS_PER_PAGE).collect()
}

/// Render `source` over `template` into one PDF document.
pub fn generate_report<S: ReportSource>(
    source: &S,
    template: &ReportTemplate,
) -> Result<Vec<u8>, ReportError> {
    source.check_exportable()?;

    let pages = paginate(source.rows());
    let total = pages.len();

    let overlays = pages
        .into_iter()
        .enumerate()
        .map(|(page_index, rows)| {
            let mut canvas = Canvas::new();
            draw_header(&mut canvas, source.header_fields(), source.subtitle());

            for (index, row) in rows.iter().enumerate() {
                let position = RowPosition {
                    index,
                    number: page_index * ROWS_PER_PAGE + index + 1,
                    top: first_row_top() - index as f32 * ROW_HEIGHT,
                };
                source.draw_row(row, position, &mut canvas);
            }

            canvas.text(
                Font::Regular,
                BODY_FONT_SIZE,
                PAGE_WIDTH - MARGIN - 70.0,
                FOOTER_Y,
                &format!("Página {} de {}", page_index + 1, total),
            );
            canvas
        })
        .collect();

    template.render(overlays)
}

fn draw_header(canvas: &mut Canvas, header: &ReportHeader, subtitle: Option<&str>) {
    if let Some(subtitle) = subtitle {
        let line = wrap_text(subtitle, 110, 1, true);
        canvas.lines(Font::Regular, 10.0, 40.0, SUBTITLE_Y, LINE_LEADING, &line);
    }
    for (slot, value) in HEADER_SLOTS.iter().zip(header.values()) {
        let line = wrap_text(value, slot.max_chars, 1, true);
        canvas.lines(Font::Regular, HEADER_FONT_SIZE, slot.value_x, slot.y, LINE_LEADING, &line);
    }
}

/// Draw a wrapped text cell at column `x` in the given row slot.
pub fn draw_cell(
    canvas: &mut Canvas,
    position: RowPosition,
    x: f32,
    text: &str,
    max_chars: usize,
    max_lines: usize,
    ellipsis: bool,
) {
    let lines = wrap_text(text, max_chars, max_lines, ellipsis);
    canvas.lines(
        Font::Regular,
        BODY_FONT_SIZE,
        x,
        position.baseline(),
        LINE_LEADING,
        &lines,
    );
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use lopdf::Document;

    use super::*;

    static TEST_LAYOUT: ReportLayout = ReportLayout {
        title: "Prueba",
        columns: &[Column { heading: "Texto", x: 40.0 }],
    };

    struct Lines {
        header: ReportHeader,
        rows: Vec<String>,
        blocked: bool,
    }

    impl ReportSource for Lines {
        type Row = String;

        fn header_fields(&self) -> &ReportHeader {
            &self.header
        }

        fn rows(&self) -> &[String] {
            &self.rows
        }

        fn draw_row(&self, row: &String, position: RowPosition, canvas: &mut Canvas) {
            draw_cell(canvas, position, 40.0, row, 40, 3, false);
        }

        fn check_exportable(&self) -> Result<(), ExportBlockedError> {
            if self.blocked {
                Err(ExportBlockedError::IncompleteWeight { current_total: 50 })
            } else {
                Ok(())
            }
        }
    }

    fn source(rows: usize) -> Lines {
        Lines {
            header: ReportHeader {
                program: "Informática (PNFi)".into(),
                teacher: "Ricardo Marin".into(),
                ..Default::default()
            },
            rows: (1..=rows).map(|i| format!("fila {i}")).collect(),
            blocked: false,
        }
    }

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn pagination_groups_of_six() {
        let rows: Vec<u32> = (0..13).collect();
        let pages = paginate(&rows);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 6);
        assert_eq!(pages[2], &[12]);

        assert_eq!(paginate(&rows[..6]).len(), 1);
        assert_eq!(paginate(&rows[..7]).len(), 2);
    }

    #[test]
    fn empty_rows_still_yield_one_page() {
        let rows: Vec<u32> = Vec::new();
        let pages = paginate(&rows);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn renders_one_pdf_page_per_group() {
        let template = ReportTemplate::builtin(&TEST_LAYOUT).unwrap();
        assert_eq!(page_count(&generate_report(&source(0), &template).unwrap()), 1);
        assert_eq!(page_count(&generate_report(&source(6), &template).unwrap()), 1);
        assert_eq!(page_count(&generate_report(&source(7), &template).unwrap()), 2);
        assert_eq!(page_count(&generate_report(&source(13), &template).unwrap()), 3);
    }

    #[test]
    fn pages_reference_the_template_form() {
        let template = ReportTemplate::builtin(&TEST_LAYOUT).unwrap();
        let bytes = generate_report(&source(2), &template).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("/Tpl Do"));
        assert!(text.contains("(fila 1)"));
    }

    #[test]
    fn blocked_source_produces_no_bytes() {
        let template = ReportTemplate::builtin(&TEST_LAYOUT).unwrap();
        let mut blocked = source(3);
        blocked.blocked = true;
        assert_matches!(
            generate_report(&blocked, &template),
            Err(ReportError::Blocked(ExportBlockedError::IncompleteWeight { current_total: 50 }))
        );
    }

    #[test]
    fn template_round_trips_through_bytes() {
        let builtin = ReportTemplate::builtin(&TEST_LAYOUT).unwrap();
        let bytes = builtin.render(vec![Canvas::new()]).unwrap();
        let loaded = ReportTemplate::from_bytes(&bytes).unwrap();
        assert_eq!(page_count(&generate_report(&source(8), &loaded).unwrap()), 2);
    }

    #[test]
    fn garbage_is_not_a_template() {
        assert!(ReportTemplate::from_bytes(b"not a pdf").is_err());
    }

    #[test]
    fn header_date_prefers_modification() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2024, 11, 20, 8, 30, 0).unwrap();
        assert_eq!(ReportHeader::format_date(created, None), "05/03/2024");
        assert_eq!(ReportHeader::format_date(created, Some(modified)), "20/11/2024");
    }
}

//! # Quotation Document
//!
//! Lays a [`Quote`] out as pages of draw operations.
//!
//! ## Bands
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [logo]        COMPANY NAME                   │  header band,
//! │               address                        │  repeated on
//! │          Phone: ... | VAT: ...               │  every page
//! │     Quotation No: ... | Date: ...            │
//! ├──────────────────────────────────────────────┤
//! │ CLIENT DETAILS                               │
//! │ Client Name:  ...                            │
//! ├──────┬───────────────┬─────┬───────┬─────────┤
//! │ Room │ Description   │ Qty │ Unit  │ Total   │  column header,
//! ├──────┼───────────────┼─────┼───────┼─────────┤  repeated after
//! │ ...  │ ...           │  1  │   ... │     ... │  a page break
//! ├──────┴───────────────┴─────┼───────┴─────────┤
//! │                  Subtotal: │             ... │
//! │                 VAT (5%):  │             ... │
//! │              GRAND TOTAL:  │             ... │
//! ├────────────────────────────┴─────────────────┤
//! │ TERMS AND CONDITIONS                         │
//! │ 1. ...                                       │
//! │        Thank you for your business!          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Composition is pure: the same quote, profile and logo size always give
//! the same layout.

use drape_core::{CompanyProfile, LineItem, Quote};
use tracing::debug;

use crate::fonts::FontFace;
use crate::layout::{
    clamp_lines, fit, shrink_to_fit, wrap_lines, Align, Canvas, CellStyle, Cursor, DocumentLayout,
    PageGeometry, Placement, Rgb, CELL_PADDING,
};

/// Header text colour.
pub const HEADER_BLUE: Rgb = Rgb(0, 51, 102);

/// Fill behind section titles.
pub const TITLE_GRAY: Rgb = Rgb(200, 200, 200);

const LOGO_X: f32 = 10.0;
const LOGO_Y: f32 = 8.0;
const LOGO_WIDTH: f32 = 33.0;

const TITLE_HEIGHT: f32 = 10.0;
const HEADER_LINE_HEIGHT: f32 = 6.0;
const BAND_GAP: f32 = 10.0;
/// Height of the header band: title, three lines, gap.
const HEADER_BAND_HEIGHT: f32 = TITLE_HEIGHT + 3.0 * HEADER_LINE_HEIGHT + BAND_GAP;

const CLIENT_LABEL_WIDTH: f32 = 40.0;
const CLIENT_ROW_HEIGHT: f32 = 6.0;

/// Item table columns: header label and width in millimetres.
const COLUMNS: [(&str, f32); 5] = [
    ("Room Name", 40.0),
    ("Description", 80.0),
    ("Quantity", 20.0),
    ("Unit Price", 25.0),
    ("Total Price", 25.0),
];
const TABLE_HEADER_HEIGHT: f32 = 10.0;
const ROW_HEIGHT: f32 = 8.0;
const ROW_LINE_HEIGHT: f32 = 5.0;
const ROW_TEXT_SIZE: f32 = 10.0;

const TOTALS_LABEL_WIDTH: f32 = 140.0;
const TOTALS_VALUE_WIDTH: f32 = 50.0;

const TERMS_LINE_HEIGHT: f32 = 5.0;

/// Pixel size of the logo image, used to keep its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl LogoSize {
    /// Printed height for a given printed width.
    fn height_for(self, width: f32) -> f32 {
        if self.width_px == 0 {
            return 0.0;
        }
        width * self.height_px as f32 / self.width_px as f32
    }
}

/// Lays out `quote` for `profile` on A4 pages.
///
/// `logo` is the size of a successfully loaded logo; `None` leaves the
/// header without one.
pub fn compose(quote: &Quote, profile: &CompanyProfile, logo: Option<LogoSize>) -> DocumentLayout {
    let mut composer = Composer {
        canvas: Canvas::new(PageGeometry::A4),
        quote,
        profile,
        logo,
    };

    let cursor = composer.new_page();
    let cursor = composer.client_block(cursor);
    let cursor = composer.item_table(cursor);
    let cursor = composer.totals_block(cursor);
    composer.terms_block(cursor);

    let layout = composer.canvas.finish();
    debug!(
        quote = %quote.number(),
        pages = layout.page_count(),
        "Composed quotation layout"
    );
    layout
}

struct Composer<'a> {
    canvas: Canvas,
    quote: &'a Quote,
    profile: &'a CompanyProfile,
    logo: Option<LogoSize>,
}

impl Composer<'_> {
    fn left(&self) -> f32 {
        self.canvas.geometry().margin_left
    }

    fn full_width(&self) -> f32 {
        self.canvas.geometry().content_width()
    }

    /// Starts a page and draws its header band.
    fn new_page(&mut self) -> Cursor {
        let cursor = self.canvas.start_page();
        self.header_band(cursor)
    }

    /// Moves to a fresh page if `height` does not fit below `cursor`.
    fn reserve(&mut self, cursor: Cursor, height: f32) -> Cursor {
        match fit(cursor, height, self.canvas.geometry()) {
            Placement::Fits => cursor,
            Placement::NeedsBreak => self.break_page(cursor),
        }
    }

    fn break_page(&mut self, cursor: Cursor) -> Cursor {
        debug!(page = cursor.page + 2, "Page break");
        self.new_page()
    }

    /// Most wrapped lines an item row may hold: the row must fit under the
    /// column header of an otherwise empty continuation page.
    fn max_row_lines(&self) -> usize {
        let geometry = self.canvas.geometry();
        let usable = geometry.break_line()
            - geometry.margin_top
            - HEADER_BAND_HEIGHT
            - TABLE_HEADER_HEIGHT;
        let lines = (usable - (ROW_HEIGHT - ROW_LINE_HEIGHT) + 1e-4) / ROW_LINE_HEIGHT;
        (lines.floor() as usize).max(1)
    }

    fn header_band(&mut self, cursor: Cursor) -> Cursor {
        if let Some(size) = self.logo {
            let height = size.height_for(LOGO_WIDTH);
            self.canvas
                .logo(cursor.page, LOGO_X, LOGO_Y, LOGO_WIDTH, height);
        }

        let (x, w) = (self.left(), self.full_width());
        let title = CellStyle::plain(FontFace::Bold, 16.0)
            .color(HEADER_BLUE)
            .align(Align::Center);
        let line = CellStyle::plain(FontFace::Regular, 10.0)
            .color(HEADER_BLUE)
            .align(Align::Center);

        let profile = self.profile;
        self.canvas
            .cell(cursor, x, w, TITLE_HEIGHT, &profile.name, title);
        let cursor = cursor.advance(TITLE_HEIGHT);

        let rows = [
            profile.address.clone(),
            format!("Phone: {} | VAT: {}", profile.phone, profile.tax_id),
            format!(
                "Quotation No: {} | Date: {}",
                self.quote.number(),
                self.quote.issued_on_label()
            ),
        ];
        let mut cursor = cursor;
        for row in &rows {
            self.canvas
                .cell(cursor, x, w, HEADER_LINE_HEIGHT, row, line);
            cursor = cursor.advance(HEADER_LINE_HEIGHT);
        }

        cursor.advance(BAND_GAP)
    }

    fn client_block(&mut self, cursor: Cursor) -> Cursor {
        let (x, w) = (self.left(), self.full_width());
        let mut cursor = self.reserve(cursor, 10.0);
        let title = CellStyle::plain(FontFace::Bold, 12.0).filled(TITLE_GRAY);
        self.canvas.cell(cursor, x, w, 10.0, "CLIENT DETAILS", title);
        cursor = cursor.advance(10.0);

        let quote = self.quote;
        let client = quote.client();
        let value_width = w - CLIENT_LABEL_WIDTH;
        let text = CellStyle::plain(FontFace::Regular, 10.0);
        let fields = [
            ("Client Name:", client.name.as_str()),
            ("Phone Number:", client.phone.as_str()),
            ("Address:", client.address.as_str()),
            ("Project Name:", client.project.as_str()),
        ];

        for (label, value) in fields {
            let lines = wrap_lines(
                value,
                FontFace::Regular,
                10.0,
                value_width - 2.0 * CELL_PADDING,
            );
            for (i, line) in lines.iter().enumerate() {
                let at = self.reserve(cursor, CLIENT_ROW_HEIGHT);
                if i == 0 {
                    self.canvas
                        .cell(at, x, CLIENT_LABEL_WIDTH, CLIENT_ROW_HEIGHT, label, text);
                }
                self.canvas.cell(
                    at,
                    x + CLIENT_LABEL_WIDTH,
                    value_width,
                    CLIENT_ROW_HEIGHT,
                    line,
                    text,
                );
                cursor = at.advance(CLIENT_ROW_HEIGHT);
            }
        }

        cursor.advance(10.0)
    }

    fn table_header(&mut self, cursor: Cursor) -> Cursor {
        let style = CellStyle::plain(FontFace::Bold, 10.0).bordered();
        let mut x = self.left();
        for (label, width) in COLUMNS {
            self.canvas
                .cell(cursor, x, width, TABLE_HEADER_HEIGHT, label, style);
            x += width;
        }
        cursor.advance(TABLE_HEADER_HEIGHT)
    }

    fn item_table(&mut self, cursor: Cursor) -> Cursor {
        let quote = self.quote;
        let max_lines = self.max_row_lines();
        let rows: Vec<ItemRow> = quote
            .items()
            .map(|item| self.item_row(item, max_lines))
            .collect();

        // The column header never ends a page on its own.
        let first = rows.first().map_or(ROW_HEIGHT, |row| row.height);
        let cursor = self.reserve(cursor, TABLE_HEADER_HEIGHT + first);
        let mut cursor = self.table_header(cursor);

        for row in &rows {
            let at = match fit(cursor, row.height, self.canvas.geometry()) {
                Placement::Fits => cursor,
                Placement::NeedsBreak => {
                    let top = self.break_page(cursor);
                    self.table_header(top)
                }
            };

            let line_height = if row.line_count == 1 {
                ROW_HEIGHT
            } else {
                ROW_LINE_HEIGHT
            };
            let mut x = self.left();
            for (cell, (_, width)) in row.cells.iter().zip(COLUMNS) {
                let style = CellStyle::plain(FontFace::Regular, cell.size_pt)
                    .align(cell.align)
                    .bordered();
                self.canvas
                    .text_block(at, x, width, row.height, &cell.lines, line_height, style);
                x += width;
            }
            cursor = at.advance(row.height);
        }

        cursor
    }

    /// Wraps the room and description columns, clamped to `max_lines`, and
    /// shrinks the remaining single-line cells to their column width.
    fn item_row(&self, item: &LineItem, max_lines: usize) -> ItemRow {
        let profile = self.profile;
        let texts = [
            (item.room_name().to_string(), Align::Left),
            (item.description().to_string(), Align::Left),
            (item.quantity().to_string(), Align::Center),
            (profile.format_amount(item.unit_price()), Align::Right),
            (profile.format_amount(item.total_price()), Align::Right),
        ];

        let cells: Vec<RowCell> = texts
            .into_iter()
            .zip(COLUMNS)
            .map(|((text, align), (_, width))| {
                let inner = width - 2.0 * CELL_PADDING;
                let face = FontFace::Regular;
                match align {
                    Align::Left => RowCell {
                        lines: clamp_lines(
                            wrap_lines(&text, face, ROW_TEXT_SIZE, inner),
                            max_lines,
                            face,
                            ROW_TEXT_SIZE,
                            inner,
                        ),
                        align,
                        size_pt: ROW_TEXT_SIZE,
                    },
                    Align::Center | Align::Right => RowCell {
                        size_pt: shrink_to_fit(&text, face, ROW_TEXT_SIZE, inner),
                        lines: vec![text],
                        align,
                    },
                }
            })
            .collect();

        let line_count = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
        ItemRow {
            height: row_height(line_count),
            line_count,
            cells,
        }
    }

    fn totals_block(&mut self, cursor: Cursor) -> Cursor {
        let mut cursor = cursor.advance(8.0);
        let totals = self.quote.totals();
        let rows = [
            ("Subtotal:".to_string(), totals.subtotal, 10.0, 8.0),
            (
                format!("VAT ({}%):", totals.tax_rate.percent_label()),
                totals.tax,
                10.0,
                8.0,
            ),
            ("GRAND TOTAL:".to_string(), totals.grand_total, 12.0, 10.0),
        ];

        let x = self.left();
        for (label, amount, size, height) in rows {
            let at = self.reserve(cursor, height);
            let style = CellStyle::plain(FontFace::Bold, size)
                .align(Align::Right)
                .bordered();
            let value = self.profile.format_amount(amount);
            let value_size = shrink_to_fit(
                &value,
                FontFace::Bold,
                size,
                TOTALS_VALUE_WIDTH - 2.0 * CELL_PADDING,
            );
            self.canvas
                .cell(at, x, TOTALS_LABEL_WIDTH, height, &label, style);
            self.canvas.cell(
                at,
                x + TOTALS_LABEL_WIDTH,
                TOTALS_VALUE_WIDTH,
                height,
                &value,
                CellStyle {
                    size_pt: value_size,
                    ..style
                },
            );
            cursor = at.advance(height);
        }

        cursor
    }

    fn terms_block(&mut self, cursor: Cursor) -> Cursor {
        let (x, w) = (self.left(), self.full_width());
        let at = self.reserve(cursor.advance(10.0), 10.0);
        self.canvas.cell(
            at,
            x,
            w,
            10.0,
            "TERMS AND CONDITIONS",
            CellStyle::plain(FontFace::Bold, 12.0),
        );
        let mut cursor = at.advance(10.0);

        let text = CellStyle::plain(FontFace::Regular, 10.0);
        for clause in self.profile.numbered_clauses() {
            for line in wrap_lines(&clause, FontFace::Regular, 10.0, w - 2.0 * CELL_PADDING) {
                let at = self.reserve(cursor, TERMS_LINE_HEIGHT);
                self.canvas.cell(at, x, w, TERMS_LINE_HEIGHT, &line, text);
                cursor = at.advance(TERMS_LINE_HEIGHT);
            }
        }

        let at = self.reserve(cursor.advance(5.0), 10.0);
        let closing = CellStyle::plain(FontFace::Italic, 10.0).align(Align::Center);
        self.canvas
            .cell(at, x, w, 10.0, "Thank you for your business!", closing);
        at.advance(10.0)
    }
}

/// One laid-out item row, measured before it is placed.
struct ItemRow {
    cells: Vec<RowCell>,
    line_count: usize,
    height: f32,
}

struct RowCell {
    lines: Vec<String>,
    align: Align,
    size_pt: f32,
}

/// Height of an item row holding `lines` lines in its tallest cell.
fn row_height(lines: usize) -> f32 {
    if lines <= 1 {
        ROW_HEIGHT
    } else {
        lines as f32 * ROW_LINE_HEIGHT + (ROW_HEIGHT - ROW_LINE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DrawOp;
    use chrono::NaiveDate;
    use drape_core::{ClientInfo, LineItem, Money, ProductSpec, QuoteNumber, QuoteNumberIssuer};

    fn sample_quote(items: usize) -> Quote {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let number: QuoteNumber = QuoteNumberIssuer::default().issue(now);
        let client = ClientInfo::new("Amal Haddad", "+971 50 123 4567", "Al Khan, Sharjah", "Villa 7");
        let mut quote = Quote::new(number, now.date(), client);
        for i in 0..items {
            let room = format!("Room {}", i + 1);
            quote
                .add_priced(&room, &ProductSpec::blind(2.0, 1.5, Money::from_cents(5_000)))
                .unwrap();
        }
        quote
    }

    fn room_rows(layout: &DocumentLayout, page: usize) -> usize {
        layout.pages[page]
            .texts()
            .filter(|text| text.starts_with("Room ") && *text != "Room Name")
            .count()
    }

    #[test]
    fn test_single_item_fits_one_page() {
        let layout = compose(&sample_quote(1), &CompanyProfile::default(), None);
        assert_eq!(layout.page_count(), 1);

        let page = &layout.pages[0];
        assert!(page.contains_text("DRAPES AND FITOUT FZE"));
        assert!(page.contains_text("Quotation No: QT-20261018-0930 | Date: 18-Oct-2026"));
        assert!(page.contains_text("CLIENT DETAILS"));
        assert!(page.contains_text("Amal Haddad"));
        assert!(page.contains_text("Manual Blind (2.0m × 1.5m)"));
        assert!(page.contains_text("250.00 AED"));
        assert!(page.contains_text("VAT (5%):"));
        assert!(page.contains_text("12.50 AED"));
        assert!(page.contains_text("262.50 AED"));
        assert!(page.contains_text("TERMS AND CONDITIONS"));
        assert!(page.contains_text("Thank you for your business!"));
    }

    #[test]
    fn test_header_is_blue_and_body_black() {
        let layout = compose(&sample_quote(1), &CompanyProfile::default(), None);
        for op in &layout.pages[0].ops {
            if let DrawOp::Text { text, color, .. } = op {
                if text == "DRAPES AND FITOUT FZE" {
                    assert_eq!(*color, HEADER_BLUE);
                }
                if text == "Amal Haddad" || text == "GRAND TOTAL:" {
                    assert_eq!(*color, Rgb::BLACK);
                }
            }
        }
    }

    #[test]
    fn test_pagination_boundary() {
        // Header band ends at 48, client block at 92, column header at 102.
        // Eight-millimetre rows fit while 102 + 8k <= 277, so 21 rows.
        let layout = compose(&sample_quote(21), &CompanyProfile::default(), None);
        assert_eq!(room_rows(&layout, 0), 21);

        let layout = compose(&sample_quote(22), &CompanyProfile::default(), None);
        assert!(layout.page_count() >= 2);
        assert_eq!(room_rows(&layout, 0), 21);
        assert_eq!(room_rows(&layout, 1), 1);
    }

    #[test]
    fn test_every_page_has_header_band() {
        let layout = compose(&sample_quote(60), &CompanyProfile::default(), None);
        assert!(layout.page_count() >= 3);
        for page in &layout.pages {
            assert!(page.contains_text("DRAPES AND FITOUT FZE"));
        }
    }

    #[test]
    fn test_continuation_pages_repeat_column_header() {
        let layout = compose(&sample_quote(60), &CompanyProfile::default(), None);
        let total_rows: usize = (0..layout.page_count()).map(|p| room_rows(&layout, p)).sum();
        assert_eq!(total_rows, 60);
        for (index, page) in layout.pages.iter().enumerate() {
            if room_rows(&layout, index) > 0 {
                assert!(page.contains_text("Room Name"));
            }
        }
    }

    #[test]
    fn test_nothing_crosses_break_line() {
        let layout = compose(&sample_quote(45), &CompanyProfile::default(), None);
        let limit = layout.geometry.break_line() + 1e-3;
        for page in &layout.pages {
            for op in &page.ops {
                if let DrawOp::Rect { y, h, .. } = op {
                    assert!(y + h <= limit, "rect reaches {}", y + h);
                }
            }
        }
    }

    #[test]
    fn test_long_room_name_grows_row() {
        let mut quote = sample_quote(0);
        let item = LineItem::new(
            "Master Bedroom Walk-In Wardrobe And Dressing Area",
            "Manual Blind (1.0m × 1.0m)",
            1,
            Money::from_cents(10_000),
        )
        .unwrap();
        quote.add_item(item);

        let layout = compose(&quote, &CompanyProfile::default(), None);
        let row_rects: Vec<f32> = layout.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { w, h, stroke: true, .. } if *w == 40.0 => Some(*h),
                _ => None,
            })
            .collect();
        // Column header first, then the item row.
        assert_eq!(row_rects[0], TABLE_HEADER_HEIGHT);
        assert!(row_rects[1] > ROW_HEIGHT);
    }

    #[test]
    fn test_logo_keeps_aspect_ratio() {
        let logo = LogoSize {
            width_px: 200,
            height_px: 100,
        };
        let layout = compose(&sample_quote(1), &CompanyProfile::default(), Some(logo));
        let logo_op = layout.pages[0]
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::Logo { .. }));
        assert_eq!(
            logo_op,
            Some(&DrawOp::Logo {
                x: 10.0,
                y: 8.0,
                w: 33.0,
                h: 16.5
            })
        );

        let without = compose(&sample_quote(1), &CompanyProfile::default(), None);
        assert!(!without.pages[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Logo { .. })));
    }

    #[test]
    fn test_terms_are_numbered_with_bank_details_last() {
        let layout = compose(&sample_quote(1), &CompanyProfile::default(), None);
        let texts: Vec<&str> = layout.pages.iter().flat_map(|p| p.texts()).collect();
        assert!(texts.iter().any(|t| t.starts_with("1. This quotation is valid")));
        assert!(texts.contains(&"10. Bank Details:"));
        assert!(texts.contains(&"   - IBAN: AE31 0400 0003 5342 5596 001"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let quote = sample_quote(30);
        let profile = CompanyProfile::default();
        assert_eq!(compose(&quote, &profile, None), compose(&quote, &profile, None));
    }

    /// A room name that wraps to exactly `lines` lines in the room column.
    fn tall_room(lines: usize) -> String {
        vec!["Wardrobewall"; lines].join(" ")
    }

    fn add_room(quote: &mut Quote, room: &str, unit_cents: i64) {
        let unit = Money::from_cents(unit_cents);
        let item = LineItem::new(room, "Manual Blind (1.0m × 1.0m)", 1, unit).unwrap();
        quote.add_item(item);
    }

    fn assert_within_break_line(layout: &DocumentLayout) {
        let limit = layout.geometry.break_line() + 1e-3;
        for (index, page) in layout.pages.iter().enumerate() {
            for op in &page.ops {
                match op {
                    DrawOp::Rect { y, h, .. } => {
                        assert!(y + h <= limit, "page {index}: rect reaches {}", y + h)
                    }
                    DrawOp::Text { baseline, .. } => {
                        assert!(*baseline <= limit, "page {index}: text at {baseline}")
                    }
                    DrawOp::Logo { .. } => {}
                }
            }
        }
    }

    /// Top edges of the bordered 40 mm cells (column header and room column).
    fn room_column_tops(layout: &DocumentLayout, page: usize) -> Vec<(f32, f32)> {
        layout.pages[page]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { w, y, h, stroke: true, .. } if *w == 40.0 => Some((*y, *h)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_tall_row_after_break_clears_column_header() {
        assert_eq!(wrap_lines(&tall_room(43), FontFace::Regular, 10.0, 38.0).len(), 43);

        let mut quote = sample_quote(20);
        add_room(&mut quote, &tall_room(43), 10_000);
        let layout = compose(&quote, &CompanyProfile::default(), None);

        assert_within_break_line(&layout);
        assert_eq!(room_rows(&layout, 0), 20);
        // Column header at 48, the tall row directly under it.
        assert_eq!(
            room_column_tops(&layout, 1)[..2],
            [(48.0, TABLE_HEADER_HEIGHT), (58.0, row_height(43))]
        );
    }

    #[test]
    fn test_row_taller_than_a_page_is_truncated() {
        let mut quote = sample_quote(0);
        add_room(&mut quote, &tall_room(80), 10_000);
        let layout = compose(&quote, &CompanyProfile::default(), None);

        assert_within_break_line(&layout);
        assert!(!layout.pages[0].contains_text("Room Name"));

        let page = &layout.pages[1];
        assert!(page.contains_text("Room Name"));
        let room_lines: Vec<&str> = page
            .texts()
            .filter(|t| t.starts_with("Wardrobewall"))
            .collect();
        assert_eq!(room_lines.len(), 43);
        assert!(room_lines[42].ends_with("..."));
        assert!(page.contains_text("100.00 AED"));
    }

    #[test]
    fn test_wrapped_first_row_keeps_column_header_company() {
        // 102 + 8 fits on page 1 but 102 + row_height(36) does not.
        let mut quote = sample_quote(0);
        add_room(&mut quote, &tall_room(36), 10_000);
        let layout = compose(&quote, &CompanyProfile::default(), None);

        assert!(!layout.pages[0].contains_text("Room Name"));
        assert!(layout.pages[1].contains_text("Room Name"));
        assert_eq!(
            room_column_tops(&layout, 1)[..2],
            [(48.0, TABLE_HEADER_HEIGHT), (58.0, row_height(36))]
        );
        assert_within_break_line(&layout);
    }

    #[test]
    fn test_large_amounts_stay_inside_their_columns() {
        let mut quote = sample_quote(0);
        add_room(&mut quote, "Hall", 123_456_789);
        let layout = compose(&quote, &CompanyProfile::default(), None);

        let amount = "1,234,567.89 AED";
        let mut seen = 0;
        for op in &layout.pages[0].ops {
            if let DrawOp::Text { x, face, size_pt, text, .. } = op {
                if text == amount && *face == FontFace::Regular {
                    // Unit price column starts at 150, total price at 175.
                    let column = if *x < 175.0 { 150.0 } else { 175.0 };
                    let width = face.text_width_mm(text, *size_pt);
                    assert!(*size_pt < 10.0);
                    assert!(*x >= column + CELL_PADDING - 1e-3);
                    assert!(x + width <= column + 25.0 - CELL_PADDING + 1e-3);
                    seen += 1;
                }
            }
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_max_row_lines_fits_continuation_page() {
        let quote = sample_quote(0);
        let profile = CompanyProfile::default();
        let composer = Composer {
            canvas: Canvas::new(PageGeometry::A4),
            quote: &quote,
            profile: &profile,
            logo: None,
        };
        let lines = composer.max_row_lines();
        assert_eq!(lines, 43);
        assert!(48.0 + TABLE_HEADER_HEIGHT + row_height(lines) <= 277.0);
        assert!(48.0 + TABLE_HEADER_HEIGHT + row_height(lines + 1) > 277.0);
    }

    #[test]
    fn test_row_height() {
        assert_eq!(row_height(1), 8.0);
        assert_eq!(row_height(2), 13.0);
        assert_eq!(row_height(3), 18.0);
    }
}

//! # Page Layout Model
//!
//! Everything here works in millimetres with the origin at the top-left
//! corner of the page and `y` growing downwards. The PDF encoder is the only
//! place that converts to points.
//!
//! ## Pagination
//! ```text
//!  y = 0   ┌──────────────────────────────┐
//!          │  margin (10 mm)              │
//!  y = 10  │  ┌────────────────────────┐  │ ◄── Cursor starts here
//!          │  │ header band            │  │
//!          │  │ rows ...               │  │
//!          │  │                        │  │
//!  y = 277 │  └────────────────────────┘  │ ◄── break line
//!          │  bottom margin (20 mm)       │
//!  y = 297 └──────────────────────────────┘
//! ```
//!
//! A row of height `h` at cursor `y` is placed on the current page only if
//! `y + h <= 277`. Otherwise a new page is started and the row goes there.
//! The cursor is an explicit value passed between layout steps.

use crate::fonts::FontFace;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Inner horizontal padding of every cell.
pub const CELL_PADDING: f32 = 1.0;

/// Stroke width of cell borders.
pub const LINE_WIDTH: f32 = 0.2;

/// Slack for accumulated float error when comparing against the break line.
const FIT_EPSILON: f32 = 1e-4;

// =============================================================================
// Geometry
// =============================================================================

/// Page size and margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    /// Distance from the bottom edge at which content stops.
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// Portrait A4 with 10 mm margins and a 20 mm break margin.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin_left: 10.0,
        margin_top: 10.0,
        margin_right: 10.0,
        margin_bottom: 20.0,
    };

    /// Width available between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest `y` a row may reach.
    pub fn break_line(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

/// Current write position: page index and vertical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    /// The cursor moved down by `dy`.
    pub fn advance(self, dy: f32) -> Cursor {
        Cursor {
            page: self.page,
            y: self.y + dy,
        }
    }
}

/// Outcome of asking whether a row fits below the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Fits,
    NeedsBreak,
}

/// Decides whether a row of `height` fits at `cursor` on `geometry`.
///
/// ## Example
/// ```rust
/// use drape_render::layout::{fit, Cursor, PageGeometry, Placement};
///
/// let a4 = PageGeometry::A4;
/// assert_eq!(fit(Cursor { page: 0, y: 269.0 }, 8.0, &a4), Placement::Fits);
/// assert_eq!(fit(Cursor { page: 0, y: 270.0 }, 8.0, &a4), Placement::NeedsBreak);
/// ```
pub fn fit(cursor: Cursor, height: f32, geometry: &PageGeometry) -> Placement {
    if cursor.y + height <= geometry.break_line() + FIT_EPSILON {
        Placement::Fits
    } else {
        Placement::NeedsBreak
    }
}

// =============================================================================
// Draw Operations
// =============================================================================

/// RGB colour with 0-255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Channels scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// How a cell's text and box are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Rgb,
    pub align: Align,
    pub border: bool,
    pub fill: Option<Rgb>,
}

impl CellStyle {
    /// Black, left-aligned, no border or fill.
    pub fn plain(face: FontFace, size_pt: f32) -> Self {
        CellStyle {
            face,
            size_pt,
            color: Rgb::BLACK,
            align: Align::Left,
            border: false,
            fill: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn filled(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// A single positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text starting at `x`, sitting on `baseline`.
    Text {
        x: f32,
        baseline: f32,
        face: FontFace,
        size_pt: f32,
        color: Rgb,
        text: String,
    },
    /// Rectangle with top-left corner at `(x, y)`.
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Rgb>,
        stroke: bool,
    },
    /// The company logo scaled into the given box.
    Logo { x: f32, y: f32, w: f32, h: f32 },
}

/// Draw operations of one page, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Every text run on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }
}

/// A fully laid-out document, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// Accumulates pages of draw operations.
///
/// The canvas knows nothing about page breaks; callers check [`fit`] and
/// call [`Canvas::start_page`] themselves.
#[derive(Debug)]
pub struct Canvas {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl Canvas {
    pub fn new(geometry: PageGeometry) -> Self {
        Canvas {
            geometry,
            pages: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Appends a blank page and returns a cursor at its top margin.
    pub fn start_page(&mut self) -> Cursor {
        self.pages.push(Page::default());
        Cursor {
            page: self.pages.len() - 1,
            y: self.geometry.margin_top,
        }
    }

    fn push(&mut self, page: usize, op: DrawOp) {
        if let Some(page) = self.pages.get_mut(page) {
            page.ops.push(op);
        }
    }

    /// Draws a single-line cell of width `w` and height `h` at `(x, cursor.y)`.
    ///
    /// Text is vertically centred; horizontal placement honours the style's
    /// alignment inside [`CELL_PADDING`].
    pub fn cell(&mut self, cursor: Cursor, x: f32, w: f32, h: f32, text: &str, style: CellStyle) {
        let line = [text.to_string()];
        self.text_block(cursor, x, w, h, &line, h, style);
    }

    /// Draws several lines inside one box.
    ///
    /// The block of `lines.len() * line_height` is centred vertically in `h`.
    /// With one line and `line_height == h` this is exactly [`Canvas::cell`].
    #[allow(clippy::too_many_arguments)]
    pub fn text_block(
        &mut self,
        cursor: Cursor,
        x: f32,
        w: f32,
        h: f32,
        lines: &[String],
        line_height: f32,
        style: CellStyle,
    ) {
        let y = cursor.y;
        if style.fill.is_some() || style.border {
            self.push(
                cursor.page,
                DrawOp::Rect {
                    x,
                    y,
                    w,
                    h,
                    fill: style.fill,
                    stroke: style.border,
                },
            );
        }

        let size_mm = style.size_pt / PT_PER_MM;
        let top = y + (h - lines.len() as f32 * line_height) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let width = style.face.text_width_mm(line, style.size_pt);
            let text_x = match style.align {
                Align::Left => x + CELL_PADDING,
                Align::Center => x + (w - width) / 2.0,
                Align::Right => x + w - CELL_PADDING - width,
            };
            let baseline = top + i as f32 * line_height + line_height / 2.0 + 0.3 * size_mm;
            self.push(
                cursor.page,
                DrawOp::Text {
                    x: text_x,
                    baseline,
                    face: style.face,
                    size_pt: style.size_pt,
                    color: style.color,
                    text: line.clone(),
                },
            );
        }
    }

    pub fn logo(&mut self, page: usize, x: f32, y: f32, w: f32, h: f32) {
        self.push(page, DrawOp::Logo { x, y, w, h });
    }

    pub fn finish(self) -> DocumentLayout {
        DocumentLayout {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

// =============================================================================
// Word Wrapping
// =============================================================================

/// Splits `text` into lines no wider than `max_width` millimetres.
///
/// Explicit newlines always break. Lines break at the last space that keeps
/// them within width; a single word wider than the line is broken between
/// characters. Leading spaces on a line are kept, so indented text stays
/// indented.
///
/// ## Example
/// ```rust
/// use drape_render::fonts::FontFace;
/// use drape_render::layout::wrap_lines;
///
/// let lines = wrap_lines("Bank Details:\n   - Bank: RAK Bank", FontFace::Regular, 10.0, 150.0);
/// assert_eq!(lines, vec!["Bank Details:", "   - Bank: RAK Bank"]);
/// ```
pub fn wrap_lines(text: &str, face: FontFace, size_pt: f32, max_width: f32) -> Vec<String> {
    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph.trim_end_matches('\r'), face, size_pt, max_width))
        .collect()
}

fn wrap_paragraph(paragraph: &str, face: FontFace, size_pt: f32, max_width: f32) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut width = 0.0_f32;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == ' ' {
            last_space = Some(i);
        }
        width += face.text_width_mm(ch.encode_utf8(&mut [0; 4]), size_pt);

        if width > max_width && i > start {
            match last_space {
                Some(space) if space > start => {
                    lines.push(chars[start..space].iter().collect());
                    start = space + 1;
                }
                _ => {
                    lines.push(chars[start..i].iter().collect());
                    start = i;
                }
            }
            last_space = None;
            width = 0.0;
            i = start;
            continue;
        }
        i += 1;
    }

    lines.push(chars[start..].iter().collect());
    lines
}

/// Keeps at most `max_lines` lines, ending the last kept line with `...`
/// trimmed so it still fits in `max_width`.
///
/// ## Example
/// ```rust
/// use drape_render::fonts::FontFace;
/// use drape_render::layout::clamp_lines;
///
/// let lines = vec!["one".to_string(), "two".to_string(), "three".to_string()];
/// assert_eq!(clamp_lines(lines, 2, FontFace::Regular, 10.0, 40.0), vec!["one", "two..."]);
/// ```
pub fn clamp_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    face: FontFace,
    size_pt: f32,
    max_width: f32,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines.max(1));

    if let Some(last) = lines.last_mut() {
        while !last.is_empty()
            && face.text_width_mm(&format!("{last}{ELLIPSIS}"), size_pt) > max_width
        {
            last.pop();
        }
        let kept = last.trim_end().len();
        last.truncate(kept);
        last.push_str(ELLIPSIS);
    }
    lines
}

const ELLIPSIS: &str = "...";

/// Largest font size, at most `size_pt`, at which `text` fits in `max_width`.
pub fn shrink_to_fit(text: &str, face: FontFace, size_pt: f32, max_width: f32) -> f32 {
    let width = face.text_width_mm(text, size_pt);
    if width <= max_width || width <= 0.0 {
        size_pt
    } else {
        size_pt * max_width / width
    }
}

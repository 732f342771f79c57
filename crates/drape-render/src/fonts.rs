//! # Standard Fonts
//!
//! The document uses the three built-in Helvetica faces, so nothing is
//! embedded. Line wrapping and alignment still need real glyph widths; the
//! tables below are the Adobe metrics for printable ASCII, in 1/1000 em.
//!
//! Text is written with `WinAnsiEncoding`. Latin-1 characters map straight
//! through; anything outside the code page is printed as `?`.

use crate::layout::PT_PER_MM;

/// One of the three faces used in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"Helvetica",
            FontFace::Bold => b"Helvetica-Bold",
            FontFace::Italic => b"Helvetica-Oblique",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"F1",
            FontFace::Bold => b"F2",
            FontFace::Italic => b"F3",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            // Oblique shares the upright metrics.
            FontFace::Regular | FontFace::Italic => &HELVETICA,
            FontFace::Bold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of a single character in 1/1000 em.
    pub fn char_width(self, ch: char) -> u16 {
        match ch {
            ' '..='~' => self.widths()[ch as usize - 32],
            '\u{d7}' => 584,
            '\u{2022}' => 350,
            '\u{2013}' => 556,
            '\u{2014}' => 1000,
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of `text` in millimetres at `size_pt`.
    pub fn text_width_mm(self, text: &str, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.char_width(ch))).sum();
        units as f32 * size_pt / 1000.0 / PT_PER_MM
    }
}

const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Encodes text for a `WinAnsiEncoding` font.
///
/// ## Example
/// ```rust
/// use drape_render::fonts::encode_win_ansi;
///
/// assert_eq!(encode_win_ansi("2.0m × 1.5m"), b"2.0m \xd7 1.5m".to_vec());
/// assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
/// ```
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths() {
        assert_eq!(FontFace::Regular.char_width(' '), 278);
        assert_eq!(FontFace::Regular.char_width('A'), 667);
        assert_eq!(FontFace::Regular.char_width('~'), 584);
        assert_eq!(FontFace::Bold.char_width('A'), 722);
        assert_eq!(FontFace::Bold.char_width('i'), 278);
        assert_eq!(FontFace::Italic.char_width('i'), 222);
    }

    #[test]
    fn test_text_width_mm() {
        // Ten digits at 10pt: 5560 units -> 55.6pt
        let width = FontFace::Regular.text_width_mm("0123456789", 10.0);
        assert!((width - 55.6 / PT_PER_MM).abs() < 1e-4);
        assert_eq!(FontFace::Bold.text_width_mm("", 12.0), 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "GRAND TOTAL:";
        assert!(
            FontFace::Bold.text_width_mm(text, 10.0) > FontFace::Regular.text_width_mm(text, 10.0)
        );
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Total"), b"Total".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
        assert_eq!(encode_win_ansi("→"), b"?".to_vec());
    }
}

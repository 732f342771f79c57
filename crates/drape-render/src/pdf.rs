//! # PDF Encoding
//!
//! Serializes a [`DocumentLayout`] with `pdf-writer`.
//!
//! ## Object Layout
//! ```text
//! 1  Catalog
//! 2  Pages ─────────► kids: page objects
//! 3  Info
//! 4  F1 Helvetica          ┐
//! 5  F2 Helvetica-Bold     ├── shared by every page
//! 6  F3 Helvetica-Oblique  ┘
//! 7  Im1 logo (optional)
//! 8… Page, Content, Page, Content, ...
//! ```
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user
//! space is points from the bottom-left, so every `y` is flipped here.

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::{RenderError, RenderResult};
use crate::fonts::{encode_win_ansi, FontFace};
use crate::layout::{DocumentLayout, DrawOp, Page, PageGeometry, LINE_WIDTH, PT_PER_MM};
use crate::logo::Logo;

const LOGO_NAME: &[u8] = b"Im1";

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Encodes `layout` as PDF bytes.
///
/// `logo` must be present whenever the layout contains a logo operation;
/// otherwise the operation is skipped.
pub fn encode(
    layout: &DocumentLayout,
    logo: Option<&Logo>,
    info: &DocumentInfo,
) -> RenderResult<Vec<u8>> {
    if layout.pages.is_empty() {
        return Err(RenderError::Encode("layout has no pages".to_string()));
    }

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let pages_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(FontFace, Ref)> = FontFace::ALL
        .iter()
        .map(|&face| (face, alloc.bump()))
        .collect();
    let logo_id = logo.map(|_| alloc.bump());

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .author(TextStr(&info.author))
        .creator(TextStr("drape-quote"));

    for &(face, id) in &font_ids {
        pdf.type1_font(id)
            .base_font(Name(face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    if let (Some(logo), Some(id)) = (logo, logo_id) {
        let size = logo.size();
        let mut image = pdf.image_xobject(id, logo.compressed_data());
        image.filter(Filter::FlateDecode);
        image.width(size.width_px as i32);
        image.height(size.height_px as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
    }

    let geometry = layout.geometry;
    let mut page_ids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let content = page_content(page, &geometry, logo_id.is_some());
        let compressed = compress_to_vec_zlib(&content, 6);
        pdf.stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        let mut pdf_page = pdf.page(page_id);
        pdf_page.media_box(Rect::new(
            0.0,
            0.0,
            geometry.width * PT_PER_MM,
            geometry.height * PT_PER_MM,
        ));
        pdf_page.parent(pages_id);
        pdf_page.contents(content_id);

        let mut resources = pdf_page.resources();
        {
            let mut fonts = resources.fonts();
            for &(face, id) in &font_ids {
                fonts.pair(Name(face.resource_name()), id);
            }
        }
        if let Some(id) = logo_id {
            resources.x_objects().pair(Name(LOGO_NAME), id);
        }
        resources.finish();
        pdf_page.finish();
    }

    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    Ok(pdf.finish())
}

/// Builds the uncompressed content stream for one page.
fn page_content(page: &Page, geometry: &PageGeometry, has_logo: bool) -> Vec<u8> {
    let flip = |y_mm: f32| (geometry.height - y_mm) * PT_PER_MM;
    let mut content = Content::new();
    content.set_line_width(LINE_WIDTH * PT_PER_MM);
    content.set_stroke_rgb(0.0, 0.0, 0.0);

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                face,
                size_pt,
                color,
                text,
            } => {
                let (r, g, b) = color.unit();
                content.set_fill_rgb(r, g, b);
                let bytes = encode_win_ansi(text);
                content
                    .begin_text()
                    .set_font(Name(face.resource_name()), *size_pt)
                    .next_line(x * PT_PER_MM, flip(*baseline))
                    .show(Str(&bytes))
                    .end_text();
            }
            DrawOp::Rect {
                x,
                y,
                w,
                h,
                fill,
                stroke,
            } => {
                let rect = (x * PT_PER_MM, flip(y + h), w * PT_PER_MM, h * PT_PER_MM);
                if let Some(fill) = fill {
                    let (r, g, b) = fill.unit();
                    content.set_fill_rgb(r, g, b);
                    content.rect(rect.0, rect.1, rect.2, rect.3);
                    content.fill_nonzero();
                }
                if *stroke {
                    content.rect(rect.0, rect.1, rect.2, rect.3);
                    content.stroke();
                }
            }
            DrawOp::Logo { x, y, w, h } => {
                if !has_logo {
                    continue;
                }
                content.save_state();
                content.transform([
                    w * PT_PER_MM,
                    0.0,
                    0.0,
                    h * PT_PER_MM,
                    x * PT_PER_MM,
                    flip(y + h),
                ]);
                content.x_object(Name(LOGO_NAME));
                content.restore_state();
            }
        }
    }

    content.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Canvas, CellStyle};

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn two_page_layout() -> DocumentLayout {
        let mut canvas = Canvas::new(PageGeometry::A4);
        for _ in 0..2 {
            let cursor = canvas.start_page();
            canvas.cell(
                cursor,
                10.0,
                190.0,
                10.0,
                "Hello",
                CellStyle::plain(FontFace::Bold, 12.0).bordered(),
            );
        }
        canvas.finish()
    }

    #[test]
    fn test_encode_produces_pdf() {
        let bytes = encode(&two_page_layout(), None, &DocumentInfo::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b"/Count 2"), 1);
        assert_eq!(count(&bytes, b"/BaseFont /Helvetica-Bold"), 1);
        assert_eq!(count(&bytes, b"/WinAnsiEncoding"), 3);
    }

    #[test]
    fn test_empty_layout_is_rejected() {
        let layout = DocumentLayout {
            geometry: PageGeometry::A4,
            pages: Vec::new(),
        };
        let err = encode(&layout, None, &DocumentInfo::default()).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }

    #[test]
    fn test_content_flips_y_axis() {
        let page = &two_page_layout().pages[0];
        let content = page_content(page, &PageGeometry::A4, false);
        let text = String::from_utf8_lossy(&content);
        // The 10 mm cell at y=10 has its bottom edge 277 mm (785.19 pt) up the page.
        assert!(text.contains(" 785.1"));
        assert!(text.contains(" re"));
        assert!(text.contains("(Hello) Tj"));
    }

    #[test]
    fn test_logo_is_embedded_once() {
        let mut layout = two_page_layout();
        for page in &mut layout.pages {
            page.ops.push(DrawOp::Logo {
                x: 10.0,
                y: 8.0,
                w: 33.0,
                h: 16.5,
            });
        }
        let logo = Logo::from_rgb(2, 1, &[0, 51, 102, 255, 255, 255]);

        let bytes = encode(&layout, Some(&logo), &DocumentInfo::default()).unwrap();
        assert_eq!(count(&bytes, b"/Subtype /Image"), 1);
        assert_eq!(count(&bytes, b"/Im1"), 2);
    }
}

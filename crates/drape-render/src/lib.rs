//! # drape-render: Quotation Documents
//!
//! Renders a [`Quote`] as a paginated A4 PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Quote ──► validate_for_render ──► compose ──► encode ──► bytes         │
//! │                                       ▲                    │            │
//! │   CompanyProfile ──► Logo::load ──────┘                    ▼            │
//! │                     (optional)                   write_atomically       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs before any layout or I/O, so a quote with no items or an
//! incomplete client never produces a file.
//!
//! ## Modules
//!
//! - [`layout`] - Geometry, cursor, draw operations, word wrapping
//! - [`document`] - The quotation's bands laid out on pages
//! - [`fonts`] - Helvetica metrics and text encoding
//! - [`pdf`] - PDF serialization
//! - [`logo`] - Optional logo loading
//! - [`output`] - Atomic file output
//! - [`error`] - Render error types

pub mod document;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod logo;
pub mod output;
pub mod pdf;

use std::path::Path;

use drape_core::{CompanyProfile, Quote};
use tracing::info;

pub use document::compose;
pub use error::{RenderError, RenderResult};
pub use layout::DocumentLayout;

/// Renders `quote` to PDF bytes.
///
/// ## Errors
/// - [`RenderError::Validation`] if the quote has no items or a client field
///   is empty
pub fn render_quote(quote: &Quote, profile: &CompanyProfile) -> RenderResult<Vec<u8>> {
    quote.validate_for_render()?;

    let logo = profile.logo_path.as_deref().and_then(logo::Logo::load);
    let layout = compose(quote, profile, logo.as_ref().map(logo::Logo::size));
    let info = pdf::DocumentInfo {
        title: format!("Quotation {}", quote.number()),
        author: profile.name.clone(),
    };
    let bytes = pdf::encode(&layout, logo.as_ref(), &info)?;

    info!(
        quote = %quote.number(),
        items = quote.len(),
        pages = layout.page_count(),
        bytes = bytes.len(),
        "Rendered quotation"
    );
    Ok(bytes)
}

/// Renders `quote` and writes it to `path`.
///
/// The file appears only once it is complete. On error nothing is left at
/// `path` that was not there before.
pub fn write_quote(quote: &Quote, profile: &CompanyProfile, path: &Path) -> RenderResult<()> {
    let bytes = render_quote(quote, profile)?;
    output::write_atomically(path, &bytes)?;
    info!(quote = %quote.number(), path = %path.display(), "Saved quotation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drape_core::{
        ClientInfo, CurtainSpec, Money, Motorization, ProductSpec, QuoteNumberIssuer,
        ValidationError,
    };

    fn quote_with(client: ClientInfo, items: usize) -> Quote {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        let mut quote = Quote::new(QuoteNumberIssuer::default().issue(now), now.date(), client);
        for i in 0..items {
            let spec = if i % 2 == 0 {
                ProductSpec::blind(2.0, 1.5, Money::from_cents(5_000))
            } else {
                ProductSpec::curtain(3.0, 2.5, CurtainSpec::default())
                    .motorized(Motorization::default())
            };
            quote.add_priced(&format!("Room {}", i + 1), &spec).unwrap();
        }
        quote
    }

    fn client() -> ClientInfo {
        ClientInfo::new("Amal Haddad", "+971 50 123 4567", "Al Khan, Sharjah", "Villa 7")
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_quote(&quote_with(client(), 3), &CompanyProfile::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(8).any(|w| w == b"/Count 1"));
    }

    #[test]
    fn test_render_many_items_spans_pages() {
        let quote = quote_with(client(), 40);
        let layout = compose(&quote, &CompanyProfile::default(), None);
        let bytes = render_quote(&quote, &CompanyProfile::default()).unwrap();

        let expected = format!("/Count {}", layout.page_count());
        assert!(layout.page_count() >= 2);
        assert!(bytes.windows(expected.len()).any(|w| w == expected.as_bytes()));
    }

    #[test]
    fn test_empty_quote_is_rejected() {
        let err = render_quote(&quote_with(client(), 0), &CompanyProfile::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Validation(ValidationError::EmptyQuote)
        ));
    }

    #[test]
    fn test_missing_client_field_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.pdf");
        let mut incomplete = client();
        incomplete.phone = "  ".to_string();

        let err = write_quote(&quote_with(incomplete, 2), &CompanyProfile::default(), &path)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Validation(ValidationError::Required { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_quote_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QT-20261018-1405.pdf");

        write_quote(&quote_with(client(), 2), &CompanyProfile::default(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_missing_logo_still_renders() {
        let profile = CompanyProfile {
            logo_path: Some("/definitely/not/here/logo.png".into()),
            ..CompanyProfile::default()
        };
        let bytes = render_quote(&quote_with(client(), 1), &profile).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(!bytes.windows(15).any(|w| w == b"/Subtype /Image"));
    }

    #[test]
    fn test_logo_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.png");
        image::RgbImage::from_pixel(8, 4, image::Rgb([0, 51, 102]))
            .save(&logo_path)
            .unwrap();
        let profile = CompanyProfile {
            logo_path: Some(logo_path),
            ..CompanyProfile::default()
        };

        let bytes = render_quote(&quote_with(client(), 1), &profile).unwrap();
        assert!(bytes.windows(15).any(|w| w == b"/Subtype /Image"));
    }
}

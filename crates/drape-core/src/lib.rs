//! # drape-core: Pure Business Logic for Drape Quote
//!
//! This crate is the **heart** of Drape Quote. It contains the pricing
//! formulas and quote assembly as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drape Quote Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    drape-cli (request files)                    │   │
//! │  │       price ──► preview table        generate ──► PDF file      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ drape-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   quote   │  │ validation│  │   │
//! │  │   │ProductSpec│  │  Blind    │  │   Quote   │  │   rules   │  │   │
//! │  │   │ LineItem  │  │  Curtain  │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  drape-render (Document Layer)                  │   │
//! │  │              page layout, PDF encoding, file output             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductSpec, LineItem, ClientInfo, CompanyProfile)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Blind and curtain pricing formulas
//! - [`quote`] - Quote assembly, numbering, and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use drape_core::{ClientInfo, Money, ProductSpec, Quote, QuoteNumberIssuer};
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let number = QuoteNumberIssuer::default().issue(now);
//! let client = ClientInfo::new("Amal", "+971 50 000 0000", "Sharjah", "Villa 7");
//!
//! let mut quote = Quote::new(number, now.date(), client);
//! quote.add_priced("Living Room", &ProductSpec::blind(2.0, 1.5, Money::from_cents(5_000))).unwrap();
//!
//! assert_eq!(quote.subtotal(), Money::from_cents(25_000));
//! assert_eq!(quote.grand_total(), Money::from_cents(26_250));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{price, price_line_item, PricedProduct};
pub use quote::{Quote, QuoteEntry, QuoteNumber, QuoteNumberIssuer, QuoteTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// VAT applied to new quotes (5%).
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(500);

/// Prefix of generated quote numbers.
pub const DEFAULT_QUOTE_PREFIX: &str = "QT";

/// Maximum quantity on a single line item.
///
/// Every priced item is quantity 1 today; the cap keeps hand-built
/// line items within a sane range.
pub const MAX_ITEM_QUANTITY: u32 = 999;

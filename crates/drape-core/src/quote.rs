//! # Quote Assembly
//!
//! Accumulates priced line items into a quotation.
//!
//! ## Quote Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Operations                                     │
//! │                                                                         │
//! │  Caller Action            Quote Method            State Change          │
//! │  ─────────────            ────────────            ────────────          │
//! │                                                                         │
//! │  Add priced item ────────► add_item() ──────────► entries.push(item)   │
//! │                                                                         │
//! │  Add from spec ──────────► add_priced() ────────► price, then push     │
//! │                                                                         │
//! │  Delete selected ────────► remove_at() / remove() ► entries.remove(i)  │
//! │                                                                         │
//! │  Clear all ──────────────► clear() ─────────────► entries.clear()      │
//! │                                                                         │
//! │  Read totals ────────────► totals() ────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: Totals are recomputed from the entries on every read, so they   │
//! │        can never drift from the items.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::price_line_item;
use crate::types::{ClientInfo, LineItem, LineItemId, ProductSpec, TaxRate};
use crate::validation::ValidationResult;
use crate::{DEFAULT_QUOTE_PREFIX, DEFAULT_TAX_RATE};

// =============================================================================
// Quote Number
// =============================================================================

/// Human-readable quotation number, e.g. `QT-20261018-0942`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteNumber(String);

impl QuoteNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuoteNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues quote numbers with minute resolution.
///
/// A second number inside the same minute gets a `-02`, `-03`, … suffix, so
/// every number handed out by one issuer is distinct. The clock is passed in;
/// the issuer never reads it.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use drape_core::quote::QuoteNumberIssuer;
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_hms_opt(9, 42, 5).unwrap();
/// let mut issuer = QuoteNumberIssuer::default();
/// assert_eq!(issuer.issue(now).as_str(), "QT-20261018-0942");
/// assert_eq!(issuer.issue(now).as_str(), "QT-20261018-0942-02");
/// ```
#[derive(Debug, Clone)]
pub struct QuoteNumberIssuer {
    prefix: String,
    last_base: Option<String>,
    repeats: u32,
}

impl QuoteNumberIssuer {
    pub fn new(prefix: impl Into<String>) -> Self {
        QuoteNumberIssuer {
            prefix: prefix.into(),
            last_base: None,
            repeats: 0,
        }
    }

    pub fn issue(&mut self, now: NaiveDateTime) -> QuoteNumber {
        let base = format!("{}-{}", self.prefix, now.format("%Y%m%d-%H%M"));

        if self.last_base.as_deref() == Some(base.as_str()) {
            self.repeats += 1;
            return QuoteNumber(format!("{}-{:02}", base, self.repeats + 1));
        }

        self.last_base = Some(base.clone());
        self.repeats = 0;
        QuoteNumber(base)
    }
}

impl Default for QuoteNumberIssuer {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_PREFIX)
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A line item together with its stable handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteEntry {
    pub id: LineItemId,
    pub item: LineItem,
}

/// Derived amounts, computed on demand from the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteTotals {
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub grand_total: Money,
}

/// An in-progress quotation.
///
/// ## Invariants
/// - Entry order is print order; removals never reorder survivors
/// - Failed operations leave the quote exactly as it was
/// - Totals are never stored
#[derive(Debug, Clone)]
pub struct Quote {
    number: QuoteNumber,
    issued_on: NaiveDate,
    client: ClientInfo,
    tax_rate: TaxRate,
    entries: Vec<QuoteEntry>,
}

impl Quote {
    /// Starts an empty quote at the default 5% tax rate.
    pub fn new(number: QuoteNumber, issued_on: NaiveDate, client: ClientInfo) -> Self {
        Quote {
            number,
            issued_on,
            client,
            tax_rate: DEFAULT_TAX_RATE,
            entries: Vec::new(),
        }
    }

    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn number(&self) -> &QuoteNumber {
        &self.number
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    /// Issue date as printed on the document: `18-Oct-2026`.
    pub fn issued_on_label(&self) -> String {
        self.issued_on.format("%d-%b-%Y").to_string()
    }

    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    pub fn set_client(&mut self, client: ClientInfo) {
        self.client = client;
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Appends an already priced item and returns its handle.
    pub fn add_item(&mut self, item: LineItem) -> LineItemId {
        let id = LineItemId::new();
        self.entries.push(QuoteEntry { id, item });
        id
    }

    /// Prices `spec` for `room_name` and appends it.
    ///
    /// Pricing runs before anything is touched; on error the quote is unchanged.
    pub fn add_priced(&mut self, room_name: &str, spec: &ProductSpec) -> CoreResult<LineItemId> {
        let item = price_line_item(room_name, spec)?;
        Ok(self.add_item(item))
    }

    /// Removes the item at `position` (0-based, print order).
    pub fn remove_at(&mut self, position: usize) -> CoreResult<LineItem> {
        if position >= self.entries.len() {
            return Err(CoreError::PositionOutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position).item)
    }

    /// Removes the item with the given handle.
    pub fn remove(&mut self, id: LineItemId) -> CoreResult<LineItem> {
        let position = self
            .position_of(id)
            .ok_or_else(|| CoreError::LineItemNotFound(id.to_string()))?;
        Ok(self.entries.remove(position).item)
    }

    pub fn position_of(&self, id: LineItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.item)
    }

    /// Removes every item. Client, number, and date are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[QuoteEntry] {
        &self.entries
    }

    /// Line items in print order.
    pub fn items(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.entries.iter().map(|e| &e.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Σ line totals. Zero for an empty quote.
    pub fn subtotal(&self) -> Money {
        self.items().map(LineItem::total_price).sum()
    }

    /// Tax on the exact subtotal, rounded once to the cent.
    pub fn tax_amount(&self) -> Money {
        self.subtotal().calculate_tax(self.tax_rate)
    }

    pub fn grand_total(&self) -> Money {
        self.subtotal() + self.tax_amount()
    }

    pub fn totals(&self) -> QuoteTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(self.tax_rate);
        QuoteTotals {
            subtotal,
            tax_rate: self.tax_rate,
            tax,
            grand_total: subtotal + tax,
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Checks everything the renderer requires: at least one item and a
    /// complete client block.
    pub fn validate_for_render(&self) -> ValidationResult<()> {
        if self.entries.is_empty() {
            return Err(ValidationError::EmptyQuote);
        }
        self.client.validate()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

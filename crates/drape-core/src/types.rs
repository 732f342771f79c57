//! # Domain Types
//!
//! Core domain types used throughout Drape Quote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductSpec    │   │    LineItem     │   │ CompanyProfile  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind (tagged)  │──►│  room_name      │   │  name, address  │       │
//! │  │  width_m        │   │  description    │   │  phone, tax id  │       │
//! │  │  height_m       │   │  quantity       │   │  terms, bank    │       │
//! │  │  motorization   │   │  unit/total     │   │  logo, currency │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductKind    │   │    TaxRate      │   │   ClientInfo    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Blind          │   │  bps (u32)      │   │  name, phone    │       │
//! │  │  Curtain        │   │  500 = 5%       │   │  address, proj. │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ProductSpec` is transient: built from raw input, consumed by the pricing
//! engine, then dropped. `LineItem` is the frozen result.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_quantity, validate_required, ValidationResult};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (UAE VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Percentage without trailing zeros, as printed in the `VAT (…%)` label.
    ///
    /// ## Example
    /// ```rust
    /// use drape_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_bps(500).percent_label(), "5");
    /// assert_eq!(TaxRate::from_bps(750).percent_label(), "7.5");
    /// assert_eq!(TaxRate::from_bps(825).percent_label(), "8.25");
    /// ```
    pub fn percent_label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        match frac {
            0 => whole.to_string(),
            f if f % 10 == 0 => format!("{}.{}", whole, f / 10),
            f => format!("{}.{:02}", whole, f),
        }
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Client
// =============================================================================

/// The customer a quotation is addressed to.
///
/// All four fields must be non-empty before a quote can be rendered.
/// The address may span several lines; it wraps in the client block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub project: String,
}

impl ClientInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        ClientInfo {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            project: project.into(),
        }
    }

    /// Fails on the first empty (or whitespace-only) field.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("client name", &self.name)?;
        validate_required("client phone", &self.phone)?;
        validate_required("client address", &self.address)?;
        validate_required("project name", &self.project)?;
        Ok(())
    }
}

// =============================================================================
// Company Profile
// =============================================================================

/// Bank-transfer details printed as the closing terms clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank: String,
    pub account: String,
    pub iban: String,
}

/// The issuing company, as printed in the header band and terms section.
///
/// Built once per document and never mutated while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Tax registration number (printed as `VAT:`).
    pub tax_id: String,
    /// Optional logo image; a missing or unreadable file just omits the logo.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    /// Terms clauses in print order, without numbering.
    #[serde(default)]
    pub terms: Vec<String>,
    /// Suffix printed after every amount.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_currency_code() -> String {
    "AED".to_string()
}

impl CompanyProfile {
    /// Terms as printed: `N. clause`, with bank details appended as the last
    /// numbered clause when present.
    ///
    /// ## Example
    /// ```rust
    /// use drape_core::types::CompanyProfile;
    ///
    /// let clauses = CompanyProfile::default().numbered_clauses();
    /// assert_eq!(clauses.len(), 10);
    /// assert!(clauses[0].starts_with("1. This quotation is valid"));
    /// assert!(clauses[9].starts_with("10. Bank Details:"));
    /// ```
    pub fn numbered_clauses(&self) -> Vec<String> {
        let mut clauses: Vec<String> = self
            .terms
            .iter()
            .enumerate()
            .map(|(i, term)| format!("{}. {}", i + 1, term))
            .collect();

        if let Some(bank) = &self.bank_details {
            clauses.push(format!(
                "{}. Bank Details:\n   - Bank: {}\n   - Account: {}\n   - IBAN: {}",
                clauses.len() + 1,
                bank.bank,
                bank.account,
                bank.iban
            ));
        }

        clauses
    }

    /// Formats an amount with grouping and the currency suffix: `1,234.56 AED`.
    pub fn format_amount(&self, amount: Money) -> String {
        format!("{} {}", amount.format_grouped(), self.currency_code)
    }
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "DRAPES AND FITOUT FZE".to_string(),
            address: "OFFICE B40-003, BLOCK B, SHARJAH, UAE".to_string(),
            phone: "+971 58 580 9365".to_string(),
            tax_id: "104706477700003".to_string(),
            logo_path: None,
            bank_details: Some(BankDetails {
                bank: "RAK Bank".to_string(),
                account: "0353425596001".to_string(),
                iban: "AE31 0400 0003 5342 5596 001".to_string(),
            }),
            terms: [
                "This quotation is valid for 30 days from the date of issue.",
                "Entry permits should be arranged by the client.",
                "Orders once confirmed cannot be cancelled.",
                "Rectifying ceiling issues does not fall under our scope of work.",
                "Ceiling issues will be flagged at time of measurement.",
                "Space must be ready before installation.",
                "Deep cleaning must be done before installation.",
                "Payment terms: 80% advance, 20% upon installation.",
                "Cheques payable to: DRAPES AND FITOUTS TRADING FZE",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            currency_code: default_currency_code(),
        }
    }
}

// =============================================================================
// Product Specification
// =============================================================================

/// Motor and remote prices for a motorized installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motorization {
    pub motor_price: Money,
    pub remote_price: Money,
}

impl Default for Motorization {
    /// 300.00 motor, 150.00 remote.
    fn default() -> Self {
        Motorization {
            motor_price: Money::from_major_minor(300, 0),
            remote_price: Money::from_major_minor(150, 0),
        }
    }
}

/// Curtain-specific pricing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurtainSpec {
    /// Gathered fabric width relative to the window width.
    pub fullness_factor: f64,
    /// Width of one fabric bolt, in meters.
    pub fabric_width_m: f64,
    pub stitching_cost_per_m: Money,
    pub fabric_price_per_m: Money,
    pub track_price_per_m: Money,
}

impl Default for CurtainSpec {
    /// Fullness 2.0, 2.8 m fabric, stitching 40/m, fabric 60/m, track 40/m.
    fn default() -> Self {
        CurtainSpec {
            fullness_factor: 2.0,
            fabric_width_m: 2.8,
            stitching_cost_per_m: Money::from_major_minor(40, 0),
            fabric_price_per_m: Money::from_major_minor(60, 0),
            track_price_per_m: Money::from_major_minor(40, 0),
        }
    }
}

/// The product being quoted. Two payload shapes, dispatched by `match`
/// inside the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductKind {
    Blind { price_per_sqm: Money },
    Curtain(CurtainSpec),
}

impl ProductKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Blind { .. } => "Blind",
            ProductKind::Curtain(_) => "Curtain",
        }
    }
}

/// Everything the pricing engine needs for one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductSpec {
    pub kind: ProductKind,
    pub width_m: f64,
    pub height_m: f64,
    /// `Some` when the installation is motorized.
    pub motorization: Option<Motorization>,
}

impl ProductSpec {
    pub fn blind(width_m: f64, height_m: f64, price_per_sqm: Money) -> Self {
        ProductSpec {
            kind: ProductKind::Blind { price_per_sqm },
            width_m,
            height_m,
            motorization: None,
        }
    }

    pub fn curtain(width_m: f64, height_m: f64, curtain: CurtainSpec) -> Self {
        ProductSpec {
            kind: ProductKind::Curtain(curtain),
            width_m,
            height_m,
            motorization: None,
        }
    }

    pub fn motorized(mut self, motorization: Motorization) -> Self {
        self.motorization = Some(motorization);
        self
    }

    #[inline]
    pub fn is_motorized(&self) -> bool {
        self.motorization.is_some()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// Stable handle for a line item inside a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineItemId(Uuid);

impl LineItemId {
    pub fn new() -> Self {
        LineItemId(Uuid::new_v4())
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One priced row of a quotation.
///
/// ## Invariant
/// `total_price == unit_price × quantity`. Fields are private so the only way
/// to obtain a `LineItem` is through [`LineItem::new`], which computes the
/// total itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    room_name: String,
    description: String,
    quantity: u32,
    unit_price: Money,
    total_price: Money,
}

impl LineItem {
    /// Builds a line item, deriving the total from unit price and quantity.
    ///
    /// ## Errors
    /// - empty room name
    /// - quantity of zero
    /// - negative unit price
    pub fn new(
        room_name: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> ValidationResult<Self> {
        let room_name = room_name.into();
        validate_required("room name", &room_name)?;
        validate_quantity(quantity)?;
        if unit_price.is_negative() {
            return Err(ValidationError::must_not_be_negative("unit price"));
        }

        Ok(LineItem {
            room_name: room_name.trim().to_string(),
            description: description.into(),
            quantity,
            unit_price,
            total_price: unit_price * quantity,
        })
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(5.0).bps(), 500);
    }

    #[test]
    fn test_client_info_validation() {
        let client = ClientInfo::new("Amal", "+971 50 000 0000", "Villa 12\nAl Khan", "Villa fit-out");
        assert!(client.validate().is_ok());

        let missing_phone = ClientInfo {
            phone: "  ".to_string(),
            ..client.clone()
        };
        assert_eq!(
            missing_phone.validate(),
            Err(ValidationError::Required {
                field: "client phone".to_string()
            })
        );

        assert!(ClientInfo::default().validate().is_err());
    }

    #[test]
    fn test_line_item_total_is_unit_times_quantity() {
        let item = LineItem::new("Kitchen", "Manual Blind (1.0m × 1.0m)", 3, Money::from_cents(15_000))
            .unwrap();
        assert_eq!(item.total_price(), Money::from_cents(45_000));
        assert_eq!(item.total_price(), item.unit_price() * item.quantity());
    }

    #[test]
    fn test_line_item_rejects_bad_input() {
        assert!(LineItem::new("", "x", 1, Money::zero()).is_err());
        assert!(LineItem::new("Hall", "x", 0, Money::zero()).is_err());
        assert!(LineItem::new("Hall", "x", 1, Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_numbered_clauses_without_bank() {
        let profile = CompanyProfile {
            bank_details: None,
            terms: vec!["A".to_string(), "B".to_string()],
            ..CompanyProfile::default()
        };
        assert_eq!(profile.numbered_clauses(), vec!["1. A", "2. B"]);
    }

    #[test]
    fn test_format_amount_uses_currency_suffix() {
        let profile = CompanyProfile::default();
        assert_eq!(profile.format_amount(Money::from_cents(123_456)), "1,234.56 AED");
    }

    #[test]
    fn test_product_spec_builders() {
        let spec = ProductSpec::blind(2.0, 1.5, Money::from_cents(5_000))
            .motorized(Motorization::default());
        assert!(spec.is_motorized());
        assert_eq!(spec.kind.label(), "Blind");
        assert_eq!(ProductSpec::curtain(3.0, 2.0, CurtainSpec::default()).kind.label(), "Curtain");
    }
}

//! # Pricing Engine
//!
//! Turns a [`ProductSpec`] into a priced [`LineItem`].
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BLIND                                                                  │
//! │    area  = width × height                                               │
//! │    total = area × price_per_sqm + BASE_INSTALL_FEE                      │
//! │                                                                         │
//! │  CURTAIN                                                                │
//! │    fabric_widths = (width × fullness) / fabric_width                    │
//! │    length        = height + SEAM_ALLOWANCE                              │
//! │    total = fabric_widths × length × fabric_price                        │
//! │          + fabric_widths × length × stitching_cost                      │
//! │          + width × track_price                                          │
//! │          + BASE_INSTALL_FEE                                             │
//! │                                                                         │
//! │  MOTORIZED (either kind)                                                │
//! │    total += motor_price + remote_price + MOTOR_INSTALL_FEE              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The formula part is evaluated in f64 minor units and rounded to the cent
//! once. The motorization surcharge is whole money and added afterwards, so
//! motorizing an item always adds exactly `motor + remote + 100.00`.
//!
//! Every function here is pure: same spec in, same line item out.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CurtainSpec, LineItem, Motorization, ProductKind, ProductSpec};
use crate::validation::{validate_dimension, validate_price, validate_required, ValidationResult};

/// Flat installation fee charged on every item.
pub const BASE_INSTALL_FEE: Money = Money::from_major_minor(100, 0);

/// Extra installation fee for motorized items.
pub const MOTOR_INSTALL_FEE: Money = Money::from_major_minor(100, 0);

/// Hem allowance added to curtain drop, in meters.
pub const SEAM_ALLOWANCE_M: f64 = 0.3;

/// Quantities derived while pricing, kept for previews and checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceBreakdown {
    Blind {
        area_sqm: f64,
    },
    Curtain {
        fabric_widths: f64,
        length_required_m: f64,
    },
}

/// Output of [`price`]: everything a line item needs except the room.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedProduct {
    pub description: String,
    /// Product and installation, before any motorization surcharge.
    pub base_total: Money,
    /// `motor + remote + MOTOR_INSTALL_FEE`, zero when manual.
    pub motorization_total: Money,
    pub breakdown: PriceBreakdown,
}

impl PricedProduct {
    #[inline]
    pub fn total(&self) -> Money {
        self.base_total + self.motorization_total
    }
}

/// Prices one product.
///
/// ## Errors
/// `ValidationError` when width/height/fullness/fabric width are not
/// positive finite numbers, or when any price is negative.
///
/// ## Example
/// ```rust
/// use drape_core::money::Money;
/// use drape_core::pricing::price;
/// use drape_core::types::ProductSpec;
///
/// let priced = price(&ProductSpec::blind(2.0, 1.5, Money::from_cents(5_000))).unwrap();
/// assert_eq!(priced.total(), Money::from_cents(25_000));
/// assert_eq!(priced.description, "Manual Blind (2.0m × 1.5m)");
/// ```
pub fn price(spec: &ProductSpec) -> ValidationResult<PricedProduct> {
    validate_dimension("width", spec.width_m)?;
    validate_dimension("height", spec.height_m)?;

    let motorization_total = motorization_surcharge(spec.motorization.as_ref())?;
    let mode = if spec.is_motorized() { "Motorized" } else { "Manual" };

    let (base_total, breakdown, description) = match &spec.kind {
        ProductKind::Blind { price_per_sqm } => {
            validate_price("price per sqm", *price_per_sqm)?;
            let area_sqm = spec.width_m * spec.height_m;
            let cents = area_sqm * price_per_sqm.cents() as f64 + BASE_INSTALL_FEE.cents() as f64;
            // {:?} keeps the trailing ".0" on whole meters: "2.0m", not "2m"
            let description = format!(
                "{} Blind ({:?}m × {:?}m)",
                mode, spec.width_m, spec.height_m
            );
            (
                round_total(cents)?,
                PriceBreakdown::Blind { area_sqm },
                description,
            )
        }
        ProductKind::Curtain(curtain) => {
            let (cents, fabric_widths, length_required_m) = curtain_cents(spec, curtain)?;
            let description = format!(
                "{} Curtain (Fabric: {:.2}m × {:.2} widths)",
                mode, length_required_m, fabric_widths
            );
            (
                round_total(cents)?,
                PriceBreakdown::Curtain {
                    fabric_widths,
                    length_required_m,
                },
                description,
            )
        }
    };

    Ok(PricedProduct {
        description,
        base_total,
        motorization_total,
        breakdown,
    })
}

/// Prices a product and freezes it into a quantity-1 line item for `room_name`.
pub fn price_line_item(room_name: &str, spec: &ProductSpec) -> ValidationResult<LineItem> {
    validate_required("room name", room_name)?;
    let priced = price(spec)?;
    let total = priced.total();
    LineItem::new(room_name, priced.description, 1, total)
}

fn curtain_cents(spec: &ProductSpec, curtain: &CurtainSpec) -> ValidationResult<(f64, f64, f64)> {
    validate_dimension("fullness factor", curtain.fullness_factor)?;
    validate_dimension("fabric width", curtain.fabric_width_m)?;
    validate_price("stitching cost per meter", curtain.stitching_cost_per_m)?;
    validate_price("fabric price per meter", curtain.fabric_price_per_m)?;
    validate_price("track price per meter", curtain.track_price_per_m)?;

    let fabric_widths = (spec.width_m * curtain.fullness_factor) / curtain.fabric_width_m;
    let length_required_m = spec.height_m + SEAM_ALLOWANCE_M;

    let fabric = fabric_widths * length_required_m * curtain.fabric_price_per_m.cents() as f64;
    let stitching = fabric_widths * length_required_m * curtain.stitching_cost_per_m.cents() as f64;
    let track = spec.width_m * curtain.track_price_per_m.cents() as f64;

    let cents = fabric + stitching + track + BASE_INSTALL_FEE.cents() as f64;
    Ok((cents, fabric_widths, length_required_m))
}

fn motorization_surcharge(motorization: Option<&Motorization>) -> ValidationResult<Money> {
    match motorization {
        None => Ok(Money::zero()),
        Some(m) => {
            validate_price("motor price", m.motor_price)?;
            validate_price("remote price", m.remote_price)?;
            Ok(m.motor_price + m.remote_price + MOTOR_INSTALL_FEE)
        }
    }
}

fn round_total(cents: f64) -> ValidationResult<Money> {
    Money::try_from_cents_f64(cents).ok_or_else(|| ValidationError::not_finite("total price"))
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing rounded floats drifts:                                         │
//! │    250.10 + 812.86 + 0.04 = 1063.0000000000002                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (fils / cents)                       │
//! │    Pricing formulas work in f64 (areas, fabric widths), then round     │
//! │    to the cent ONCE. Everything after that point is exact integer      │
//! │    arithmetic: line totals, subtotal, tax, grand total.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drape_core::money::Money;
//!
//! let fee = Money::from_major_minor(100, 0); // 100.00
//! let motor = Money::from_cents(30_000);     // 300.00
//! assert_eq!((fee + motor).format_grouped(), "400.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction is allowed; validation rejects negative prices
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: Serialized as the raw minor-unit integer
///
/// ## Where Money is Used
/// ```text
/// ProductSpec prices ──► Pricing Engine ──► LineItem.unit_price ──► total_price
///                                                                      │
///                 Quote.subtotal ◄── Σ total_price ◄───────────────────┘
///                        │
///                        └──► tax (TaxRate) ──► grand total ──► rendered "1,234.56 AED"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use drape_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal amount in major units, rounding to the nearest cent
    /// (half away from zero).
    ///
    /// Returns `None` for NaN, infinities, and values outside the i64 range.
    /// This is the single float → Money boundary: request files and the
    /// pricing formulas both go through it.
    ///
    /// ## Example
    /// ```rust
    /// use drape_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_major(60.5), Some(Money::from_cents(6050)));
    /// assert_eq!(Money::try_from_major(f64::NAN), None);
    /// ```
    pub fn try_from_major(amount: f64) -> Option<Self> {
        Self::try_from_cents_f64(amount * 100.0)
    }

    /// Rounds a fractional cent amount to whole cents.
    pub(crate) fn try_from_cents_f64(cents: f64) -> Option<Self> {
        if !cents.is_finite() {
            return None;
        }
        let rounded = cents.round();
        if rounded.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(rounded as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units as a float, for use inside formulas.
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use drape_core::money::Money;
    /// use drape_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(105_000);  // 1,050.00
    /// let vat = subtotal.calculate_tax(TaxRate::from_bps(500));
    /// assert_eq!(vat.cents(), 5_250);             // 52.50
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large subtotals cannot overflow before the division
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Formats with thousands separators and two decimals: `1,234.56`.
    ///
    /// ## Example
    /// ```rust
    /// use drape_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123_456_789).format_grouped(), "1,234,567.89");
    /// assert_eq!(Money::from_cents(-99_950).format_grouped(), "-999.50");
    /// ```
    pub fn format_grouped(&self) -> String {
        let digits = self.major().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, grouped, self.minor_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `1234.56`, without grouping or currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Quote Requests
//!
//! A quote request is a TOML file naming the client and the items to price,
//! in print order.
//!
//! ```toml
//! [client]
//! name = "Amal Haddad"
//! phone = "+971 50 123 4567"
//! address = "Al Khan, Sharjah"
//! project = "Villa 7"
//!
//! [[items]]
//! room = "Living Room"
//! product = "blind"
//! width = 2.0
//! height = 1.5
//! price_per_sqm = 50.0
//! motor = { motor_price = 300.0, remote_price = 150.0 }
//!
//! [[items]]
//! room = "Bedroom"
//! product = "curtain"
//! width = 3.0
//! height = 2.0
//! ```
//!
//! Curtain parameters left out take the standard values; `motor = {}`
//! means motorized at the standard motor and remote prices.

use std::path::Path;

use chrono::NaiveDate;
use drape_core::{
    ClientInfo, CurtainSpec, Money, Motorization, ProductSpec, Quote, QuoteNumber, TaxRate,
};
use serde::Deserialize;

use crate::error::RequestError;

/// Product family of a requested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductName {
    Blind,
    Curtain,
}

/// Optional motorization; missing prices take the standard values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorRequest {
    pub motor_price: Option<f64>,
    pub remote_price: Option<f64>,
}

/// One item as written in the request file. Amounts are in major units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRequest {
    pub room: String,
    pub product: ProductName,
    pub width: f64,
    pub height: f64,

    // Blind
    pub price_per_sqm: Option<f64>,

    // Curtain
    pub fullness_factor: Option<f64>,
    pub fabric_width: Option<f64>,
    pub stitching_cost_per_m: Option<f64>,
    pub fabric_price_per_m: Option<f64>,
    pub track_price_per_m: Option<f64>,

    pub motor: Option<MotorRequest>,
}

impl ItemRequest {
    /// Converts the item into a product specification.
    ///
    /// Fails with a reason string when a required field is missing, a field
    /// does not apply to the product, or an amount is not a finite number.
    pub fn to_spec(&self) -> Result<ProductSpec, String> {
        let spec = match self.product {
            ProductName::Blind => {
                if self.has_curtain_fields() {
                    return Err("curtain parameters given for a blind".to_string());
                }
                let price = self
                    .price_per_sqm
                    .ok_or_else(|| "price_per_sqm is required for a blind".to_string())?;
                ProductSpec::blind(self.width, self.height, money("price_per_sqm", price)?)
            }
            ProductName::Curtain => {
                if self.price_per_sqm.is_some() {
                    return Err("price_per_sqm given for a curtain".to_string());
                }
                let defaults = CurtainSpec::default();
                let curtain = CurtainSpec {
                    fullness_factor: self.fullness_factor.unwrap_or(defaults.fullness_factor),
                    fabric_width_m: self.fabric_width.unwrap_or(defaults.fabric_width_m),
                    stitching_cost_per_m: optional_money(
                        "stitching_cost_per_m",
                        self.stitching_cost_per_m,
                        defaults.stitching_cost_per_m,
                    )?,
                    fabric_price_per_m: optional_money(
                        "fabric_price_per_m",
                        self.fabric_price_per_m,
                        defaults.fabric_price_per_m,
                    )?,
                    track_price_per_m: optional_money(
                        "track_price_per_m",
                        self.track_price_per_m,
                        defaults.track_price_per_m,
                    )?,
                };
                ProductSpec::curtain(self.width, self.height, curtain)
            }
        };

        match &self.motor {
            Some(motor) => {
                let defaults = Motorization::default();
                Ok(spec.motorized(Motorization {
                    motor_price: optional_money(
                        "motor_price",
                        motor.motor_price,
                        defaults.motor_price,
                    )?,
                    remote_price: optional_money(
                        "remote_price",
                        motor.remote_price,
                        defaults.remote_price,
                    )?,
                }))
            }
            None => Ok(spec),
        }
    }

    fn has_curtain_fields(&self) -> bool {
        self.fullness_factor.is_some()
            || self.fabric_width.is_some()
            || self.stitching_cost_per_m.is_some()
            || self.fabric_price_per_m.is_some()
            || self.track_price_per_m.is_some()
    }
}

fn money(field: &str, amount: f64) -> Result<Money, String> {
    Money::try_from_major(amount).ok_or_else(|| format!("{} must be a finite number", field))
}

fn optional_money(field: &str, amount: Option<f64>, default: Money) -> Result<Money, String> {
    amount.map_or(Ok(default), |a| money(field, a))
}

/// A parsed quote request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteRequest {
    pub client: ClientInfo,
    #[serde(default)]
    pub items: Vec<ItemRequest>,
}

impl QuoteRequest {
    pub fn from_toml_str(contents: &str) -> Result<Self, RequestError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, RequestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RequestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Prices every item and assembles the quote.
    ///
    /// Stops at the first item that fails, naming its 1-based position and
    /// room.
    pub fn build_quote(
        &self,
        number: QuoteNumber,
        issued_on: NaiveDate,
        tax_rate: TaxRate,
    ) -> Result<Quote, RequestError> {
        let mut quote = Quote::new(number, issued_on, self.client.clone()).with_tax_rate(tax_rate);

        for (i, item) in self.items.iter().enumerate() {
            let item_err = |reason: String| RequestError::Item {
                index: i + 1,
                room: item.room.clone(),
                reason,
            };
            let spec = item.to_spec().map_err(item_err)?;
            quote
                .add_priced(&item.room, &spec)
                .map_err(|e| item_err(e.to_string()))?;
        }

        Ok(quote)
    }
}

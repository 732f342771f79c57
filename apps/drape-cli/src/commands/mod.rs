//! # Commands
//!
//! One module per subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (shared quote loading)
//! ├── price.rs    ◄─── Terminal preview
//! ├── generate.rs ◄─── PDF output
//! └── config.rs   ◄─── config init / show
//! ```
//!
//! ## Command Flow
//! ```text
//! request.toml ──► QuoteRequest ──► build_quote ──► Quote
//!                                       ▲             │
//!              AppConfig (prefix, VAT) ─┘             ├──► price    (table)
//!                                                     └──► generate (PDF)
//! ```

pub mod config;
pub mod generate;
pub mod price;

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use drape_core::{Quote, QuoteNumberIssuer, TaxRate};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::request::QuoteRequest;

/// Reads, prices and assembles the quote described by `request_path`.
///
/// `tax_rate` overrides the configured rate for this quote only.
pub fn load_quote(
    request_path: &Path,
    config: &AppConfig,
    tax_rate: Option<TaxRate>,
) -> AppResult<Quote> {
    build_quote_at(request_path, config, tax_rate, Local::now().naive_local())
}

fn build_quote_at(
    request_path: &Path,
    config: &AppConfig,
    tax_rate: Option<TaxRate>,
    now: NaiveDateTime,
) -> AppResult<Quote> {
    let request = QuoteRequest::load(request_path)?;
    let number = QuoteNumberIssuer::new(config.quote.number_prefix.clone()).issue(now);
    let tax_rate = tax_rate.unwrap_or_else(|| config.quote.tax_rate());

    debug!(
        request = %request_path.display(),
        items = request.items.len(),
        quote = %number,
        "Pricing request"
    );
    Ok(request.build_quote(number, now.date(), tax_rate)?)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    pub const REQUEST: &str = r#"
[client]
name = "Amal Haddad"
phone = "+971 50 123 4567"
address = "Al Khan, Sharjah"
project = "Villa 7"

[[items]]
room = "Living Room"
product = "blind"
width = 2.0
height = 1.5
price_per_sqm = 50.0

[[items]]
room = "Guest Room"
product = "curtain"
width = 3.0
height = 2.0
motor = {}
"#;

    pub fn write_request(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("request.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }
}

//! `price`: prints a quote as a terminal table without writing anything.

use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, Table};
use drape_core::{CompanyProfile, Quote};

use crate::config::AppConfig;
use crate::error::AppResult;

use super::load_quote;

pub fn run(request: &Path, config: &AppConfig) -> AppResult<String> {
    let quote = load_quote(request, config, None)?;
    Ok(preview(&quote, &config.company))
}

/// Renders the quote as a summary line, client line and item table.
pub fn preview(quote: &Quote, profile: &CompanyProfile) -> String {
    let client = quote.client();
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Room"),
        Cell::new("Description"),
        Cell::new("Qty"),
        Cell::new("Unit Price"),
        Cell::new("Total"),
    ]);

    let amount = |value| Cell::new(profile.format_amount(value)).set_alignment(CellAlignment::Right);

    for (i, item) in quote.items().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(item.room_name()),
            Cell::new(item.description()),
            Cell::new(item.quantity()).set_alignment(CellAlignment::Center),
            amount(item.unit_price()),
            amount(item.total_price()),
        ]);
    }

    let totals = quote.totals();
    let vat_label = format!("VAT ({}%)", totals.tax_rate.percent_label());
    let summary = [
        ("Subtotal", totals.subtotal),
        (vat_label.as_str(), totals.tax),
        ("GRAND TOTAL", totals.grand_total),
    ];
    for (label, value) in summary {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(""),
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            amount(value).add_attribute(Attribute::Bold),
        ]);
    }

    format!(
        "Quotation {} | Date: {}\nClient: {} ({}) | Project: {}\n{table}",
        quote.number(),
        quote.issued_on_label(),
        client.name,
        client.phone,
        client.project,
    )
}

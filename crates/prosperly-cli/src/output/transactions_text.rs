use std::io;

use prosperly_client::sanitize::{capitalize, format_amount, render_description};
use prosperly_client::{Currency, Transaction, TransactionKind};
use serde::Deserialize;
use serde_json::Value;

use super::read_view;

const DESCRIPTION_DISPLAY_CHARS: usize = 50;

#[derive(Debug, Deserialize)]
struct AddView {
    message: String,
    transaction: Transaction,
}

#[derive(Debug, Deserialize)]
struct ListView {
    display_currency: Currency,
    page: usize,
    total_pages: usize,
    total: usize,
    rows: Vec<RowView>,
}

#[derive(Debug, Deserialize)]
struct RowView {
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: f64,
    date: String,
    category: String,
    description: String,
    currency: Currency,
    converted_amount: f64,
}

pub fn render_add(data: &Value) -> io::Result<String> {
    let view: AddView = read_view(data)?;
    let transaction = &view.transaction;
    let lines = [
        view.message,
        String::new(),
        format!("  ID:           {}", transaction.id),
        format!("  Type:         {}", capitalize(transaction.kind.as_str())),
        format!(
            "  Amount:       {} {}",
            format_amount(transaction.amount),
            transaction.currency
        ),
        format!("  Date:         {}", transaction.date),
        format!("  Category:     {}", capitalize(&transaction.category)),
        format!(
            "  Description:  {}",
            render_description(&transaction.description, DESCRIPTION_DISPLAY_CHARS)
        ),
    ];
    Ok(lines.join("\n"))
}

pub fn render_list(data: &Value) -> io::Result<String> {
    let view: ListView = read_view(data)?;
    if view.rows.is_empty() {
        return Ok(
            "No transactions found.\n\nRecord one with `prosperly add --help`.".to_string(),
        );
    }

    let converted_header = format!("In {}", view.display_currency);
    let mut table = vec![[
        "Date".to_string(),
        "Type".to_string(),
        "Category".to_string(),
        "Amount".to_string(),
        converted_header,
        "Description".to_string(),
    ]];
    for row in &view.rows {
        table.push([
            row.date.clone(),
            capitalize(row.kind.as_str()),
            capitalize(&row.category),
            format!("{} {}", format_amount(row.amount), row.currency),
            format_amount(row.converted_amount),
            render_description(&row.description, DESCRIPTION_DISPLAY_CHARS),
        ]);
    }

    let mut lines = align_columns(&table);
    lines.push(String::new());
    lines.push(format!(
        "Page {} of {} ({} total)",
        view.page, view.total_pages, view.total
    ));
    if view.page < view.total_pages {
        lines.push(format!(
            "Next page: `prosperly list --page {}`",
            view.page + 1
        ));
    }
    Ok(lines.join("\n"))
}

/// Pads every column but the last to its widest cell, counting characters.
fn align_columns<const N: usize>(table: &[[String; N]]) -> Vec<String> {
    let mut widths = [0usize; N];
    for row in table {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    table
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (index, cell) in row.iter().enumerate() {
                if index + 1 == N {
                    line.push_str(cell);
                } else {
                    let padding = widths[index] - cell.chars().count();
                    line.push_str(cell);
                    line.push_str(&" ".repeat(padding + 2));
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

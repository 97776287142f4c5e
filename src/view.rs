//! Plain-text rendering of the transaction list and summary for terminals.

use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{currency::format_currency, summary::Summary, transaction::TransactionView};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const HEADERS: [&str; 7] = [
    "ID",
    "GCash No.",
    "Customer Name",
    "Amount",
    "Type",
    "Reference No.",
    "Date",
];

/// The column holding the amount, which is right-aligned.
const AMOUNT_COLUMN: usize = 3;

/// Render `transactions` as a table with one row per transaction, in the
/// order given.
pub fn render_transactions(transactions: &[TransactionView]) -> String {
    if transactions.is_empty() {
        return "No transactions recorded yet.\n".to_owned();
    }

    let rows: Vec<[String; 7]> = transactions
        .iter()
        .map(|transaction| {
            [
                transaction.id.to_string(),
                transaction.gcash_number.to_string(),
                transaction.customer_name(),
                format_currency(transaction.amount),
                transaction.transaction_type.to_string(),
                transaction.reference_number.to_string(),
                format_date(transaction.transaction_date),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = render_row(&HEADERS.map(str::to_owned), &widths);
    table.push_str(&render_row(
        &widths.map(|width| "-".repeat(width)),
        &widths,
    ));
    for row in &rows {
        table.push_str(&render_row(row, &widths));
    }

    table
}

/// Render the cash-in, cash-out and cash-on-hand totals on one line.
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Cash-in: {}    Cash-out: {}    Cash on Hand: {}\n",
        format_currency(summary.cash_in),
        format_currency(summary.cash_out),
        format_currency(summary.net),
    )
}

fn render_row(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, &width))| {
            if column == AMOUNT_COLUMN {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    format!("{}\n", line.trim_end())
}

fn format_date(date: PrimitiveDateTime) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

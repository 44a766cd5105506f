//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::{OrderSummary, PartySize},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Printable receipt for a submitted table order.
#[derive(Debug)]
pub struct Receipt<'a> {
    cart: &'a Cart,
    summary: &'a OrderSummary,
    shares: SmallVec<[Money<'static, Currency>; 8]>,
}

impl<'a> Receipt<'a> {
    /// Receipt for `cart`, totalled by `summary`.
    pub fn new(cart: &'a Cart, summary: &'a OrderSummary) -> Self {
        Self {
            cart,
            summary,
            shares: SmallVec::new(),
        }
    }

    /// Also show what each of `people` diners owes. A split of one is not shown.
    #[must_use]
    pub fn with_split(mut self, people: PartySize) -> Self {
        self.shares = if people.get() > 1 {
            self.summary.split(people)
        } else {
            SmallVec::new()
        };

        self
    }

    /// Writes the receipt table and totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total", "Notes"]);

        let currency = self.cart.currency();

        for (idx, line) in self.cart.lines().iter().enumerate() {
            builder.push_record([
                (idx + 1).to_string(),
                line.name().to_string(),
                line.quantity().to_string(),
                line.unit_price().to_money(currency).to_string(),
                line.line_total().to_money(currency).to_string(),
                line.customizations().summary(),
            ]);
        }

        write_lines_table(&mut out, builder)?;
        write_totals(&mut out, self)?;

        Ok(())
    }
}

fn write_lines_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Columns::new(5..6), Color::FG_BRIGHT_BLACK);

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_totals(out: &mut impl io::Write, receipt: &Receipt<'_>) -> Result<(), ReceiptError> {
    let summary = receipt.summary;

    let mut rows: Vec<(String, String)> = vec![
        (" Subtotal:".to_string(), format!("{}  ", summary.subtotal())),
        (
            format!(" Tax ({}%):", summary.policy().rate_points()),
            format!("{}  ", summary.tax()),
        ),
        (
            " \x1b[1mOrder Total:\x1b[0m".to_string(),
            format!("\x1b[1m{}\x1b[0m  ", summary.total()),
        ),
    ];

    for (idx, share) in receipt.shares.iter().enumerate() {
        rows.push((format!(" Diner {}:", idx + 1), format!("{share}  ")));
    }

    let label_width = rows
        .iter()
        .map(|(label, _)| display_len(label))
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value)| display_len(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &rows {
        writeln!(
            out,
            "{}{label}  {}{value}",
            padding(label, label_width),
            padding(value, value_width),
        )?;
    }

    writeln!(out)?;

    Ok(())
}

/// `s` with ANSI escape sequences removed.
fn plain_text(s: &str) -> String {
    let mut in_escape = false;

    s.chars()
        .filter(|&ch| {
            if in_escape {
                in_escape = !ch.is_ascii_alphabetic();
                false
            } else if ch == '\x1b' {
                in_escape = true;
                false
            } else {
                true
            }
        })
        .collect()
}

fn display_len(s: &str) -> usize {
    plain_text(s).chars().count()
}

/// Spaces that right-align `s` in a column `width` characters wide.
fn padding(s: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(display_len(s)))
}

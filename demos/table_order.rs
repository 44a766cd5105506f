//! Table Order Example
//!
//! Replays a scripted table session from `fixtures/orders` and prints the receipt.
//!
//! Use `-o` to pick the order fixture by name
//! Use `-d` to split the bill between a number of diners
//! Use `--tax-rate` to change the checkout tax (defaults to 10%)

use std::io;

use anyhow::Result;

use snapseat::{
    checkout::OrderSummary, config::OrderConfig, fixtures::Fixture, logging::init_subscriber,
    receipt::Receipt,
};

/// Table Order Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let config = OrderConfig::load()?;

    init_subscriber(&config.logging)?;

    let session = Fixture::with_base_path(&config.fixtures).order(&config.order)?;
    let cart = session.replay();

    println!(
        "Order '{}': {} line(s), {} item(s)",
        config.order,
        cart.len(),
        cart.item_count()
    );

    let summary = OrderSummary::from_cart(&cart, config.checkout.tax_policy())?;
    let diners = config.checkout.diners.unwrap_or(session.diners());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::new(&cart, &summary)
        .with_split(diners)
        .write_to(&mut handle)?;

    Ok(())
}

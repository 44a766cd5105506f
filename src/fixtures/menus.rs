//! Menu Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    menu::{Menu, MenuItem, MenuItemId},
    prices::Price,
};

/// Menu file in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Restaurant serving the menu
    #[serde(default)]
    pub restaurant_id: u64,

    /// Currency code every price must use (e.g., "USD")
    pub currency: String,

    /// Items in display order
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item id
    pub id: u64,

    /// Item name
    pub name: String,

    /// Item description
    #[serde(default)]
    pub description: String,

    /// Item price (e.g., "12.50 USD")
    pub price: String,

    /// Menu section
    pub category: String,

    /// Whether the item can be ordered
    #[serde(default = "available_by_default")]
    pub available: bool,

    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: u32,
}

fn available_by_default() -> bool {
    true
}

impl TryFrom<MenuFixture> for Menu {
    type Error = FixtureError;

    fn try_from(fixture: MenuFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;
        let mut menu = Menu::new(currency);

        for item in fixture.items {
            let (price, item_currency) = parse_price(&item.price)?;

            if item_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    item_currency.iso_alpha_code.to_string(),
                ));
            }

            if menu.get(MenuItemId(item.id)).is_some() {
                return Err(FixtureError::DuplicateItem(item.id));
            }

            menu.insert(MenuItem {
                id: MenuItemId(item.id),
                restaurant_id: fixture.restaurant_id,
                name: item.name,
                description: item.description,
                price,
                category: item.category,
                available: item.available,
                prep_time: item.prep_time,
            });
        }

        Ok(menu)
    }
}

/// Parse price string (e.g., "2.99 GBP") into a price and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal in whole minor units, or if the
/// currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_u64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((Price::new(minor_units), parse_currency(currency_code)?))
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything but GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or if the value is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
            / 100.0
    } else {
        trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
    };

    if value.is_finite() && value >= 0.0 {
        Ok(Percentage::from(value))
    } else {
        Err(FixtureError::InvalidPercentage(s.to_string()))
    }
}

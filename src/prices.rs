//! Prices

use std::{
    iter::Sum,
    ops::{Add, AddAssign, Deref, Sub, SubAssign},
};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Represents a price in pence/cents.
///
/// Arithmetic saturates rather than wrapping, so a price can never go below zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Zero minor units.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price::new(self.value.saturating_mul(u64::from(quantity)))
    }

    /// The price as [`Money`] in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(i64::try_from(self.value).unwrap_or(i64::MAX), currency)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Self::Output {
        Price::new(self.value.saturating_add(rhs.value))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        *self = *self + rhs;
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Price) -> Self::Output {
        Price::new(self.value.saturating_sub(rhs.value))
    }
}

impl SubAssign for Price {
    fn sub_assign(&mut self, rhs: Price) {
        *self = *self - rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Price::new(250).times(3), Price::new(750));
        assert_eq!(Price::new(250).times(0), Price::ZERO);
    }

    #[test]
    fn subtraction_saturates_at_zero() {
        assert_eq!(Price::new(100) - Price::new(300), Price::ZERO);
    }

    #[test]
    fn sum_adds_every_price() {
        let total: Price = [100, 200, 300].into_iter().map(Price::new).sum();

        assert_eq!(total, Price::new(600));
    }

    #[test]
    fn to_money_keeps_minor_units() {
        assert_eq!(Price::new(1250).to_money(USD), Money::from_minor(1250, USD));
    }
}

//! Checkout
//!
//! Tax is applied when the order is submitted, never stored on the cart.

use std::num::NonZeroUsize;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::Cart, prices::Price};

/// Errors raised while summarising an order for payment.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Empty orders cannot be submitted.
    #[error("order is empty; nothing to check out")]
    EmptyOrder,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A bill can only be split between one and [`PartySize::MAX`] diners.
    #[error("a bill can be split between 1 and 20 diners, got {0}")]
    PartySize(usize),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Number of diners sharing a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartySize(NonZeroUsize);

impl PartySize {
    /// Largest party a bill can be split between.
    pub const MAX: usize = 20;

    /// A single diner paying the whole bill.
    pub const ONE: PartySize = PartySize(NonZeroUsize::MIN);

    /// Party of `people` diners.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::PartySize`] unless `1 <= people <= PartySize::MAX`.
    pub fn new(people: usize) -> Result<Self, CheckoutError> {
        NonZeroUsize::new(people)
            .filter(|count| count.get() <= Self::MAX)
            .map(Self)
            .ok_or(CheckoutError::PartySize(people))
    }

    /// Number of diners.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PartySize {
    type Error = CheckoutError;

    fn try_from(people: usize) -> Result<Self, Self::Error> {
        Self::new(people)
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::ONE
    }
}

/// Flat-rate sales tax applied at checkout.
#[derive(Debug, Clone, Copy)]
pub struct TaxPolicy {
    rate: Percentage,
}

impl TaxPolicy {
    /// Tax at `rate`.
    pub fn new(rate: Percentage) -> Self {
        Self { rate }
    }

    /// The tax rate.
    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Rate in percentage points, e.g. `10` for 10%.
    pub fn rate_points(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).round_dp(4).normalize()
    }

    /// Tax owed on `amount`, rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::PercentConversion`] if the result cannot be represented.
    pub fn tax_on(&self, amount: Price) -> Result<Price, CheckoutError> {
        let minor = Decimal::from_u64(*amount).ok_or(CheckoutError::PercentConversion)?;

        (self.rate * Decimal::ONE)
            .checked_mul(minor)
            .ok_or(CheckoutError::PercentConversion)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map(Price::new)
            .ok_or(CheckoutError::PercentConversion)
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::new(Percentage::from(0.1))
    }
}

/// Totals shown on the checkout page.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    subtotal: Price,
    tax: Price,
    total: Price,
    item_count: u64,
    policy: TaxPolicy,
    currency: &'static Currency,
}

impl OrderSummary {
    /// Summarise `cart` for payment.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyOrder`]: the cart has no lines.
    /// - [`CheckoutError::PercentConversion`]: tax could not be calculated.
    pub fn from_cart(cart: &Cart, policy: TaxPolicy) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        let subtotal = cart.subtotal();
        let tax = policy.tax_on(subtotal)?;

        Ok(Self {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count: cart.item_count(),
            policy,
            currency: cart.currency(),
        })
    }

    /// Sum of all line totals, before tax.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal.to_money(self.currency)
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax.to_money(self.currency)
    }

    /// Amount to pay.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total.to_money(self.currency)
    }

    /// Number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Tax policy the summary was built with.
    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// Currency for all amounts.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Split the amount to pay evenly between `people` diners.
    ///
    /// The split is taken on the total with tax included, not the pre-tax subtotal, so the
    /// shares settle the whole bill. Shares are whole minor units; the leftover cents go one
    /// each to the first diners, so the shares always add up to the total.
    pub fn split(&self, people: PartySize) -> SmallVec<[Money<'static, Currency>; 8]> {
        let people_count = u64::try_from(people.get()).unwrap_or(1);
        let base = *self.total / people_count;
        let remainder = *self.total % people_count;

        (0..people_count)
            .map(|idx| {
                let share = if idx < remainder { base + 1 } else { base };

                Price::new(share).to_money(self.currency)
            })
            .collect()
    }

    /// Sum of `shares`, to check a split against the total.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Money`] if a share is in a different currency.
    pub fn split_total(
        &self,
        shares: &[Money<'static, Currency>],
    ) -> Result<Money<'static, Currency>, CheckoutError> {
        let total = shares
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, share| {
                acc.add(*share)
            })?;

        Ok(total)
    }
}

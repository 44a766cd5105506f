//! `SnapSeat` prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, OrderLine},
    checkout::{CheckoutError, OrderSummary, PartySize, TaxPolicy},
    fixtures::{Fixture, FixtureError, TableSession},
    menu::{Customizations, Menu, MenuError, MenuItem, MenuItemId},
    prices::Price,
    receipt::{Receipt, ReceiptError},
};

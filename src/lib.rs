//! `SnapSeat`
//!
//! Table ordering for `SnapSeat` restaurants: a menu catalog, the order cart a table fills
//! from it, and checkout totals with tax and bill splitting.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod logging;
pub mod menu;
pub mod prelude;
pub mod prices;
pub mod receipt;

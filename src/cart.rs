//! Table order cart
//!
//! Holds the lines a table has picked from the menu and keeps a running subtotal in minor
//! units. Every operation is total: unknown ids are ignored and a quantity below one removes
//! the line.

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    menu::{Customizations, MenuItem, MenuItemId},
    prices::Price,
};

/// One menu item and how many of it the table ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    item_id: MenuItemId,
    name: String,
    unit_price: Price,
    quantity: u32,
    category: String,
    prep_time: u32,
    customizations: Customizations,
}

impl OrderLine {
    fn from_item(item: &MenuItem, customizations: Customizations) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            category: item.category.clone(),
            prep_time: item.prep_time,
            customizations,
        }
    }

    /// Id of the menu item this line was created from.
    pub fn item_id(&self) -> MenuItemId {
        self.item_id
    }

    /// Item name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at the time it was added.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Number ordered, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Menu section the item came from.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Preparation time in minutes.
    pub fn prep_time(&self) -> u32 {
        self.prep_time
    }

    /// Customizations chosen when the line was first added.
    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    /// `unit_price * quantity`
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// Exact line total in minor units. Never saturates.
    fn minor_total(&self) -> u128 {
        u128::from(*self.unit_price) * u128::from(self.quantity)
    }
}

/// A change requested by the menu or the order sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one of `item`, or bump the quantity if it is already on the order.
    AddItem {
        /// Catalog snapshot to copy from
        item: MenuItem,
        /// Choices made for the item
        customizations: Customizations,
    },

    /// Drop the line for this item.
    RemoveItem(MenuItemId),

    /// Set a line's quantity. Anything below one removes the line.
    UpdateQuantity {
        /// Line to change
        id: MenuItemId,
        /// New quantity
        quantity: i64,
    },

    /// Move a line's quantity up or down by `delta`.
    AdjustQuantity {
        /// Line to change
        id: MenuItemId,
        /// Signed change
        delta: i64,
    },

    /// Empty the order.
    ClearOrder,
}

impl CartAction {
    /// Add `item` without customizations.
    pub fn add(item: MenuItem) -> Self {
        CartAction::AddItem {
            item,
            customizations: Customizations::default(),
        }
    }
}

/// The table's current order.
///
/// The running subtotal is held exactly in minor units; it is only clamped to a [`Price`]
/// when read.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<OrderLine>,
    subtotal: u128,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            subtotal: 0,
            currency,
        }
    }

    /// Apply a single action.
    pub fn dispatch(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem {
                item,
                customizations,
            } => self.add_customized(&item, customizations),
            CartAction::RemoveItem(id) => self.remove_item(id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(id, quantity),
            CartAction::AdjustQuantity { id, delta } => self.adjust_quantity(id, delta),
            CartAction::ClearOrder => self.clear(),
        }
    }

    /// Reducer form of [`Cart::dispatch`]: consumes the state and returns the next one.
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        self.dispatch(action);
        self
    }

    /// Add one of `item` with no customizations.
    pub fn add_item(&mut self, item: &MenuItem) {
        self.add_customized(item, Customizations::default());
    }

    /// Add one of `item`.
    ///
    /// When the item is already on the order its quantity goes up by one and the
    /// customizations passed here are ignored.
    pub fn add_customized(&mut self, item: &MenuItem, customizations: Customizations) {
        if let Some(line) = self.line_mut(item.id) {
            let previous = line.minor_total();
            line.quantity = line.quantity.saturating_add(1);
            let (current, quantity) = (line.minor_total(), line.quantity);

            self.apply_line_change(previous, current);

            debug!(item_id = %item.id, quantity, "incremented order line");
        } else {
            let line = OrderLine::from_item(item, customizations);

            self.apply_line_change(0, line.minor_total());
            self.lines.push(line);

            debug!(item_id = %item.id, name = %item.name, "added order line");
        }

        self.debug_check_invariants();
    }

    /// Remove the line for `id`. Does nothing if there is none.
    pub fn remove_item(&mut self, id: MenuItemId) {
        let Some(pos) = self.position(id) else {
            return;
        };

        let line = self.lines.remove(pos);
        self.apply_line_change(line.minor_total(), 0);

        debug!(item_id = %id, quantity = line.quantity, "removed order line");

        self.debug_check_invariants();
    }

    /// Set the quantity for `id`. A quantity below one removes the line.
    ///
    /// Quantities above `u32::MAX` are stored as `u32::MAX`.
    pub fn update_quantity(&mut self, id: MenuItemId, quantity: i64) {
        if quantity < 1 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.line_mut(id) else {
            return;
        };

        let previous = line.minor_total();
        line.quantity = quantity;
        let current = line.minor_total();

        self.apply_line_change(previous, current);

        debug!(item_id = %id, quantity, "updated order line quantity");

        self.debug_check_invariants();
    }

    /// Change the quantity for `id` by `delta`, removing the line if it drops below one.
    pub fn adjust_quantity(&mut self, id: MenuItemId, delta: i64) {
        if let Some(line) = self.line(id) {
            let quantity = i64::from(line.quantity).saturating_add(delta);

            self.update_quantity(id, quantity);
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.subtotal = 0;

        debug!("cleared order");
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// The line for `id`, if any.
    pub fn line(&self, id: MenuItemId) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.item_id == id)
    }

    /// Running subtotal, clamped to `u64::MAX` minor units.
    pub fn subtotal(&self) -> Price {
        clamp_to_price(self.subtotal)
    }

    /// Running subtotal in the cart currency.
    pub fn subtotal_money(&self) -> Money<'static, Currency> {
        self.subtotal().to_money(self.currency)
    }

    /// Subtotal summed from scratch over every line.
    pub fn recomputed_subtotal(&self) -> Price {
        clamp_to_price(self.recomputed_minor())
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency used to display prices.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == id)
    }

    fn line_mut(&mut self, id: MenuItemId) -> Option<&mut OrderLine> {
        self.lines.iter_mut().find(|line| line.item_id == id)
    }

    fn recomputed_minor(&self) -> u128 {
        self.lines
            .iter()
            .map(OrderLine::minor_total)
            .fold(0, u128::saturating_add)
    }

    /// Swap a line's old total for its new one in the running subtotal.
    fn apply_line_change(&mut self, previous: u128, current: u128) {
        self.subtotal = self
            .subtotal
            .saturating_sub(previous)
            .saturating_add(current);
    }

    fn debug_check_invariants(&self) {
        debug_assert_eq!(
            self.subtotal,
            self.recomputed_minor(),
            "running subtotal drifted from line totals"
        );
        debug_assert!(
            self.lines.iter().all(|line| line.quantity >= 1),
            "order line with zero quantity"
        );
    }
}

fn clamp_to_price(minor: u128) -> Price {
    Price::new(u64::try_from(minor).unwrap_or(u64::MAX))
}

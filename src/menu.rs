//! Menu
//!
//! The read-only catalog a restaurant publishes. The cart copies what it needs from a
//! [`MenuItem`] when the item is added, so later catalog changes never reach existing lines.

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prices::Price;

/// Errors raised when picking an item off the menu.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// No item with this id is on the menu.
    #[error("Menu item {0} not found")]
    NotFound(MenuItemId),

    /// The item is listed but currently unavailable.
    #[error("Menu item {0} is currently unavailable")]
    Unavailable(MenuItemId),
}

/// Menu item identifier, as assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MenuItemId(pub u64);

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for MenuItemId {
    fn from(value: u64) -> Self {
        MenuItemId(value)
    }
}

/// A single dish or drink on a restaurant menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Item id
    pub id: MenuItemId,

    /// Restaurant the item belongs to
    pub restaurant_id: u64,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Unit price in minor units of the menu currency
    pub price: Price,

    /// Menu section, e.g. "Starters"
    pub category: String,

    /// Whether the kitchen is currently serving it
    pub available: bool,

    /// Preparation time in minutes
    pub prep_time: u32,
}

impl MenuItem {
    /// Creates an available item with no description and no prep time.
    pub fn new(id: impl Into<MenuItemId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            restaurant_id: 0,
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            available: true,
            prep_time: 0,
        }
    }

    /// Sets the menu section.
    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Choices a diner made for an item before adding it to the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customizations {
    /// Ingredients to leave out
    pub removed_ingredients: Vec<String>,

    /// e.g. "Medium Rare" or "No Ice"
    pub cooking_preference: Option<String>,

    /// Free-text note for the kitchen
    pub special_instructions: Option<String>,
}

impl Customizations {
    /// True when nothing was customized.
    pub fn is_empty(&self) -> bool {
        self.removed_ingredients.is_empty()
            && self.cooking_preference.is_none()
            && self.special_instructions.is_none()
    }

    /// One-line summary for the kitchen ticket, e.g. `Medium; no Onions, Garlic; "extra crispy"`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::with_capacity(3);

        if let Some(preference) = &self.cooking_preference {
            parts.push(preference.clone());
        }

        if !self.removed_ingredients.is_empty() {
            parts.push(format!("no {}", self.removed_ingredients.join(", ")));
        }

        if let Some(note) = &self.special_instructions {
            parts.push(format!("\"{note}\""));
        }

        parts.join("; ")
    }
}

/// Menu catalog for one restaurant, in a single currency.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
    index: FxHashMap<MenuItemId, usize>,
    currency: &'static Currency,
}

impl Menu {
    /// Create an empty menu priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Add an item, replacing any existing item with the same id in place.
    pub fn insert(&mut self, item: MenuItem) {
        if let Some(existing) = self
            .index
            .get(&item.id)
            .and_then(|&pos| self.items.get_mut(pos))
        {
            *existing = item;
            return;
        }

        self.index.insert(item.id, self.items.len());
        self.items.push(item);
    }

    /// Look up an item by id.
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.index.get(&id).and_then(|&pos| self.items.get(pos))
    }

    /// Pick an item for ordering.
    ///
    /// # Errors
    ///
    /// - [`MenuError::NotFound`]: the id is not on the menu.
    /// - [`MenuError::Unavailable`]: the item is listed but not being served.
    pub fn select(&self, id: MenuItemId) -> Result<&MenuItem, MenuError> {
        let item = self.get(id).ok_or(MenuError::NotFound(id))?;

        if item.available {
            Ok(item)
        } else {
            Err(MenuError::Unavailable(id))
        }
    }

    /// Iterate over items in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }

    /// Items in one menu section.
    pub fn by_category<'m>(&'m self, category: &'m str) -> impl Iterator<Item = &'m MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Menu sections, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }

        categories
    }

    /// Number of items on the menu.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the menu is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every price on this menu is in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn test_menu() -> Menu {
        let mut menu = Menu::new(USD);

        menu.insert(MenuItem::new(1, "Garlic Bread", Price::new(650)).in_category("Starters"));
        menu.insert(MenuItem::new(2, "Ribeye Steak", Price::new(3200)).in_category("Main Course"));
        menu.insert(MenuItem::new(3, "Bruschetta", Price::new(800)).in_category("Starters"));

        menu
    }

    #[test]
    fn get_returns_inserted_item() {
        let menu = test_menu();

        let item = menu.get(MenuItemId(2)).map(|item| item.name.as_str());

        assert_eq!(item, Some("Ribeye Steak"));
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn insert_replaces_item_with_same_id() {
        let mut menu = test_menu();

        menu.insert(MenuItem::new(1, "Garlic Bread", Price::new(700)).in_category("Starters"));

        assert_eq!(menu.len(), 3);
        assert_eq!(menu.get(MenuItemId(1)).map(|item| item.price), Some(Price::new(700)));
        assert_eq!(menu.iter().next().map(|item| item.id), Some(MenuItemId(1)));
    }

    #[test]
    fn by_category_filters_items() {
        let menu = test_menu();

        let starters: Vec<u64> = menu.by_category("Starters").map(|item| item.id.0).collect();

        assert_eq!(starters, vec![1, 3]);
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(test_menu().categories(), vec!["Starters", "Main Course"]);
    }

    #[test]
    fn select_returns_available_item() -> TestResult {
        let menu = test_menu();

        assert_eq!(menu.select(MenuItemId(3))?.name, "Bruschetta");

        Ok(())
    }

    #[test]
    fn select_rejects_unknown_and_unavailable_items() {
        let mut menu = test_menu();
        let mut sold_out = MenuItem::new(4, "Tiramisu", Price::new(900));
        sold_out.available = false;
        menu.insert(sold_out);

        assert_eq!(menu.select(MenuItemId(99)), Err(MenuError::NotFound(MenuItemId(99))));
        assert_eq!(menu.select(MenuItemId(4)), Err(MenuError::Unavailable(MenuItemId(4))));
    }

    #[test]
    fn customizations_summary() {
        let customizations = Customizations {
            removed_ingredients: vec!["Onions".to_string(), "Garlic".to_string()],
            cooking_preference: Some("Medium".to_string()),
            special_instructions: Some("extra crispy".to_string()),
        };

        assert_eq!(customizations.summary(), "Medium; no Onions, Garlic; \"extra crispy\"");
        assert!(!customizations.is_empty());
        assert!(Customizations::default().is_empty());
    }
}

//! Order Fixtures
//!
//! A scripted table session: which menu to order from and the actions taken on the order
//! sheet, in order.

use serde::Deserialize;

use crate::{
    cart::CartAction,
    fixtures::FixtureError,
    menu::{Customizations, Menu, MenuItemId},
};

/// Order file in YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Name of the menu fixture to order from
    pub menu: String,

    /// How many diners share the bill
    #[serde(default)]
    pub diners: Option<usize>,

    /// Actions applied to the cart
    #[serde(with = "serde_norway::with::singleton_map_recursive")]
    pub steps: Vec<StepFixture>,
}

/// A single order sheet action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepFixture {
    /// `add: 3` or `add: { id: 3, customizations: {...} }`
    Add(AddStepFixture),

    /// `remove: 3`
    Remove(u64),

    /// `update: { id: 3, quantity: 2 }`
    Update {
        /// Menu item id
        id: u64,
        /// New quantity
        quantity: i64,
    },

    /// `adjust: { id: 3, delta: -1 }`
    Adjust {
        /// Menu item id
        id: u64,
        /// Signed change in quantity
        delta: i64,
    },

    /// `clear`
    Clear,
}

/// Item reference for an `add` step.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AddStepFixture {
    /// Plain item id
    Id(u64),

    /// Item id with customizations
    Customized {
        /// Menu item id
        id: u64,
        /// Diner choices
        #[serde(default)]
        customizations: Customizations,
    },
}

impl StepFixture {
    /// Resolve the step against `menu`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Menu`] if an `add` step names an item that is missing or
    /// unavailable. Other steps never fail; unknown ids are left for the cart to ignore.
    pub fn resolve(self, menu: &Menu) -> Result<CartAction, FixtureError> {
        let action = match self {
            StepFixture::Add(add) => {
                let (id, customizations) = match add {
                    AddStepFixture::Id(id) => (id, Customizations::default()),
                    AddStepFixture::Customized { id, customizations } => (id, customizations),
                };

                CartAction::AddItem {
                    item: menu.select(MenuItemId(id))?.clone(),
                    customizations,
                }
            }
            StepFixture::Remove(id) => CartAction::RemoveItem(MenuItemId(id)),
            StepFixture::Update { id, quantity } => CartAction::UpdateQuantity {
                id: MenuItemId(id),
                quantity,
            },
            StepFixture::Adjust { id, delta } => CartAction::AdjustQuantity {
                id: MenuItemId(id),
                delta,
            },
            StepFixture::Clear => CartAction::ClearOrder,
        };

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        menu::{MenuError, MenuItem},
        prices::Price,
    };

    use super::*;

    fn test_menu() -> Menu {
        let mut menu = Menu::new(USD);
        let mut sold_out = MenuItem::new(2, "Soufflé", Price::new(1100));
        sold_out.available = false;

        menu.insert(MenuItem::new(1, "Margherita", Price::new(1400)));
        menu.insert(sold_out);

        menu
    }

    #[test]
    fn parses_every_step_kind() -> TestResult {
        let yaml = r"
menu: la-piazza
diners: 2
steps:
  - add: 1
  - add:
      id: 1
      customizations:
        removed_ingredients: [Basil]
  - update: { id: 1, quantity: 3 }
  - adjust: { id: 1, delta: -1 }
  - remove: 1
  - clear
";

        let fixture: OrderFixture = serde_norway::from_str(yaml)?;

        assert_eq!(fixture.menu, "la-piazza");
        assert_eq!(fixture.diners, Some(2));
        assert_eq!(fixture.steps.len(), 6);
        assert!(matches!(
            fixture.steps.first(),
            Some(StepFixture::Add(AddStepFixture::Id(1)))
        ));
        assert!(matches!(
            fixture.steps.get(1),
            Some(StepFixture::Add(AddStepFixture::Customized { id: 1, .. }))
        ));
        assert!(matches!(fixture.steps.last(), Some(StepFixture::Clear)));

        Ok(())
    }

    #[test]
    fn steps_read_as_single_key_maps() -> TestResult {
        let fixture: OrderFixture = serde_norway::from_str(
            "menu: la-piazza\nsteps:\n  - add: 1\n  - remove: 1\n  - clear\n",
        )?;

        let actions = fixture
            .steps
            .into_iter()
            .map(|step| step.resolve(&test_menu()))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(actions.len(), 3);
        assert_eq!(actions.get(1), Some(&CartAction::RemoveItem(MenuItemId(1))));
        assert_eq!(actions.last(), Some(&CartAction::ClearOrder));

        Ok(())
    }

    #[test]
    fn resolve_add_copies_menu_item() -> TestResult {
        let menu = test_menu();

        let action = StepFixture::Add(AddStepFixture::Id(1)).resolve(&menu)?;

        assert!(matches!(
            action,
            CartAction::AddItem { ref item, .. } if item.name == "Margherita"
        ));

        Ok(())
    }

    #[test]
    fn resolve_add_rejects_unavailable_item() {
        let menu = test_menu();

        let result = StepFixture::Add(AddStepFixture::Id(2)).resolve(&menu);

        assert!(matches!(
            result,
            Err(FixtureError::Menu(MenuError::Unavailable(MenuItemId(2))))
        ));
    }

    #[test]
    fn resolve_remove_of_unknown_item_passes_through() -> TestResult {
        let action = StepFixture::Remove(99).resolve(&test_menu())?;

        assert_eq!(action, CartAction::RemoveItem(MenuItemId(99)));

        Ok(())
    }
}

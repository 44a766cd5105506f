//! Fixtures
//!
//! Menus live in `<base>/menus/<name>.yml`, scripted orders in `<base>/orders/<name>.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartAction},
    checkout::{CheckoutError, PartySize},
    fixtures::{menus::MenuFixture, orders::OrderFixture},
    menu::{Menu, MenuError},
};

pub mod menus;
pub mod orders;

pub use menus::{parse_currency, parse_percentage, parse_price};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the menu and one of its items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The same item id appears twice in a menu
    #[error("Duplicate menu item id: {0}")]
    DuplicateItem(u64),

    /// Diner count outside the range a bill can be split between
    #[error("Invalid diner count: {0}")]
    Diners(#[from] CheckoutError),

    /// An order step could not be resolved against the menu
    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// A scripted table session, resolved against its menu.
#[derive(Debug, Clone)]
pub struct TableSession {
    menu: Menu,
    actions: Vec<CartAction>,
    diners: PartySize,
}

impl TableSession {
    /// The menu the table ordered from.
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Cart actions, in the order they were taken.
    pub fn actions(&self) -> &[CartAction] {
        &self.actions
    }

    /// Number of diners sharing the bill.
    pub fn diners(&self) -> PartySize {
        self.diners
    }

    /// Apply every action to a fresh cart.
    pub fn replay(&self) -> Cart {
        self.actions
            .iter()
            .cloned()
            .fold(Cart::new(self.menu.currency()), Cart::reduce)
    }
}

/// Fixture loader
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a menu from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is invalid, or if
    /// an item's currency differs from the menu currency.
    pub fn menu(&self, name: &str) -> Result<Menu, FixtureError> {
        let file_path = self.base_path.join("menus").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        let menu = Menu::try_from(fixture)?;

        info!(
            menu = name,
            items = menu.len(),
            currency = menu.currency().iso_alpha_code,
            "loaded menu fixture"
        );

        Ok(menu)
    }

    /// Load a scripted order and the menu it refers to
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be loaded, if the diner count is not between
    /// 1 and 20, or if
    /// an `add` step names an item that is missing from the menu or unavailable.
    pub fn order(&self, name: &str) -> Result<TableSession, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrderFixture = serde_norway::from_str(&contents)?;

        let menu = self.menu(&fixture.menu)?;

        let diners = PartySize::new(fixture.diners.unwrap_or(1))?;

        let actions = fixture
            .steps
            .into_iter()
            .map(|step| step.resolve(&menu))
            .collect::<Result<Vec<_>, _>>()?;

        info!(order = name, steps = actions.len(), "loaded order fixture");

        Ok(TableSession {
            menu,
            actions,
            diners,
        })
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{menu::MenuItemId, prices::Price};

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const CAFE_MENU: &str = r"
restaurant_id: 7
currency: GBP
items:
  - id: 1
    name: Flat White
    price: 3.20 GBP
    category: Drinks
    prep_time: 3
  - id: 2
    name: Almond Croissant
    description: Baked this morning
    price: 2.85 GBP
    category: Bakery
  - id: 3
    name: Eggs Benedict
    price: 9.50 GBP
    category: Brunch
    available: false
";

    #[test]
    fn menu_loads_items_in_order() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "menus", "cafe", CAFE_MENU)?;

        let menu = Fixture::with_base_path(dir.path()).menu("cafe")?;

        assert_eq!(menu.currency(), GBP);
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.categories(), vec!["Drinks", "Bakery", "Brunch"]);

        let croissant = menu.get(MenuItemId(2));
        assert_eq!(croissant.map(|item| item.price), Some(Price::new(285)));
        assert_eq!(croissant.map(|item| item.restaurant_id), Some(7));
        assert_eq!(croissant.map(|item| item.available), Some(true));

        assert_eq!(menu.get(MenuItemId(1)).map(|item| item.prep_time), Some(3));
        assert_eq!(menu.get(MenuItemId(3)).map(|item| item.available), Some(false));

        Ok(())
    }

    #[test]
    fn menu_rejects_duplicate_ids() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(
            dir.path(),
            "menus",
            "dupes",
            r"
currency: USD
items:
  - { id: 1, name: Tea, price: 2.00 USD, category: Drinks }
  - { id: 1, name: Coffee, price: 2.50 USD, category: Drinks }
",
        )?;

        let result = Fixture::with_base_path(dir.path()).menu("dupes");

        assert!(matches!(result, Err(FixtureError::DuplicateItem(1))));

        Ok(())
    }

    #[test]
    fn missing_menu_file_is_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = Fixture::with_base_path(dir.path()).menu("nope");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn malformed_menu_is_yaml_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "menus", "broken", "items: [")?;

        let result = Fixture::with_base_path(dir.path()).menu("broken");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }

    #[test]
    fn order_replays_into_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "menus", "cafe", CAFE_MENU)?;
        write_fixture(
            dir.path(),
            "orders",
            "breakfast",
            r"
menu: cafe
diners: 2
steps:
  - add: 1
  - add: 1
  - add: 2
  - adjust: { id: 2, delta: 1 }
",
        )?;

        let session = Fixture::with_base_path(dir.path()).order("breakfast")?;
        let cart = session.replay();

        assert_eq!(session.actions().len(), 4);
        assert_eq!(session.diners().get(), 2);
        assert_eq!(cart.subtotal(), Price::new(2 * 320 + 2 * 285));
        assert_eq!(cart.item_count(), 4);

        Ok(())
    }

    #[test]
    fn order_with_unavailable_item_errors() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "menus", "cafe", CAFE_MENU)?;
        write_fixture(
            dir.path(),
            "orders",
            "brunch",
            "menu: cafe\nsteps:\n  - add: 3\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).order("brunch");

        assert!(matches!(
            result,
            Err(FixtureError::Menu(MenuError::Unavailable(MenuItemId(3))))
        ));

        Ok(())
    }

    #[test]
    fn order_with_zero_diners_errors() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "menus", "cafe", CAFE_MENU)?;
        write_fixture(
            dir.path(),
            "orders",
            "nobody",
            "menu: cafe\ndiners: 0\nsteps: []\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).order("nobody");

        assert!(matches!(
            result,
            Err(FixtureError::Diners(CheckoutError::PartySize(0)))
        ));

        Ok(())
    }

    #[test]
    fn order_with_too_many_diners_errors() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "menus", "cafe", CAFE_MENU)?;
        write_fixture(
            dir.path(),
            "orders",
            "banquet",
            "menu: cafe\ndiners: 21\nsteps: []\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).order("banquet");

        assert!(matches!(
            result,
            Err(FixtureError::Diners(CheckoutError::PartySize(21)))
        ));

        Ok(())
    }
}

//! Fixtures
//!
//! Loads menu definitions from YAML files in the `fixtures/menus/` directory
//! into a [`Catalog`], keeping string-label lookups for tests and demos.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::CartLedger,
    catalog::{
        AddonOption, Catalog, CatalogError, Category, CategoryKey, MenuItem, MenuItemKey,
        SizeOption,
    },
    fixtures::menu::{MenuFixture, MenuItemFixture},
};

pub mod menu;

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

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Item referenced a category label that is not in the menu
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Menu item not found
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Size not found on the named item
    #[error("Size not found: {0}")]
    SizeNotFound(String),

    /// Add-on not found on the named item
    #[error("Add-on not found: {0}")]
    AddonNotFound(String),

    /// Menu defines no items
    #[error("Menu {0} defines no items")]
    EmptyMenu(String),

    /// No items loaded yet; currency unknown
    #[error("No items loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog rejected an item
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded menus
    catalog: Catalog<'a>,

    /// String label -> key mappings for lookups
    category_keys: FxHashMap<String, CategoryKey>,
    item_keys: FxHashMap<String, MenuItemKey>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            category_keys: FxHashMap::default(),
            item_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load a menu from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an item's
    /// prices are malformed, or if the catalog rejects an item.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("menus").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        if fixture.items.is_empty() {
            return Err(FixtureError::EmptyMenu(name.to_string()));
        }

        for (label, category_fixture) in fixture.categories {
            let key = self.catalog.add_category(Category {
                name: category_fixture.name,
                description: category_fixture.description,
            });

            self.category_keys.insert(label, key);
        }

        for (label, item_fixture) in fixture.items {
            let category = self
                .category_keys
                .get(&item_fixture.category)
                .copied()
                .ok_or_else(|| FixtureError::UnknownCategory(item_fixture.category.clone()))?;

            let item = build_item(&item_fixture, category)?;

            if self.currency.is_none() {
                let (_minor, currency) = parse_price(&item_fixture.price)?;
                self.currency = Some(currency);
            }

            let key = self.catalog.add_item(item)?;

            self.item_keys.insert(label, key);
        }

        Ok(self)
    }

    /// Load a complete fixture from a single menu file
    ///
    /// # Errors
    ///
    /// Returns an error if the menu file cannot be loaded.
    pub fn from_menu(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_menu(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Get the loaded catalog, mutably
    pub fn catalog_mut(&mut self) -> &mut Catalog<'a> {
        &mut self.catalog
    }

    /// Get a menu item key by its string label
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn item_key(&self, label: &str) -> Result<MenuItemKey, FixtureError> {
        self.item_keys
            .get(label)
            .copied()
            .ok_or_else(|| FixtureError::ItemNotFound(label.to_string()))
    }

    /// Get a menu item by its string label
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn item(&self, label: &str) -> Result<&MenuItem<'a>, FixtureError> {
        self.catalog
            .item(self.item_key(label)?)
            .ok_or_else(|| FixtureError::ItemNotFound(label.to_string()))
    }

    /// Get a category key by its string label
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found.
    pub fn category_key(&self, label: &str) -> Result<CategoryKey, FixtureError> {
        self.category_keys
            .get(label)
            .copied()
            .ok_or_else(|| FixtureError::UnknownCategory(label.to_string()))
    }

    /// Get a size option from a labelled item by size name
    ///
    /// # Errors
    ///
    /// Returns an error if the item or the size is not found.
    pub fn size(&self, item: &str, name: &str) -> Result<SizeOption<'a>, FixtureError> {
        self.item(item)?
            .size(name)
            .cloned()
            .ok_or_else(|| FixtureError::SizeNotFound(name.to_string()))
    }

    /// Get an add-on option from a labelled item by add-on name
    ///
    /// # Errors
    ///
    /// Returns an error if the item or the add-on is not found.
    pub fn addon(&self, item: &str, name: &str) -> Result<AddonOption<'a>, FixtureError> {
        self.item(item)?
            .addon(name)
            .cloned()
            .ok_or_else(|| FixtureError::AddonNotFound(name.to_string()))
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no items have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Create an empty cart ledger in the fixture's currency
    ///
    /// # Errors
    ///
    /// Returns an error if no items have been loaded yet.
    pub fn ledger(&self) -> Result<CartLedger<'a>, FixtureError> {
        Ok(CartLedger::new(self.currency()?))
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a catalog item from its fixture definition.
fn build_item<'a>(
    fixture: &MenuItemFixture,
    category: CategoryKey,
) -> Result<MenuItem<'a>, FixtureError> {
    let (minor, currency) = parse_price(&fixture.price)?;

    if minor < 0 {
        return Err(FixtureError::InvalidPrice(fixture.price.clone()));
    }

    let sizes = fixture
        .sizes
        .iter()
        .map(|size| {
            let (minor, currency) = parse_price(&size.modifier)?;

            Ok(SizeOption::new(
                size.name.clone(),
                Money::from_minor(minor, currency),
            ))
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;

    let addons = fixture
        .addons
        .iter()
        .map(|addon| {
            let (minor, currency) = parse_price(&addon.price)?;

            if minor < 0 {
                return Err(FixtureError::InvalidPrice(addon.price.clone()));
            }

            Ok(AddonOption::new(
                addon.name.clone(),
                Money::from_minor(minor, currency),
            ))
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;

    Ok(MenuItem {
        name: fixture.name.clone(),
        description: fixture.description.clone(),
        price: Money::from_minor(minor, currency),
        category,
        available: fixture.available,
        emoji: fixture.emoji.clone(),
        sizes,
        addons,
    })
}

/// Parse a price string like `"9.99 USD"` or `"-0.40 USD"` into minor units
/// and a currency.
///
/// The fractional part may use fewer digits than the currency's exponent but
/// never more.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] for malformed amounts and
/// [`FixtureError::UnknownCurrency`] for unrecognised currency codes.
pub fn parse_price(value: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let invalid = || FixtureError::InvalidPrice(value.to_string());

    let mut parts = value.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let currency =
        Currency::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    let (negative, digits) = match amount.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, amount),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty()
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let frac_digits = u32::try_from(frac.len()).map_err(|_err| invalid())?;

    if frac_digits > currency.exponent {
        return Err(invalid());
    }

    let scale = 10i64.checked_pow(currency.exponent).ok_or_else(invalid)?;

    let whole_minor = whole
        .parse::<i64>()
        .map_err(|_err| invalid())?
        .checked_mul(scale)
        .ok_or_else(invalid)?;

    let frac_minor = if frac.is_empty() {
        0
    } else {
        let pad = 10i64
            .checked_pow(currency.exponent - frac_digits)
            .ok_or_else(invalid)?;

        frac.parse::<i64>()
            .map_err(|_err| invalid())?
            .checked_mul(pad)
            .ok_or_else(invalid)?
    };

    let minor = whole_minor.checked_add(frac_minor).ok_or_else(invalid)?;

    Ok((if negative { -minor } else { minor }, currency))
}

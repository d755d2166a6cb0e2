//! Catalog
//!
//! The read-only source of menu items, sizes and add-ons consulted when
//! pricing a cart line, plus the administration operations that maintain it.

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Category Key
    pub struct CategoryKey;

    /// Menu Item Key
    pub struct MenuItemKey;
}

/// Errors related to catalog maintenance.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A price's currency differs from the catalog currency (item name, price currency, catalog currency).
    #[error("Item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// An item referenced a category that is not in the catalog.
    #[error("Unknown category")]
    UnknownCategory(CategoryKey),

    /// A menu item was not found in the catalog.
    #[error("Menu item not found")]
    ItemNotFound(MenuItemKey),
}

/// Menu Category
#[derive(Debug, Clone)]
pub struct Category {
    /// Category name
    pub name: String,

    /// Category description
    pub description: Option<String>,
}

/// A size a menu item can be ordered in, with its price modifier.
///
/// The modifier is added to the item's base price and may be negative.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeOption<'a> {
    name: String,
    modifier: Money<'a, Currency>,
}

impl<'a> SizeOption<'a> {
    /// Creates a new size option with the given price modifier.
    #[must_use]
    pub fn new(name: impl Into<String>, modifier: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            modifier,
        }
    }

    /// Returns the name of the size.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price modifier applied when this size is selected.
    pub fn modifier(&self) -> &Money<'a, Currency> {
        &self.modifier
    }
}

/// An add-on a menu item can be ordered with, priced on top of the base price.
#[derive(Clone, Debug, PartialEq)]
pub struct AddonOption<'a> {
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> AddonOption<'a> {
    /// Creates a new add-on option.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Returns the name of the add-on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of the add-on.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

/// Menu Item
#[derive(Debug, Clone)]
pub struct MenuItem<'a> {
    /// Item name
    pub name: String,

    /// Item description
    pub description: Option<String>,

    /// Base price before any size or add-on selection
    pub price: Money<'a, Currency>,

    /// Category the item is listed under
    pub category: CategoryKey,

    /// Whether the item can currently be ordered
    pub available: bool,

    /// Emoji shown when the item has no image
    pub emoji: Option<String>,

    /// Sizes the item can be ordered in
    pub sizes: Vec<SizeOption<'a>>,

    /// Add-ons the item can be ordered with
    pub addons: Vec<AddonOption<'a>>,
}

impl<'a> MenuItem<'a> {
    /// Look up one of the item's sizes by name.
    pub fn size(&self, name: &str) -> Option<&SizeOption<'a>> {
        self.sizes.iter().find(|size| size.name() == name)
    }

    /// Look up one of the item's add-ons by name.
    pub fn addon(&self, name: &str) -> Option<&AddonOption<'a>> {
        self.addons.iter().find(|addon| addon.name() == name)
    }
}

/// Catalog
///
/// Owns the menu for one venue: categories, items and a single catalog
/// currency that every price must share.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    categories: SlotMap<CategoryKey, Category>,
    items: SlotMap<MenuItemKey, MenuItem<'a>>,
    currency: Option<&'a Currency>,
}

impl<'a> Catalog<'a> {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category to the catalog.
    pub fn add_category(&mut self, category: Category) -> CategoryKey {
        self.categories.insert(category)
    }

    /// Get a category by its key.
    pub fn category(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.get(key)
    }

    /// Iterate over the categories in the catalog.
    pub fn categories(&self) -> impl Iterator<Item = (CategoryKey, &Category)> {
        self.categories.iter()
    }

    /// Add a menu item to the catalog.
    ///
    /// The first priced item fixes the catalog currency; every later price
    /// (base, size modifiers, add-ons) must match it.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::UnknownCategory`] if the item references a
    /// category that is not in the catalog, or a
    /// [`CatalogError::CurrencyMismatch`] if any of its prices differ from the
    /// catalog currency.
    pub fn add_item(&mut self, item: MenuItem<'a>) -> Result<MenuItemKey, CatalogError> {
        self.check_item(&item)?;

        Ok(self.items.insert(item))
    }

    /// Get a menu item by its key.
    pub fn item(&self, key: MenuItemKey) -> Option<&MenuItem<'a>> {
        self.items.get(key)
    }

    /// Iterate over the menu items in the catalog.
    pub fn items(&self) -> impl Iterator<Item = (MenuItemKey, &MenuItem<'a>)> {
        self.items.iter()
    }

    /// Iterate over the menu items listed under a category.
    pub fn items_in_category(
        &self,
        category: CategoryKey,
    ) -> impl Iterator<Item = (MenuItemKey, &MenuItem<'a>)> {
        self.items
            .iter()
            .filter(move |(_, item)| item.category == category)
    }

    /// Replace a stored menu item wholesale.
    ///
    /// Cart lines priced from the previous revision keep their unit price;
    /// catalog updates never reprice existing lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::ItemNotFound`] if the key is not in the
    /// catalog, plus the same category and currency errors as
    /// [`Catalog::add_item`].
    pub fn update_item(&mut self, key: MenuItemKey, item: MenuItem<'a>) -> Result<(), CatalogError> {
        if !self.items.contains_key(key) {
            return Err(CatalogError::ItemNotFound(key));
        }

        self.check_item(&item)?;

        if let Some(slot) = self.items.get_mut(key) {
            *slot = item;
        }

        Ok(())
    }

    /// Flag a menu item as orderable or not.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::ItemNotFound`] if the key is not in the catalog.
    pub fn set_availability(
        &mut self,
        key: MenuItemKey,
        available: bool,
    ) -> Result<(), CatalogError> {
        let item = self
            .items
            .get_mut(key)
            .ok_or(CatalogError::ItemNotFound(key))?;

        item.available = available;

        Ok(())
    }

    /// Remove a menu item from the catalog, returning it if it was present.
    pub fn remove_item(&mut self, key: MenuItemKey) -> Option<MenuItem<'a>> {
        self.items.remove(key)
    }

    /// Get the number of menu items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no menu items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the catalog currency, if any item has been added yet.
    #[must_use]
    pub fn currency(&self) -> Option<&'a Currency> {
        self.currency
    }

    /// Validate an item's category and prices, fixing the catalog currency
    /// from the first priced item.
    fn check_item(&mut self, item: &MenuItem<'a>) -> Result<(), CatalogError> {
        if !self.categories.contains_key(item.category) {
            return Err(CatalogError::UnknownCategory(item.category));
        }

        let currency = match self.currency {
            Some(currency) => currency,
            None => {
                let currency = item.price.currency();
                self.currency = Some(currency);
                currency
            }
        };

        let prices = std::iter::once(&item.price)
            .chain(item.sizes.iter().map(SizeOption::modifier))
            .chain(item.addons.iter().map(AddonOption::price));

        for price in prices {
            if price.currency() != currency {
                return Err(CatalogError::CurrencyMismatch(
                    item.name.clone(),
                    price.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        }

        Ok(())
    }
}

//! Cart Ledger
//!
//! The working set of order lines a customer is building, keyed by item,
//! selected size and selected add-ons. The ledger is owned by a single
//! session context and mutated synchronously; there is no sharing contract.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::{AddonOption, Catalog, MenuItemKey, SizeOption},
    pricing::{self, PricingError},
};

pub mod line_key;

pub use line_key::LineKey;

/// Errors related to cart mutation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The referenced menu item is not in the catalog snapshot supplied by the caller.
    #[error("Menu item not found")]
    ItemNotFound(MenuItemKey),

    /// The referenced menu item is flagged as unavailable.
    #[error("Menu item {0} is not available")]
    ItemUnavailable(String),

    /// Price composition failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One distinct configuration a customer has added, with its quantity.
///
/// The unit price is composed once when the line is created and never
/// recomputed; later catalog price changes do not touch existing lines.
#[derive(Clone, Debug)]
pub struct CartLine<'a> {
    key: LineKey,
    item: MenuItemKey,
    display_name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    selected_size: Option<SizeOption<'a>>,
    selected_addons: SmallVec<[AddonOption<'a>; 4]>,
    special_instructions: Option<String>,
}

impl<'a> CartLine<'a> {
    /// The derived identity of this line.
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// The menu item this line was created from.
    pub fn item(&self) -> MenuItemKey {
        self.item
    }

    /// The item name captured when the line was created.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The fixed per-unit price for this configuration.
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// How many units of this configuration are in the cart. Always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The selected size, if any.
    pub fn selected_size(&self) -> Option<&SizeOption<'a>> {
        self.selected_size.as_ref()
    }

    /// The selected add-ons, in the order they were supplied.
    pub fn selected_addons(&self) -> &[AddonOption<'a>] {
        &self.selected_addons
    }

    /// Free-text preparation instructions for this line.
    pub fn special_instructions(&self) -> Option<&str> {
        self.special_instructions.as_deref()
    }
}

/// Cart Ledger
///
/// Holds at most one line per [`LineKey`], in insertion order.
#[derive(Debug)]
pub struct CartLedger<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> CartLedger<'a> {
    /// Create a new empty ledger with the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        CartLedger {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a menu item with the given size and add-on selection.
    ///
    /// If a line with the same derived key already exists its quantity is
    /// incremented; otherwise a new line is created with quantity 1 and a
    /// unit price composed from the catalog's current prices. On error the
    /// ledger is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ItemNotFound`]: the key is absent from the supplied catalog.
    /// - [`LedgerError::ItemUnavailable`]: the item is flagged off the menu.
    /// - [`LedgerError::Pricing`]: money arithmetic failed while composing the unit price.
    pub fn add_item(
        &mut self,
        catalog: &Catalog<'a>,
        item_key: MenuItemKey,
        size: Option<SizeOption<'a>>,
        addons: &[AddonOption<'a>],
    ) -> Result<LineKey, LedgerError> {
        let item = catalog
            .item(item_key)
            .ok_or(LedgerError::ItemNotFound(item_key))?;

        if !item.available {
            return Err(LedgerError::ItemUnavailable(item.name.clone()));
        }

        let key = LineKey::new(item_key, size.as_ref(), addons);

        if let Some(line) = self.lines.iter_mut().find(|line| *line.key() == key) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(key);
        }

        let unit_price = pricing::unit_price(item, size.as_ref(), addons)?;

        self.lines.push(CartLine {
            key: key.clone(),
            item: item_key,
            display_name: item.name.clone(),
            unit_price,
            quantity: 1,
            selected_size: size,
            selected_addons: SmallVec::from(addons),
            special_instructions: None,
        });

        Ok(key)
    }

    /// Delete the line with the given key. No-op if absent.
    pub fn remove_line(&mut self, key: &LineKey) {
        self.lines.retain(|line| line.key() != key);
    }

    /// Add `delta` to a line's quantity, removing the line when the result
    /// drops to zero or below. No-op if the key is absent.
    pub fn change_quantity(&mut self, key: &LineKey, delta: i32) {
        let Some(pos) = self.lines.iter().position(|line| line.key() == key) else {
            return;
        };

        let Some(line) = self.lines.get_mut(pos) else {
            return;
        };

        let quantity = i64::from(line.quantity) + i64::from(delta);

        if quantity <= 0 {
            self.lines.remove(pos);
        } else {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Set or clear the free-text instructions on a line. No-op if absent.
    pub fn set_instructions(&mut self, key: &LineKey, instructions: Option<String>) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
            line.special_instructions = instructions;
        }
    }

    /// Empty the ledger unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by its key.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// The lines as a slice, in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the ledger.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Sum of quantities over all lines, for badge display.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Calculate the subtotal of the cart. Zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows or money
    /// arithmetic fails.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        pricing::lines_total(&self.lines)
    }
}

//! Line Keys
//!
//! Derived identity for cart lines. Two additions of the same menu item with
//! the same size and the same set of add-ons (in any order) share a key and
//! collapse into one line.

use smallvec::SmallVec;

use crate::catalog::{AddonOption, MenuItemKey, SizeOption};

/// Identity of one distinct purchasable configuration within a cart.
///
/// The absent-size case is carried structurally as `None`, so it can never
/// collide with a catalog size that happens to be named `"default"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineKey {
    item: MenuItemKey,
    size: Option<String>,
    addons: SmallVec<[String; 4]>,
}

impl LineKey {
    /// Derive the key for a menu item with the given selection.
    ///
    /// Add-on names are sorted so that insertion order does not affect
    /// identity.
    #[must_use]
    pub fn new(
        item: MenuItemKey,
        size: Option<&SizeOption<'_>>,
        addons: &[AddonOption<'_>],
    ) -> Self {
        let mut addon_names: SmallVec<[String; 4]> = addons
            .iter()
            .map(|addon| addon.name().to_string())
            .collect();

        addon_names.sort();

        Self {
            item,
            size: size.map(|size| size.name().to_string()),
            addons: addon_names,
        }
    }

    /// The menu item this key refers to.
    pub fn item(&self) -> MenuItemKey {
        self.item
    }

    /// The selected size name, if a size was selected.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// The selected add-on names, sorted.
    pub fn addons(&self) -> &[String] {
        &self.addons
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};

    use super::*;

    fn addon(name: &str) -> AddonOption<'static> {
        AddonOption::new(name, Money::from_minor(50, USD))
    }

    #[test]
    fn addon_order_does_not_affect_key() {
        let item = MenuItemKey::default();

        let forwards = LineKey::new(item, None, &[addon("bacon"), addon("cheese")]);
        let backwards = LineKey::new(item, None, &[addon("cheese"), addon("bacon")]);

        assert_eq!(forwards, backwards);
    }

    #[test]
    fn different_addon_sets_produce_different_keys() {
        let item = MenuItemKey::default();

        let one = LineKey::new(item, None, &[addon("bacon")]);
        let two = LineKey::new(item, None, &[addon("bacon"), addon("cheese")]);

        assert_ne!(one, two);
    }

    #[test]
    fn absent_size_is_distinct_from_size_named_default() {
        let item = MenuItemKey::default();
        let default_size = SizeOption::new("default", Money::from_minor(0, USD));

        let no_size = LineKey::new(item, None, &[]);
        let named_default = LineKey::new(item, Some(&default_size), &[]);

        assert_ne!(no_size, named_default);
    }

    #[test]
    fn key_exposes_sorted_addons() {
        let item = MenuItemKey::default();
        let key = LineKey::new(item, None, &[addon("syrup"), addon("cream")]);

        assert_eq!(key.addons(), ["cream".to_string(), "syrup".to_string()]);
        assert!(key.size().is_none());
    }
}

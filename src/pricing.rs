//! Pricing
//!
//! Price composition for cart lines: base price plus size modifier plus
//! add-on prices, fixed at the moment a line is created.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::CartLine,
    catalog::{AddonOption, MenuItem, SizeOption},
};

/// Errors that can occur while composing or totalling prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoLines,

    /// A line total or cart total exceeded the representable amount.
    #[error("amount overflowed while totalling")]
    AmountOverflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Composes the unit price for one configuration of a menu item.
///
/// The composition is linear and order-independent: base price, plus the
/// selected size's modifier (if any), plus the price of every selected
/// add-on.
///
/// # Errors
///
/// Returns a [`PricingError::Money`] if money arithmetic fails, for example
/// due to a currency mismatch between the base price and a modifier.
pub fn unit_price<'a>(
    item: &MenuItem<'a>,
    size: Option<&SizeOption<'a>>,
    addons: &[AddonOption<'a>],
) -> Result<Money<'a, Currency>, PricingError> {
    let mut price = item.price;

    if let Some(size) = size {
        price = price.add(*size.modifier())?;
    }

    for addon in addons {
        price = price.add(*addon.price())?;
    }

    Ok(price)
}

/// Calculates the total for a cart line: unit price times quantity.
///
/// # Errors
///
/// Returns a [`PricingError::AmountOverflow`] if the multiplication exceeds
/// the representable minor-unit amount.
pub fn line_total<'a>(line: &CartLine<'a>) -> Result<Money<'a, Currency>, PricingError> {
    let unit = line.unit_price();

    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(Money::from_minor(minor, unit.currency()))
}

/// Calculates the total price of a list of cart lines.
///
/// # Errors
///
/// - [`PricingError::NoLines`]: No lines were provided, so currency could not be determined.
/// - [`PricingError::AmountOverflow`]: A line total exceeded the representable amount.
/// - [`PricingError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn lines_total<'a>(lines: &[CartLine<'a>]) -> Result<Money<'a, Currency>, PricingError> {
    let first = lines.first().ok_or(PricingError::NoLines)?;

    lines.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, line| Ok(acc.add(line_total(line)?)?),
    )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        cart::CartLedger,
        catalog::{Catalog, Category, MenuItemKey},
    };

    use super::*;

    fn catalog_with_coffee<'a>() -> TestResult<(Catalog<'a>, MenuItemKey)> {
        let mut catalog = Catalog::new();

        let category = catalog.add_category(Category {
            name: "Beverages".to_string(),
            description: None,
        });

        let key = catalog.add_item(MenuItem {
            name: "Coffee".to_string(),
            description: None,
            price: Money::from_minor(2_50, USD),
            category,
            available: true,
            emoji: None,
            sizes: Vec::new(),
            addons: Vec::new(),
        })?;

        Ok((catalog, key))
    }

    #[test]
    fn unit_price_is_base_price_without_selection() -> TestResult {
        let (catalog, key) = catalog_with_coffee()?;
        let item = catalog.item(key).ok_or("item missing")?;

        let price = unit_price(item, None, &[])?;

        assert_eq!(price, Money::from_minor(2_50, USD));

        Ok(())
    }

    #[test]
    fn unit_price_adds_size_modifier_and_addons() -> TestResult {
        let (catalog, key) = catalog_with_coffee()?;
        let item = catalog.item(key).ok_or("item missing")?;

        let size = SizeOption::new("Large", Money::from_minor(75, USD));

        let addons = [
            AddonOption::new("Extra shot", Money::from_minor(80, USD)),
            AddonOption::new("Syrup", Money::from_minor(50, USD)),
        ];

        let price = unit_price(item, Some(&size), &addons)?;

        assert_eq!(price, Money::from_minor(4_55, USD));

        Ok(())
    }

    #[test]
    fn unit_price_negative_modifier_reduces_price() -> TestResult {
        let (catalog, key) = catalog_with_coffee()?;
        let item = catalog.item(key).ok_or("item missing")?;

        let size = SizeOption::new("Small", Money::from_minor(-50, USD));

        let price = unit_price(item, Some(&size), &[])?;

        assert_eq!(price, Money::from_minor(2_00, USD));

        Ok(())
    }

    #[test]
    fn lines_total_empty_returns_no_lines() {
        let lines: [CartLine<'static>; 0] = [];

        assert!(matches!(lines_total(&lines), Err(PricingError::NoLines)));
    }

    #[test]
    fn line_total_multiplies_by_quantity() -> TestResult {
        let (catalog, key) = catalog_with_coffee()?;

        let mut ledger = CartLedger::new(USD);
        let line_key = ledger.add_item(&catalog, key, None, &[])?;
        ledger.change_quantity(&line_key, 2);

        let line = ledger.line(&line_key).ok_or("line missing")?;

        assert_eq!(line_total(line)?, Money::from_minor(7_50, USD));

        Ok(())
    }
}

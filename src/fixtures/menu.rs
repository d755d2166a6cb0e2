//! Menu Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Top-level menu fixture from YAML.
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Category definitions keyed by label
    pub categories: FxHashMap<String, CategoryFixture>,

    /// Menu item definitions keyed by label
    pub items: FxHashMap<String, MenuItemFixture>,
}

/// A category in the menu fixture.
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category name
    pub name: String,

    /// Category description
    #[serde(default)]
    pub description: Option<String>,
}

/// A menu item in the menu fixture.
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name
    pub name: String,

    /// Item description
    #[serde(default)]
    pub description: Option<String>,

    /// Base price, e.g. `"9.99 USD"`
    pub price: String,

    /// Label of the category the item is listed under
    pub category: String,

    /// Whether the item can currently be ordered
    #[serde(default = "default_available")]
    pub available: bool,

    /// Emoji shown when the item has no image
    #[serde(default)]
    pub emoji: Option<String>,

    /// Sizes the item can be ordered in
    #[serde(default)]
    pub sizes: Vec<SizeFixture>,

    /// Add-ons the item can be ordered with
    #[serde(default)]
    pub addons: Vec<AddonFixture>,
}

/// A size option in the menu fixture.
#[derive(Debug, Deserialize)]
pub struct SizeFixture {
    /// Size name
    pub name: String,

    /// Price modifier, e.g. `"-0.40 USD"`; may be negative
    pub modifier: String,
}

/// An add-on option in the menu fixture.
#[derive(Debug, Deserialize)]
pub struct AddonFixture {
    /// Add-on name
    pub name: String,

    /// Add-on price, e.g. `"0.60 USD"`; must not be negative
    pub price: String,
}

fn default_available() -> bool {
    true
}

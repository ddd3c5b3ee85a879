//! Catalog
//!
//! Read-only menu items offered for purchase. Items are loaded once (see
//! [`fixtures`]) and never mutated; the cart copies the display fields it
//! needs when an item is added.

use std::{borrow::Borrow, fmt};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::pricing::{Price, PricingError};

pub mod fixtures;

/// Errors related to catalog construction and loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Item ids must contain at least one non-whitespace character.
    #[error("Item id must not be empty")]
    EmptyId,

    /// Two items share the same id.
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    /// An item's currency differs from the catalog currency (item id, item currency, catalog currency).
    #[error("Item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency in a catalog entry
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Unique, non-empty identifier of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyId`] if the id is empty or only whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }

        Ok(Self(id))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ItemId {
    type Error = CatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An orderable menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Item id
    pub id: ItemId,

    /// Item name
    pub name: String,

    /// Short description shown under the name
    pub description: String,

    /// Unit price
    pub price: Price,

    /// Image reference (URL or asset path)
    pub image_ref: String,

    /// Name of the restaurant serving the item
    pub restaurant: String,

    /// Menu category
    pub category: String,
}

/// Catalog of items in a single currency, kept in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: FxHashMap<ItemId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            items: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog with the given items.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on duplicate ids or a currency mismatch.
    pub fn with_items(
        items: impl IntoIterator<Item = CatalogItem>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(currency);

        items
            .into_iter()
            .try_for_each(|item| catalog.insert(item))?;

        Ok(catalog)
    }

    /// Append an item to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the id is already present or the item is
    /// priced in another currency.
    pub fn insert(&mut self, item: CatalogItem) -> Result<(), CatalogError> {
        let item_currency = item.price.currency();

        if item_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                item.id.to_string(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.index.contains_key(&item.id) {
            return Err(CatalogError::DuplicateId(item.id.to_string()));
        }

        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);

        Ok(())
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).and_then(|&idx| self.items.get(idx))
    }

    /// Iterate over items in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every item is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl<'c> IntoIterator for &'c Catalog {
    type Item = &'c CatalogItem;
    type IntoIter = std::slice::Iter<'c, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, INR},
    };
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, name: &str, minor: i64) -> TestResult<CatalogItem> {
        Ok(CatalogItem {
            id: ItemId::new(id)?,
            name: name.to_string(),
            description: String::new(),
            price: Money::from_minor(minor, INR),
            image_ref: String::new(),
            restaurant: "Spice Garden".to_string(),
            category: "Indian".to_string(),
        })
    }

    #[test]
    fn item_id_rejects_empty() {
        assert!(matches!(ItemId::new(""), Err(CatalogError::EmptyId)));
        assert!(matches!(ItemId::new("  "), Err(CatalogError::EmptyId)));
    }

    #[test]
    fn item_id_displays_inner_value() -> TestResult {
        let id = ItemId::try_from("m1")?;

        assert_eq!(id.to_string(), "m1");
        assert_eq!(id.as_str(), "m1");

        Ok(())
    }

    #[test]
    fn with_items_keeps_load_order() -> TestResult {
        let catalog = Catalog::with_items(
            [item("b", "Biryani", 1499)?, item("a", "Aloo Gobi", 899)?],
            INR,
        )?;

        let ids: Vec<&str> = catalog.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, ["b", "a"]);
        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn get_by_id() -> TestResult {
        let catalog = Catalog::with_items([item("m3", "Chicken Biryani", 1499)?], INR)?;

        assert_eq!(
            catalog.get("m3").map(|item| item.name.as_str()),
            Some("Chicken Biryani")
        );
        assert!(catalog.get("missing").is_none());

        Ok(())
    }

    #[test]
    fn duplicate_ids_error() -> TestResult {
        let result = Catalog::with_items([item("m1", "One", 100)?, item("m1", "Two", 200)?], INR);

        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "m1"));

        Ok(())
    }

    #[test]
    fn currency_mismatch_errors() -> TestResult {
        let mut pounds = item("m1", "Fish and Chips", 850)?;
        pounds.price = Money::from_minor(850, GBP);

        let result = Catalog::with_items([pounds], INR);

        match result {
            Err(CatalogError::CurrencyMismatch(id, item_currency, catalog_currency)) => {
                assert_eq!(id, "m1");
                assert_eq!(item_currency, GBP.iso_alpha_code);
                assert_eq!(catalog_currency, INR.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }

        Ok(())
    }
}

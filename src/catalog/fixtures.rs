//! Catalog Fixtures
//!
//! YAML menu definitions. The popular-items menu ships embedded in the
//! crate; other menus can be read from disk with [`FixtureCatalog`].

use std::{fs, path::PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError, CatalogItem, ItemId},
    loading::DataSource,
    pricing::{currency_for_code, parse_price},
};

const POPULAR_ITEMS_YAML: &str = include_str!("../../fixtures/menu/popular.yml");

/// Menu file contents
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO code of the menu currency (e.g., "INR")
    pub currency: String,

    /// Menu items in display order
    #[serde(default)]
    pub items: Vec<CatalogItemFixture>,
}

/// Menu item as written in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Item id
    pub id: String,

    /// Item name
    pub name: String,

    /// Item description
    #[serde(default)]
    pub description: String,

    /// Item price (e.g., "9.99 INR")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Restaurant name
    pub restaurant: String,

    /// Menu category
    #[serde(default)]
    pub category: String,
}

impl TryFrom<CatalogItemFixture> for CatalogItem {
    type Error = CatalogError;

    fn try_from(fixture: CatalogItemFixture) -> Result<Self, Self::Error> {
        Ok(CatalogItem {
            id: ItemId::new(fixture.id)?,
            name: fixture.name,
            description: fixture.description,
            price: parse_price(&fixture.price)?,
            image_ref: fixture.image,
            restaurant: fixture.restaurant,
            category: fixture.category,
        })
    }
}

/// Parse a YAML menu into a [`Catalog`].
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price or currency is invalid,
/// or an item breaks a catalog invariant (duplicate id, mixed currencies).
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
    let currency = currency_for_code(&fixture.currency)?;

    let items = fixture
        .items
        .into_iter()
        .map(CatalogItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Catalog::with_items(items, currency)
}

/// Menu read from a YAML file on disk.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    path: PathBuf,
}

impl FixtureCatalog {
    /// Create a source reading the menu at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FixtureCatalog {
    type Output = Catalog;
    type Error = CatalogError;

    fn load(&self) -> Result<Catalog, CatalogError> {
        let contents = fs::read_to_string(&self.path)?;
        let catalog = parse_catalog(&contents)?;

        info!(path = %self.path.display(), items = catalog.len(), "loaded menu");

        Ok(catalog)
    }
}

/// The popular-items menu compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl DataSource for EmbeddedCatalog {
    type Output = Catalog;
    type Error = CatalogError;

    fn load(&self) -> Result<Catalog, CatalogError> {
        parse_catalog(POPULAR_ITEMS_YAML)
    }
}

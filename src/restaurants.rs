//! Restaurants

use serde::Deserialize;

use crate::{catalog::CatalogError, loading::DataSource};

const NEARBY_RESTAURANTS_YAML: &str = include_str!("../fixtures/restaurants/nearby.yml");

/// A restaurant that delivers to the current location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Restaurant {
    /// Restaurant id
    pub id: String,

    /// Display name
    pub name: String,

    /// Cuisines served, e.g. `["Indian", "Curry"]`
    #[serde(rename = "cuisine")]
    pub cuisine_types: Vec<String>,

    /// Price band, from "$" to "$$$"
    pub price_range: String,

    /// Average rating out of five
    pub rating: f32,

    /// Typical delivery time in minutes
    #[serde(rename = "delivery_time")]
    pub delivery_time_minutes: u32,

    /// Image reference
    #[serde(rename = "image", default)]
    pub image_ref: String,

    /// Whether the restaurant is currently taking orders
    #[serde(rename = "open")]
    pub is_open: bool,
}

impl Restaurant {
    /// Whether the name or any cuisine type contains `query`, ignoring case.
    ///
    /// An empty query matches every restaurant.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let query = query.to_lowercase();

        self.name.to_lowercase().contains(&query)
            || self
                .cuisine_types
                .iter()
                .any(|cuisine| cuisine.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Deserialize)]
struct RestaurantsFixture {
    restaurants: Vec<Restaurant>,
}

/// Restaurants matching the search box contents, in listing order.
pub fn filter_restaurants<'r>(restaurants: &'r [Restaurant], query: &str) -> Vec<&'r Restaurant> {
    restaurants
        .iter()
        .filter(|restaurant| restaurant.matches(query))
        .collect()
}

/// Parse a YAML restaurant listing.
///
/// # Errors
///
/// Returns [`CatalogError::Yaml`] if the listing is malformed.
pub fn parse_restaurants(yaml: &str) -> Result<Vec<Restaurant>, CatalogError> {
    let fixture: RestaurantsFixture = serde_norway::from_str(yaml)?;

    Ok(fixture.restaurants)
}

/// The nearby restaurant listing compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRestaurants;

impl DataSource for EmbeddedRestaurants {
    type Output = Vec<Restaurant>;
    type Error = CatalogError;

    fn load(&self) -> Result<Vec<Restaurant>, CatalogError> {
        parse_restaurants(NEARBY_RESTAURANTS_YAML)
    }
}

//! Feedo prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartObserver, NoopObserver},
    catalog::{
        Catalog, CatalogError, CatalogItem, ItemId,
        fixtures::{EmbeddedCatalog, FixtureCatalog},
    },
    checkout::{
        Checkout, CheckoutError, DeliveryDetails, OrderConfirmation, OrderSummary, PaymentMethod,
    },
    config::{ConfigError, StoreConfig},
    loading::{DataSource, DelayedLoad, LoadStatus},
    location::{Location, LocationError, LocationState},
    notifications::{Notice, NoticeLevel, NoticeLog},
    pricing::{Price, PricingError, format_price, parse_price},
    restaurants::{EmbeddedRestaurants, Restaurant, filter_restaurants},
    theme::{FileStore, KeyValueStore, MemoryStore, Theme, ThemeError, ThemeSettings},
};

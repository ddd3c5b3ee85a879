//! Feedo
//!
//! Core of the Feedo food-ordering storefront: the session cart and its
//! derived totals, checkout, the menu catalog and the small amount of
//! persisted state (the theme flag) the storefront keeps.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod loading;
pub mod location;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod restaurants;
pub mod theme;
pub mod utils;

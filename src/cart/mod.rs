//! Cart
//!
//! The session's shopping cart: an insertion-ordered list of lines, at most
//! one per catalog item id, each with a quantity of at least one.
//!
//! The total is derived on every call to [`Cart::total`] and never cached.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::{CatalogItem, ItemId},
    pricing::{Price, line_total, total_price},
};

pub mod observer;

pub use observer::{CartObserver, NoopObserver};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item id, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// One catalog item in the cart together with the requested quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: ItemId,
    name: String,
    price: Price,
    image_ref: String,
    restaurant: String,
    quantity: u32,
}

impl CartLine {
    /// Item id this line is keyed by.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Price {
        &self.price
    }

    /// Image reference
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Restaurant serving the item
    pub fn restaurant(&self) -> &str {
        &self.restaurant
    }

    /// Requested quantity; always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    pub fn subtotal(&self) -> Price {
        line_total(&self.price, self.quantity)
    }
}

impl From<&CatalogItem> for CartLine {
    fn from(item: &CatalogItem) -> Self {
        CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image_ref: item.image_ref.clone(),
            restaurant: item.restaurant.clone(),
            quantity: 1,
        }
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart<O: CartObserver = NoopObserver> {
    lines: Vec<CartLine>,
    currency: &'static Currency,
    observer: O,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Cart::with_observer(currency, NoopObserver)
    }
}

impl<O: CartObserver> Cart<O> {
    /// Create an empty cart that reports mutations to `observer`.
    pub fn with_observer(currency: &'static Currency, observer: O) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
            observer,
        }
    }

    /// Add one unit of `item`.
    ///
    /// If a line for the item already exists its quantity goes up by one,
    /// otherwise a new line with quantity one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the item is priced in a
    /// different currency from the cart. The cart is left unchanged.
    pub fn add_item(&mut self, item: &CatalogItem) -> Result<(), CartError> {
        let item_currency = item.price.currency();

        if item_currency != self.currency {
            warn!(
                item = %item.id,
                item_currency = item_currency.iso_alpha_code,
                cart_currency = self.currency.iso_alpha_code,
                "rejected item priced in another currency"
            );

            return Err(CartError::CurrencyMismatch(
                item.id.to_string(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);

            debug!(item = %line.id, quantity = line.quantity, "merged item into cart line");

            self.observer.on_item_added(line);
        } else {
            let line = CartLine::from(item);

            debug!(item = %line.id, "added new cart line");

            self.observer.on_item_added(&line);
            self.lines.push(line);
        }

        Ok(())
    }

    /// Adjust the quantity of the line for `id` by `delta`.
    ///
    /// The resulting quantity never drops below one; decrementing does not
    /// remove the line (see [`remove_item`](Self::remove_item)). Unknown ids
    /// and a zero `delta` are no-ops.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        if delta == 0 {
            return;
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.id.as_str() == id) else {
            return;
        };

        let requested = i64::from(line.quantity).saturating_add(delta);

        line.quantity = u32::try_from(requested.clamp(1, i64::from(u32::MAX))).unwrap_or(1);

        debug!(item = %line.id, delta, quantity = line.quantity, "updated cart line quantity");
    }

    /// Remove the line for `id`, returning it if it was present.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLine> {
        let position = self.position(id)?;
        let line = self.lines.remove(position);

        debug!(item = %line.id, "removed cart line");

        self.observer.on_item_removed(&line);

        Some(line)
    }

    /// Sum of every line's price multiplied by its quantity.
    ///
    /// Recomputed on each call. An empty cart totals zero.
    pub fn total(&self) -> Price {
        total_price(&self.lines, self.currency)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        let cleared = self.lines.len();
        self.lines.clear();

        debug!(lines = cleared, "cleared cart");

        self.observer.on_cleared(cleared);
    }

    /// Lines in the order their items were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// The line for `id`, if present.
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id.as_str() == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// A zero amount in the cart currency.
    pub fn zero(&self) -> Price {
        Money::from_minor(0, self.currency)
    }

    /// The cart's observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the cart's observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.id.as_str() == id)
    }
}

impl<'c, O: CartObserver> IntoIterator for &'c Cart<O> {
    type Item = &'c CartLine;
    type IntoIter = std::slice::Iter<'c, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

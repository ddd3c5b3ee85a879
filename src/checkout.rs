//! Checkout
//!
//! Collects delivery details, summarises the order and, once the order is
//! placed, empties the cart. The delivery fee is checkout policy and never
//! part of the cart total.

use std::{fmt, io, str::FromStr};

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::{Cart, CartObserver},
    notifications::Notice,
    pricing::{Price, format_price},
};

/// Delivery fee in minor units (2.99).
pub const DELIVERY_FEE_MINOR: i64 = 299;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Delivery address was blank.
    #[error("Delivery address is required")]
    MissingAddress,

    /// Contact number was blank.
    #[error("Contact number is required")]
    MissingContactNumber,

    /// Unknown payment method name.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Wrapper for money errors, e.g. a delivery fee in another currency.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error writing a summary
    #[error("Failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Credit or debit card
    #[default]
    Card,

    /// Cash on delivery
    CashOnDelivery,
}

impl PaymentMethod {
    /// Label shown to the customer.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::CashOnDelivery),
            other => Err(CheckoutError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where and how to deliver the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDetails {
    /// Full delivery address (required)
    pub address: String,

    /// Phone number to reach the customer (required)
    pub contact_number: String,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Optional free-text instructions
    pub special_instructions: Option<String>,
}

impl DeliveryDetails {
    /// Check the required fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingAddress`] or
    /// [`CheckoutError::MissingContactNumber`] when a required field is blank.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.address.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }

        if self.contact_number.trim().is_empty() {
            return Err(CheckoutError::MissingContactNumber);
        }

        Ok(())
    }
}

/// One row of an order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    /// Units ordered
    pub quantity: u32,

    /// Item name
    pub name: String,

    /// Price for all units
    pub subtotal: Price,
}

impl SummaryLine {
    /// Row label, e.g. "2 x Double Cheeseburger".
    pub fn label(&self) -> String {
        format!("{} x {}", self.quantity, self.name)
    }
}

/// Snapshot of what is being ordered and what it costs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    lines: Vec<SummaryLine>,
    subtotal: Price,
    delivery_fee: Price,
    total: Price,
}

impl OrderSummary {
    /// Summary rows in cart order.
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// Cart total before the delivery fee.
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Delivery fee
    pub fn delivery_fee(&self) -> Price {
        self.delivery_fee
    }

    /// Amount payable: subtotal plus delivery fee.
    pub fn total(&self) -> Price {
        self.total
    }

    /// Render the summary as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CheckoutError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Amount"]);

        for line in &self.lines {
            builder.push_record([line.label(), format_price(&line.subtotal)]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "{table}")?;

        let rows = [
            ("Subtotal:", format_price(&self.subtotal)),
            ("Delivery Fee:", format_price(&self.delivery_fee)),
            ("Total:", format_price(&self.total)),
        ];

        let value_width = rows.iter().map(|(_, value)| value.chars().count()).max();

        for (label, value) in &rows {
            writeln!(
                out,
                " {label:<14}{value:>width$}",
                width = value_width.unwrap_or_default()
            )?;
        }

        Ok(())
    }
}

/// Result of a successfully placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    summary: OrderSummary,
    payment_method: PaymentMethod,
    notice: Notice,
}

impl OrderConfirmation {
    /// What was ordered.
    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    /// How the order will be paid for.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Notice to show the customer.
    pub fn notice(&self) -> &Notice {
        &self.notice
    }
}

/// Checkout policy: currently just the delivery fee.
#[derive(Debug, Clone, Copy)]
pub struct Checkout {
    delivery_fee: Price,
}

impl Checkout {
    /// Create a checkout charging `delivery_fee` per order.
    pub fn new(delivery_fee: Price) -> Self {
        Self { delivery_fee }
    }

    /// Checkout with the standard 2.99 delivery fee in `currency`.
    pub fn with_standard_fee(currency: &'static Currency) -> Self {
        Self::new(Money::from_minor(DELIVERY_FEE_MINOR, currency))
    }

    /// Delivery fee charged per order.
    pub fn delivery_fee(&self) -> Price {
        self.delivery_fee
    }

    /// Summarise the cart's current contents.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Money`] if the delivery fee is not in the cart currency.
    pub fn summary<O: CartObserver>(&self, cart: &Cart<O>) -> Result<OrderSummary, CheckoutError> {
        let lines = cart
            .iter()
            .map(|line| SummaryLine {
                quantity: line.quantity(),
                name: line.name().to_string(),
                subtotal: line.subtotal(),
            })
            .collect();

        let subtotal = cart.total();
        let total = subtotal.add(self.delivery_fee)?;

        Ok(OrderSummary {
            lines,
            subtotal,
            delivery_fee: self.delivery_fee,
            total,
        })
    }

    /// Place the order and empty the cart.
    ///
    /// The cart is only cleared on success; any error leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to order, a
    /// validation error if a required delivery field is blank, or
    /// [`CheckoutError::Money`] if the fee cannot be added to the cart total.
    pub fn place_order<O: CartObserver>(
        &self,
        cart: &mut Cart<O>,
        details: &DeliveryDetails,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.is_empty() {
            warn!("checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        if let Err(error) = details.validate() {
            warn!(%error, "checkout rejected");
            return Err(error);
        }

        let summary = self.summary(cart)?;

        cart.clear();

        info!(
            lines = summary.lines.len(),
            total = %format_price(&summary.total),
            payment = %details.payment_method,
            "order placed"
        );

        Ok(OrderConfirmation {
            summary,
            payment_method: details.payment_method,
            notice: Notice::success("Order placed successfully!"),
        })
    }
}

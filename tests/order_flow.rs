//! End-to-end ordering flow against the embedded popular-items menu.
//!
//! Menu prices used below:
//!
//! - m1 Double Cheeseburger: ₹9.99
//! - m2 Margherita Pizza: ₹12.99
//! - m3 Chicken Biryani: ₹14.99
//! - m4 California Roll: ₹8.99

use std::time::{Duration, Instant};

use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use feedo::{loading::MENU_LOAD_DELAY, prelude::*};

fn menu() -> TestResult<Catalog> {
    Ok(EmbeddedCatalog.load()?)
}

fn quantities<O: CartObserver>(cart: &Cart<O>) -> Vec<(&str, u32)> {
    cart.iter()
        .map(|line| (line.id().as_str(), line.quantity()))
        .collect()
}

#[test]
fn add_update_remove_clear() -> TestResult {
    let menu = menu()?;
    let burger = menu.get("m1").ok_or("missing m1")?;
    let pizza = menu.get("m2").ok_or("missing m2")?;

    let mut cart = Cart::new(menu.currency());

    cart.add_item(burger)?;
    cart.add_item(pizza)?;
    cart.update_quantity("m1", 1);

    assert_eq!(quantities(&cart), [("m1", 2), ("m2", 1)]);
    assert_eq!(cart.total(), Money::from_minor(3297, INR));
    assert_eq!(format_price(&cart.total()), "₹32.97");

    cart.remove_item("m2");

    assert_eq!(quantities(&cart), [("m1", 2)]);
    assert_eq!(cart.total(), Money::from_minor(1998, INR));

    cart.clear();

    assert!(quantities(&cart).is_empty());
    assert_eq!(cart.total(), Money::from_minor(0, INR));

    Ok(())
}

#[test]
fn three_adds_merge_into_one_line() -> TestResult {
    let menu = menu()?;
    let burger = menu.get("m1").ok_or("missing m1")?;
    let mut cart = Cart::new(INR);

    for _ in 0..3 {
        cart.add_item(burger)?;
    }

    assert_eq!(quantities(&cart), [("m1", 3)]);
    assert_eq!(cart.total(), Money::from_minor(2997, INR));

    Ok(())
}

#[test]
fn reordered_operations_reach_same_total() -> TestResult {
    let menu = menu()?;
    let a = menu.get("m3").ok_or("missing m3")?;
    let b = menu.get("m4").ok_or("missing m4")?;

    let mut first = Cart::new(INR);
    first.add_item(a)?;
    first.add_item(b)?;
    first.update_quantity("m3", 1);

    let mut second = Cart::new(INR);
    second.add_item(a)?;
    second.update_quantity("m3", 1);
    second.add_item(b)?;

    let mut third = Cart::new(INR);
    third.add_item(b)?;
    third.add_item(a)?;
    third.add_item(a)?;

    assert_eq!(first.total(), Money::from_minor(2 * 1499 + 899, INR));
    assert_eq!(first.total(), second.total());
    assert_eq!(first.total(), third.total());

    Ok(())
}

#[test]
fn checkout_after_deferred_menu_load() -> TestResult {
    let config = StoreConfig::default();
    let start = Instant::now();
    let mut load = DelayedLoad::new(EmbeddedCatalog, config.menu_delay(), start);

    assert!(load.poll(start + Duration::from_millis(500))?.is_none());

    let menu = load.poll(start + MENU_LOAD_DELAY)?.ok_or("menu not ready")?;

    let mut cart = Cart::with_observer(menu.currency(), NoticeLog::new());

    cart.add_item(menu.get("m1").ok_or("missing m1")?)?;
    cart.add_item(menu.get("m2").ok_or("missing m2")?)?;
    cart.update_quantity("m1", 1);

    let checkout = config.checkout()?;

    let summary = checkout.summary(&cart)?;
    assert_eq!(summary.total(), Money::from_minor(3297 + 299, INR));

    let incomplete = DeliveryDetails {
        address: "12 MG Road".to_string(),
        ..DeliveryDetails::default()
    };

    assert!(matches!(
        checkout.place_order(&mut cart, &incomplete),
        Err(CheckoutError::MissingContactNumber)
    ));
    assert_eq!(cart.len(), 2);

    let details = DeliveryDetails {
        contact_number: "+91 98765 43210".to_string(),
        payment_method: PaymentMethod::CashOnDelivery,
        ..incomplete
    };

    let confirmation = checkout.place_order(&mut cart, &details)?;

    assert!(cart.is_empty());
    assert_eq!(confirmation.summary(), &summary);
    assert_eq!(confirmation.payment_method(), PaymentMethod::CashOnDelivery);

    let messages: Vec<&str> = cart
        .observer()
        .notices()
        .iter()
        .map(Notice::message)
        .collect();

    assert_eq!(
        messages,
        [
            "Added Double Cheeseburger to cart",
            "Added Margherita Pizza to cart",
        ]
    );

    Ok(())
}

#[test]
fn cart_can_be_refilled_after_checkout() -> TestResult {
    let menu = menu()?;
    let checkout = Checkout::with_standard_fee(INR);
    let details = DeliveryDetails {
        address: "1 Park Street".to_string(),
        contact_number: "555-0101".to_string(),
        ..DeliveryDetails::default()
    };

    let mut cart = Cart::new(INR);
    cart.add_item(menu.get("m4").ok_or("missing m4")?)?;
    checkout.place_order(&mut cart, &details)?;

    cart.add_item(menu.get("m2").ok_or("missing m2")?)?;

    assert_eq!(quantities(&cart), [("m2", 1)]);
    assert_eq!(cart.total(), Money::from_minor(1299, INR));

    Ok(())
}

#[test]
fn torn_down_restaurant_listing_never_loads() -> TestResult {
    let start = Instant::now();
    let mut listing = DelayedLoad::new(
        EmbeddedRestaurants,
        StoreConfig::default().restaurants_delay(),
        start,
    );

    listing.cancel();

    assert!(listing.poll(start + Duration::from_secs(60))?.is_none());
    assert_eq!(listing.status(), LoadStatus::Cancelled);

    Ok(())
}

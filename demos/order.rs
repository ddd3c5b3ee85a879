//! Ordering Example
//!
//! Walks through a full order: the menu arrives after its simulated load
//! delay, a few items go into the cart, the order summary is printed and the
//! order is placed.
//!
//! Use `-c` to load a store configuration file
//! Use `-p` to choose the payment method (card, cash)

use std::{
    io, thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use feedo::{
    prelude::*,
    utils::{DemoArgs, init_tracing},
};
use tracing::info;

fn wait_for<S: DataSource>(source: S, delay: Duration) -> Result<Option<S::Output>, S::Error> {
    let mut load = DelayedLoad::new(source, delay, Instant::now());

    if let Some(remaining) = load.remaining(Instant::now()) {
        thread::sleep(remaining);
    }

    load.poll(Instant::now())?;

    Ok(load.into_output())
}

fn load_menu(config: &StoreConfig) -> Result<Catalog> {
    let menu = match &config.menu_path {
        Some(path) => wait_for(FixtureCatalog::new(path), config.menu_delay())?,
        None => wait_for(EmbeddedCatalog, config.menu_delay())?,
    };

    let menu = menu.ok_or_else(|| anyhow::anyhow!("menu did not load"))?;
    config.check_menu(&menu)?;

    Ok(menu)
}

/// Ordering Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    init_tracing(&args.logging)?;

    let config = match &args.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };

    let theme = ThemeSettings::init(FileStore::new(&config.settings_path), false)?;
    info!(theme = %theme.theme(), "theme loaded");

    let mut location = LocationState::with_default(&config.default_location);
    if let Some(notice) = location.apply_default() {
        println!("{notice}");
    }

    let menu = load_menu(&config)?;
    let mut cart = Cart::with_observer(menu.currency(), NoticeLog::new());

    for item in menu.iter().take(2) {
        cart.add_item(item)?;
    }

    if let Some(first) = menu.iter().next() {
        cart.update_quantity(first.id.as_str(), 1);
    }

    for notice in cart.observer_mut().drain() {
        println!("{notice}");
    }

    let checkout = config.checkout()?;

    checkout.summary(&cart)?.write_to(io::stdout().lock())?;

    let details = DeliveryDetails {
        address: "350 Fifth Avenue".to_string(),
        contact_number: "+1 212 736 3100".to_string(),
        payment_method: args.payment.parse()?,
        special_instructions: None,
    };

    let confirmation = checkout.place_order(&mut cart, &details)?;

    println!(
        "\n{} Paying {} by {}.",
        confirmation.notice(),
        format_price(&confirmation.summary().total()),
        confirmation.payment_method()
    );

    Ok(())
}

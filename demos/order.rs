//! Order Demo
//!
//! Builds a cart from a fixture menu, submits it as an order, optionally
//! pays it, and prints the ticket.
//!
//! Use `-m` to load a menu fixture set by name
//! Use `-t` to attach a table number to the order
//! Use `-c` to attach a customer name to the order
//! Use `-p` to tender a payment, e.g. `-p "25.00 USD"`

use std::io;

use anyhow::Result;
use clap::Parser;
use comanda::{
    fixtures::{Fixture, parse_price},
    orders::{Order, OrderBoard, OrderDetails, Payment, PaymentMethod},
    ticket::Ticket,
    utils::DemoOrderArgs,
};
use rusty_money::Money;

/// Order Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoOrderArgs::parse();

    let fixture = Fixture::from_menu(&args.menu)?;
    let catalog = fixture.catalog();

    let mut ledger = fixture.ledger()?;

    let coffee = fixture.item_key("coffee")?;
    let large = fixture.size("coffee", "Large")?;
    let oat_milk = fixture.addon("coffee", "Oat milk")?;

    ledger.add_item(catalog, coffee, Some(large.clone()), std::slice::from_ref(&oat_milk))?;
    ledger.add_item(catalog, coffee, Some(large), std::slice::from_ref(&oat_milk))?;

    let burger = fixture.item_key("burger")?;
    let cheese = fixture.addon("burger", "Cheese")?;

    let burger_line = ledger.add_item(catalog, burger, None, std::slice::from_ref(&cheese))?;
    ledger.set_instructions(&burger_line, Some("No onions".to_string()));

    let fries = fixture.item_key("fries")?;
    let large_fries = fixture.size("fries", "Large")?;

    ledger.add_item(catalog, fries, Some(large_fries), &[])?;

    println!(
        "Cart: {} lines, {} items, subtotal {}",
        ledger.len(),
        ledger.item_count(),
        ledger.subtotal()?
    );

    let order = Order::from_ledger(
        &ledger,
        OrderDetails {
            table_number: args.table,
            customer_name: args.customer,
            notes: None,
        },
    )?;

    ledger.clear();

    let mut board = OrderBoard::new();
    let key = board.submit(order);

    if let Some(tendered) = args.pay.as_deref() {
        let (minor, currency) = parse_price(tendered)?;

        let change = board
            .order_mut(key)
            .ok_or_else(|| anyhow::anyhow!("order missing from board"))?
            .pay(Payment::new(
                PaymentMethod::Cash,
                Money::from_minor(minor, currency),
            ))?;

        println!("Change due: {change}");
    }

    let order = board
        .order(key)
        .ok_or_else(|| anyhow::anyhow!("order missing from board"))?;

    let stdout = io::stdout();
    let handle = stdout.lock();

    Ticket::new(order).write_to(handle)?;

    Ok(())
}

//! End-to-end ordering flow against the diner fixture menu

use comanda::{
    fixtures::Fixture,
    orders::{Order, OrderDetails, OrderStatus, Payment, PaymentMethod},
    ticket::Ticket,
};
use comanda::{cart::LedgerError, orders::OrderBoard};
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

#[test]
fn cart_to_paid_order_flow() -> TestResult {
    let fixture = Fixture::from_menu("diner")?;
    let catalog = fixture.catalog();

    let mut ledger = fixture.ledger()?;

    // Two identical coffees, added with the add-ons in different orders,
    // must land on one line.
    let coffee = fixture.item_key("coffee")?;
    let large = fixture.size("coffee", "Large")?;
    let shot = fixture.addon("coffee", "Extra shot")?;
    let oat = fixture.addon("coffee", "Oat milk")?;

    let first = ledger.add_item(
        catalog,
        coffee,
        Some(large.clone()),
        &[shot.clone(), oat.clone()],
    )?;
    let second = ledger.add_item(catalog, coffee, Some(large), &[oat, shot])?;

    assert_eq!(first, second, "reordered add-ons must merge");
    assert_eq!(ledger.len(), 1);

    // 2.50 + 0.75 + 0.80 + 0.60 = 4.65 per unit, two units.
    let coffee_line = ledger.line(&first).ok_or("coffee line missing")?;

    assert_eq!(coffee_line.unit_price(), Money::from_minor(4_65, USD));
    assert_eq!(coffee_line.quantity(), 2);

    let burger = fixture.item_key("burger")?;
    let bacon = fixture.addon("burger", "Bacon")?;

    let burger_line = ledger.add_item(catalog, burger, None, &[bacon])?;
    ledger.set_instructions(&burger_line, Some("Well done".to_string()));

    // 4.65 * 2 + 9.50 = 18.80, three items in total.
    assert_eq!(ledger.subtotal()?, Money::from_minor(18_80, USD));
    assert_eq!(ledger.item_count(), 3);

    let order = Order::from_ledger(
        &ledger,
        OrderDetails {
            table_number: Some(7),
            customer_name: Some("Ada".to_string()),
            notes: None,
        },
    )?;

    // Successful submission resets the cart.
    ledger.clear();

    assert!(ledger.is_empty());
    assert_eq!(ledger.subtotal()?, Money::from_minor(0, USD));

    let mut board = OrderBoard::new();
    let key = board.submit(order);

    {
        let order = board.order_mut(key).ok_or("order missing")?;

        order.advance(OrderStatus::Preparing)?;
        order.advance(OrderStatus::Ready)?;

        let change = order.pay(Payment::new(
            PaymentMethod::Card,
            Money::from_minor(20_00, USD),
        ))?;

        assert_eq!(change, Money::from_minor(1_20, USD));
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    assert_eq!(board.by_status(OrderStatus::Completed).count(), 1);
    assert_eq!(board.by_status(OrderStatus::Pending).count(), 0);

    let order = board.order(key).ok_or("order missing")?;
    let mut rendered = Vec::new();

    Ticket::new(order).write_to(&mut rendered)?;

    let rendered = String::from_utf8(rendered)?;

    assert!(rendered.contains("Coffee"), "ticket lists the coffee line");
    assert!(
        rendered.contains("Well done"),
        "ticket carries the instructions"
    );
    assert!(rendered.contains("Table:    7"), "ticket shows the table");

    Ok(())
}

#[test]
fn unavailable_menu_items_cannot_be_ordered() -> TestResult {
    let fixture = Fixture::from_menu("diner")?;

    let mut ledger = fixture.ledger()?;

    let milkshake = fixture.item_key("milkshake")?;
    let result = ledger.add_item(fixture.catalog(), milkshake, None, &[]);

    assert!(
        matches!(result, Err(LedgerError::ItemUnavailable(_))),
        "milkshake is flagged off the menu, got {result:?}"
    );
    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn catalog_price_changes_do_not_reprice_open_carts() -> TestResult {
    let mut fixture = Fixture::from_menu("diner")?;

    let fries = fixture.item_key("fries")?;

    let mut ledger = fixture.ledger()?;
    let line = {
        let catalog = fixture.catalog();
        ledger.add_item(catalog, fries, None, &[])?
    };

    let mut revised = fixture.item("fries")?.clone();
    revised.price = Money::from_minor(4_25, USD);
    fixture.catalog_mut().update_item(fries, revised)?;

    let open_line = ledger.line(&line).ok_or("fries line missing")?;

    assert_eq!(
        open_line.unit_price(),
        Money::from_minor(3_00, USD),
        "existing lines keep their add-time price"
    );

    // A fresh addition picks up the new catalog price as a separate ledger.
    let mut fresh = fixture.ledger()?;
    let fresh_line = fresh.add_item(fixture.catalog(), fries, None, &[])?;

    assert_eq!(
        fresh.line(&fresh_line).map(|line| line.unit_price()),
        Some(Money::from_minor(4_25, USD))
    );

    Ok(())
}

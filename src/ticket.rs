//! Ticket
//!
//! A printable docket for one submitted order: a line table followed by a
//! totals and payment summary.

use std::io;

use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::orders::{Order, OrderLine};

/// Errors that can occur when printing a ticket.
#[derive(Debug, Error)]
pub enum TicketError {
    /// IO error
    #[error("IO error")]
    Io,
}

/// Printable docket for a submitted order.
#[derive(Debug)]
pub struct Ticket<'a> {
    order: &'a Order<'a>,
}

impl<'a> Ticket<'a> {
    /// Create a ticket for the given order.
    #[must_use]
    pub fn new(order: &'a Order<'a>) -> Self {
        Self { order }
    }

    /// Write the ticket to the given output.
    ///
    /// # Errors
    ///
    /// Returns a [`TicketError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), TicketError> {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Unit", "Total"]);

        let mut line_boundary_rows: SmallVec<[usize; 16]> = smallvec![];
        let mut dimmed_rows: SmallVec<[usize; 16]> = smallvec![];
        let mut current_row = 1; // header is row 0

        for line in self.order.lines() {
            line_boundary_rows.push(current_row);

            builder.push_record([
                format!("{}", line.quantity()),
                line.display_name().to_string(),
                format!("{}", line.unit_price()),
                format!("{}", line.line_total()),
            ]);

            current_row += 1;

            for detail in line_details(line) {
                builder.push_record([String::new(), detail, String::new(), String::new()]);

                dimmed_rows.push(current_row);
                current_row += 1;
            }
        }

        write_line_table(&mut out, builder, &line_boundary_rows, &dimmed_rows)?;

        self.write_summary(&mut out)?;

        Ok(())
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), TicketError> {
        let details = self.order.details();

        if let Some(table) = details.table_number {
            writeln!(out, " Table:    {table}").map_err(|_err| TicketError::Io)?;
        }

        if let Some(customer) = details.customer_name.as_deref() {
            writeln!(out, " Customer: {customer}").map_err(|_err| TicketError::Io)?;
        }

        if let Some(notes) = details.notes.as_deref() {
            writeln!(out, " Notes:    {notes}").map_err(|_err| TicketError::Io)?;
        }

        writeln!(out, " Status:   {}", self.order.status()).map_err(|_err| TicketError::Io)?;
        writeln!(out, " Total:    {}", self.order.total()).map_err(|_err| TicketError::Io)?;

        if let Some(payment) = self.order.payment() {
            writeln!(out, " Paid:     {} ({})", payment.amount(), payment.method())
                .map_err(|_err| TicketError::Io)?;
        }

        writeln!(out).map_err(|_err| TicketError::Io)
    }
}

/// Indented selection details printed under a line: size, add-ons and
/// instructions.
fn line_details(line: &OrderLine<'_>) -> SmallVec<[String; 3]> {
    let mut details: SmallVec<[String; 3]> = smallvec![];

    if let Some(size) = line.size() {
        details.push(format!("  {size}"));
    }

    if !line.addons().is_empty() {
        details.push(format!("  + {}", line.addons().join(", ")));
    }

    if let Some(instructions) = line.special_instructions() {
        details.push(format!("  \"{instructions}\""));
    }

    details
}

fn write_line_table(
    out: &mut impl io::Write,
    builder: Builder,
    line_boundary_rows: &[usize],
    dimmed_rows: &[usize],
) -> Result<(), TicketError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in line_boundary_rows {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..4), Alignment::right());

    for &row in dimmed_rows {
        table.modify((row, 1), color_dark_grey());
    }

    writeln!(out, "\n{table}").map_err(|_err| TicketError::Io)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        cart::CartLedger,
        catalog::{AddonOption, Catalog, Category, MenuItem, SizeOption},
        orders::{OrderDetails, Payment, PaymentMethod},
    };

    use super::*;

    fn submitted_order<'a>() -> TestResult<Order<'a>> {
        let mut catalog = Catalog::new();

        let category = catalog.add_category(Category {
            name: "Beverages".to_string(),
            description: None,
        });

        let latte = catalog.add_item(MenuItem {
            name: "Latte".to_string(),
            description: None,
            price: Money::from_minor(3_50, USD),
            category,
            available: true,
            emoji: None,
            sizes: vec![SizeOption::new("Large", Money::from_minor(50, USD))],
            addons: vec![AddonOption::new("Oat milk", Money::from_minor(60, USD))],
        })?;

        let mut ledger = CartLedger::new(USD);

        let item = catalog.item(latte).ok_or("item missing")?;
        let size = item.size("Large").cloned();
        let addons = vec![item.addon("Oat milk").cloned().ok_or("addon missing")?];

        let key = ledger.add_item(&catalog, latte, size, &addons)?;
        ledger.set_instructions(&key, Some("Extra hot".to_string()));

        Ok(Order::from_ledger(
            &ledger,
            OrderDetails {
                table_number: Some(4),
                customer_name: None,
                notes: None,
            },
        )?)
    }

    #[test]
    fn ticket_renders_lines_and_totals() -> TestResult {
        let order = submitted_order()?;
        let mut out = Vec::new();

        Ticket::new(&order).write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Latte"), "missing item name:\n{rendered}");
        assert!(rendered.contains("Large"), "missing size:\n{rendered}");
        assert!(rendered.contains("Oat milk"), "missing add-on:\n{rendered}");
        assert!(rendered.contains("Extra hot"), "missing instructions:\n{rendered}");
        assert!(rendered.contains("Table:    4"), "missing table:\n{rendered}");
        assert!(rendered.contains("Status:   pending"), "missing status:\n{rendered}");

        Ok(())
    }

    #[test]
    fn ticket_shows_payment_once_paid() -> TestResult {
        let mut order = submitted_order()?;

        order.pay(Payment::new(
            PaymentMethod::Cash,
            Money::from_minor(10_00, USD),
        ))?;

        let mut out = Vec::new();

        Ticket::new(&order).write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Paid:"), "missing payment:\n{rendered}");
        assert!(rendered.contains("(cash)"), "missing method:\n{rendered}");
        assert!(
            rendered.contains("Status:   completed"),
            "missing status:\n{rendered}"
        );

        Ok(())
    }
}

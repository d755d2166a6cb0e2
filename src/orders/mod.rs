//! Orders
//!
//! Submitted orders: frozen snapshots of a cart's lines plus the lifecycle
//! and payment state the kitchen and the till care about.

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{CartLedger, CartLine},
    catalog::MenuItemKey,
    pricing::{self, PricingError},
};

pub mod payment;
pub mod status;

pub use payment::{Payment, PaymentMethod};
pub use status::OrderStatus;

new_key_type! {
    /// Order Key
    pub struct OrderKey;
}

/// Errors related to order submission and lifecycle.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order must contain at least one line.
    #[error("order has no lines")]
    EmptyOrder,

    /// The requested status change is not allowed.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status of the order.
        from: OrderStatus,
        /// Status the caller asked for.
        to: OrderStatus,
    },

    /// The tendered amount does not cover the order total.
    #[error("payment of {offered} is less than order total {required}")]
    Underpayment {
        /// Amount tendered.
        offered: String,
        /// Order total that must be covered.
        required: String,
    },

    /// The payment currency differs from the order currency.
    #[error("payment currency {0} does not match order currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The order already carries a payment record.
    #[error("order has already been paid")]
    AlreadyPaid,

    /// Totalling the cart lines failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One line of a submitted order: an immutable snapshot of a [`CartLine`].
#[derive(Debug, Clone)]
pub struct OrderLine<'a> {
    item: MenuItemKey,
    display_name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    line_total: Money<'a, Currency>,
    size: Option<String>,
    addons: SmallVec<[String; 4]>,
    special_instructions: Option<String>,
}

impl<'a> OrderLine<'a> {
    /// Snapshot a cart line, freezing its total.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the line total overflows.
    pub fn from_cart_line(line: &CartLine<'a>) -> Result<Self, PricingError> {
        Ok(Self {
            item: line.item(),
            display_name: line.display_name().to_string(),
            unit_price: line.unit_price(),
            quantity: line.quantity(),
            line_total: pricing::line_total(line)?,
            size: line.selected_size().map(|size| size.name().to_string()),
            addons: line
                .selected_addons()
                .iter()
                .map(|addon| addon.name().to_string())
                .collect(),
            special_instructions: line.special_instructions().map(ToString::to_string),
        })
    }

    /// The menu item the line was priced from.
    pub fn item(&self) -> MenuItemKey {
        self.item
    }

    /// The item name at submission time.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The frozen per-unit price.
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Units ordered.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity, frozen at submission.
    pub fn line_total(&self) -> Money<'a, Currency> {
        self.line_total
    }

    /// The selected size name, if any.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// The selected add-on names.
    pub fn addons(&self) -> &[String] {
        &self.addons
    }

    /// Free-text preparation instructions.
    pub fn special_instructions(&self) -> Option<&str> {
        self.special_instructions.as_deref()
    }
}

/// Operator-entered details attached to an order at submission.
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    /// Table the order is for.
    pub table_number: Option<u32>,

    /// Customer name, for pickup orders.
    pub customer_name: Option<String>,

    /// Order-level notes.
    pub notes: Option<String>,
}

/// A submitted order.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    lines: Vec<OrderLine<'a>>,
    status: OrderStatus,
    details: OrderDetails,
    total: Money<'a, Currency>,
    payment: Option<Payment<'a>>,
}

impl<'a> Order<'a> {
    /// Build an order from the current state of a cart ledger.
    ///
    /// The ledger itself is untouched; the caller clears it after a
    /// successful submission.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyOrder`]: the ledger has no lines.
    /// - [`OrderError::Pricing`]: totalling the lines failed.
    pub fn from_ledger(ledger: &CartLedger<'a>, details: OrderDetails) -> Result<Self, OrderError> {
        if ledger.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let lines = ledger
            .iter()
            .map(OrderLine::from_cart_line)
            .collect::<Result<Vec<_>, _>>()?;

        let total = ledger.subtotal()?;

        Ok(Self {
            lines,
            status: OrderStatus::Pending,
            details,
            total,
            payment: None,
        })
    }

    /// The order's lines, in cart order.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Current lifecycle status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Operator-entered details.
    pub fn details(&self) -> &OrderDetails {
        &self.details
    }

    /// Order total, frozen at submission.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// The payment record, once the order has been paid.
    pub fn payment(&self) -> Option<&Payment<'a>> {
        self.payment.as_ref()
    }

    /// Move the order to the next lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError::InvalidTransition`] if the move is not
    /// allowed from the current status.
    pub fn advance(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;

        Ok(())
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError::InvalidTransition`] if the order is already
    /// terminal.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.advance(OrderStatus::Cancelled)
    }

    /// Record a payment and complete the order, returning the change due.
    ///
    /// Payment is accepted from any non-terminal status; a paid order is
    /// completed regardless of how far the kitchen had progressed.
    ///
    /// # Errors
    ///
    /// - [`OrderError::AlreadyPaid`]: a payment was already recorded.
    /// - [`OrderError::InvalidTransition`]: the order is cancelled or completed.
    /// - [`OrderError::CurrencyMismatch`]: the tendered currency differs from the order's.
    /// - [`OrderError::Underpayment`]: the tendered amount is below the total.
    pub fn pay(&mut self, payment: Payment<'a>) -> Result<Money<'a, Currency>, OrderError> {
        if self.payment.is_some() {
            return Err(OrderError::AlreadyPaid);
        }

        if self.status.is_terminal() {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Completed,
            });
        }

        let amount = payment.amount();

        if amount.currency() != self.total.currency() {
            return Err(OrderError::CurrencyMismatch(
                amount.currency().iso_alpha_code,
                self.total.currency().iso_alpha_code,
            ));
        }

        if amount.to_minor_units() < self.total.to_minor_units() {
            return Err(OrderError::Underpayment {
                offered: amount.to_string(),
                required: self.total.to_string(),
            });
        }

        let change = amount.sub(self.total).map_err(PricingError::from)?;

        self.payment = Some(payment);
        self.status = OrderStatus::Completed;

        Ok(change)
    }

    /// Change due on a paid order: tendered amount minus total. `None`
    /// until a payment has been recorded.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError::Pricing`] if money arithmetic fails.
    pub fn change_due(&self) -> Result<Option<Money<'a, Currency>>, OrderError> {
        self.payment
            .as_ref()
            .map(|payment| {
                payment
                    .amount()
                    .sub(self.total)
                    .map_err(PricingError::from)
                    .map_err(OrderError::from)
            })
            .transpose()
    }
}

/// Order Board
///
/// The set of submitted orders for a session, in submission order, with
/// status-filtered views for the order management screen.
#[derive(Debug, Default)]
pub struct OrderBoard<'a> {
    orders: SlotMap<OrderKey, Order<'a>>,
    sequence: Vec<OrderKey>,
}

impl<'a> OrderBoard<'a> {
    /// Create a new empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a submitted order to the board.
    pub fn submit(&mut self, order: Order<'a>) -> OrderKey {
        let key = self.orders.insert(order);
        self.sequence.push(key);

        key
    }

    /// Get an order by its key.
    pub fn order(&self, key: OrderKey) -> Option<&Order<'a>> {
        self.orders.get(key)
    }

    /// Get an order by its key, mutably.
    pub fn order_mut(&mut self, key: OrderKey) -> Option<&mut Order<'a>> {
        self.orders.get_mut(key)
    }

    /// Iterate over the orders in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderKey, &Order<'a>)> {
        self.sequence
            .iter()
            .filter_map(|&key| self.orders.get(key).map(|order| (key, order)))
    }

    /// Iterate over the orders with the given status, in submission order.
    pub fn by_status(&self, status: OrderStatus) -> impl Iterator<Item = (OrderKey, &Order<'a>)> {
        self.iter().filter(move |(_, order)| order.status() == status)
    }

    /// Get the number of orders on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

//! Payments
//!
//! Operator-entered payment records attached to completed orders. Amounts
//! are forwarded as entered; there is no payment processing here.

use std::fmt;

use rusty_money::{Money, iso::Currency};

/// How an order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash at the counter.
    Cash,

    /// Card terminal.
    Card,

    /// Digital wallet or app.
    Digital,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Digital => "digital",
        };

        f.write_str(label)
    }
}

/// A tendered payment: method and amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment<'a> {
    method: PaymentMethod,
    amount: Money<'a, Currency>,
}

impl<'a> Payment<'a> {
    /// Create a new payment record.
    #[must_use]
    pub fn new(method: PaymentMethod, amount: Money<'a, Currency>) -> Self {
        Self { method, amount }
    }

    /// The payment method.
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// The tendered amount.
    pub fn amount(&self) -> Money<'a, Currency> {
        self.amount
    }
}

//! Comanda prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLedger, CartLine, LedgerError, LineKey},
    catalog::{
        AddonOption, Catalog, CatalogError, Category, CategoryKey, MenuItem, MenuItemKey,
        SizeOption,
    },
    fixtures::{Fixture, FixtureError},
    orders::{
        Order, OrderBoard, OrderDetails, OrderError, OrderKey, OrderLine, OrderStatus, Payment,
        PaymentMethod,
    },
    pricing::PricingError,
    ticket::{Ticket, TicketError},
};

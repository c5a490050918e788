//! Ticket command and query handlers.

mod purchase_ticket;
mod quote_discount;

pub use purchase_ticket::{
    PurchaseStage, PurchaseTicketCommand, PurchaseTicketHandler, PurchaseTicketResult,
};
pub use quote_discount::{DiscountQuote, QuoteDiscountHandler, QuoteDiscountQuery};

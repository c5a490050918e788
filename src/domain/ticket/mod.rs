//! Ticket module - sold seats, payment methods and purchase failures.

mod aggregate;
mod errors;
mod payment;

pub use aggregate::Ticket;
pub use errors::PurchaseError;
pub use payment::PaymentMethod;

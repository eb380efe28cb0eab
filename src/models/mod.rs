//! Core data models for the delivery quote service.

mod customer;
mod quote;

pub use customer::Customer;
pub use quote::Quote;

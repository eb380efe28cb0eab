//! Delivery fee quoting service.
//!
//! This crate prices deliveries between two addresses using a tiered
//! per-kilometer tariff, applies coupons and a global adjustment, adds tax,
//! and tells the customer when the request will be answered.

#![warn(missing_docs)]

pub mod advisory;
pub mod api;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod notify;
pub mod pricing;

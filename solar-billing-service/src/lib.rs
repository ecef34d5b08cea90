//! Solar Billing Service - energy-credit invoicing for solar generation clients.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::BillingError;

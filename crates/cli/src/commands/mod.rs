//! Command implementations, one module per command group.

pub mod admin;
pub mod auth;
pub mod browse;
pub mod cart;
pub mod checkout;

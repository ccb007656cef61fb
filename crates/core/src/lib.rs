//! Tuhogar Core - Shared types library.
//!
//! This crate provides common types used across all Tuhogar components:
//! - `storefront` - The cart/session engine and remote catalog client
//! - `cli` - The command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, roles, and tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

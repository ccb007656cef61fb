//! Core types for Tuhogar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod role;
pub mod token;

pub use id::*;
pub use price::{Price, PriceError};
pub use role::{ParseRoleError, Role};
pub use token::SessionToken;

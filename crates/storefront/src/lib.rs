//! Tuhogar storefront engine.
//!
//! This crate owns the state that makes the storefront a storefront: the
//! shopping cart, the authenticated session, the catalog filter, and the
//! checkout sequence that decrements remote stock. Presentation is someone
//! else's problem - the engine exposes plain store objects that a client
//! surface (the `tuhogar` CLI, or anything else) constructs once at process
//! start and drives directly.
//!
//! # Architecture
//!
//! - [`storage`] - durable key-value persistence port (file-backed in
//!   production, in-memory in tests)
//! - [`catalog`] - REST client for the remote catalog service plus the pure
//!   product filter pipeline
//! - [`stores`] - the cart and session stores; every mutation persists
//!   synchronously before returning
//! - [`checkout`] - the orchestrator composing session, cart, and catalog
//!
//! State restored at startup is read once, before any gate decision is
//! trusted; malformed persisted blobs reset to defaults without surfacing an
//! error.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod models;
pub mod storage;
pub mod stores;

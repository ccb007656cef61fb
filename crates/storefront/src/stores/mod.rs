//! Stateful stores owned by the client surface.
//!
//! Both stores are constructed once at process start, restored from the
//! persistence port before first use, and persist synchronously after every
//! mutation - a reader immediately after a write observes the new state,
//! and so does a process restart.

pub mod cart;
pub mod session;

pub use cart::{CartError, CartListener, CartStore};
pub use session::{AuthError, SessionStore};

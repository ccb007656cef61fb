//! Session types and persistence key names.

use chrono::{DateTime, Utc};

use tuhogar_core::SessionToken;

use crate::models::User;

/// An authenticated session: user, opaque token, absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The logged-in user.
    pub user: User,
    /// Opaque token minted at login.
    pub token: SessionToken,
    /// Instant after which the session is no longer valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still valid at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Persistence keys for engine state.
pub mod keys {
    /// JSON-serialized array of cart lines.
    pub const CART: &str = "cart";

    /// JSON-serialized user object for the active session.
    pub const SESSION_USER: &str = "session.user";

    /// Opaque session token.
    pub const SESSION_TOKEN: &str = "session.token";

    /// Session expiry as an epoch-millisecond string.
    pub const SESSION_EXPIRES_AT: &str = "session.expiresAt";
}

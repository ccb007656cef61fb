//! Session state store.
//!
//! Owns the authenticated-user/token/expiry triple and the two-state
//! machine behind it: `Anonymous` until a login succeeds, back to
//! `Anonymous` on logout or expiry. The persistence port is injected so
//! tests run against an in-memory fake.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use thiserror::Error;

use tuhogar_core::SessionToken;

use crate::models::{CredentialDirectory, Session, User, keys};
use crate::storage::KeyValueStore;

/// Login failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No directory entry matches the supplied username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// The session store.
///
/// Construct once at process start and call
/// [`restore_on_start`](Self::restore_on_start) before trusting any gate
/// decision.
pub struct SessionStore {
    directory: CredentialDirectory,
    ttl: chrono::Duration,
    port: Arc<dyn KeyValueStore>,
    current: Option<Session>,
}

impl SessionStore {
    /// Create a store in the `Anonymous` state.
    #[must_use]
    pub fn new(
        directory: CredentialDirectory,
        ttl: chrono::Duration,
        port: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            directory,
            ttl,
            port,
            current: None,
        }
    }

    /// Authenticate against the credential directory.
    ///
    /// On a match, mints a fresh token, stamps the expiry at `now + ttl`,
    /// persists the session, and replaces any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a failed lookup; the
    /// current session (if any) is left untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .directory
            .authenticate(username, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session {
            user: user.clone(),
            token: SessionToken::generate(),
            expires_at: Utc::now() + self.ttl,
        };
        self.persist(&session);
        self.current = Some(session);

        tracing::debug!(username, "login succeeded");
        Ok(user)
    }

    /// Clear the in-memory session and remove all persisted session keys.
    pub fn logout(&mut self) {
        self.current = None;
        for key in [
            keys::SESSION_USER,
            keys::SESSION_TOKEN,
            keys::SESSION_EXPIRES_AT,
        ] {
            if let Err(err) = self.port.remove(key) {
                tracing::warn!(key, %err, "failed to clear session key");
            }
        }
    }

    /// Restore the persisted session, if any.
    ///
    /// Runs exactly once per process start, before any gate decision is
    /// trusted. A still-valid session is restored to memory; an expired or
    /// malformed one is cleaned up via [`logout`](Self::logout) and the
    /// store stays `Anonymous`.
    pub fn restore_on_start(&mut self) {
        let user_blob = self.read_key(keys::SESSION_USER);
        let token_blob = self.read_key(keys::SESSION_TOKEN);
        let expires_blob = self.read_key(keys::SESSION_EXPIRES_AT);

        if user_blob.is_none() && token_blob.is_none() && expires_blob.is_none() {
            return;
        }

        match parse_session(user_blob, token_blob, expires_blob) {
            Some(session) if session.is_valid_at(Utc::now()) => {
                tracing::debug!(username = %session.user.username, "restored session");
                self.current = Some(session);
            }
            Some(_) => {
                tracing::debug!("persisted session expired");
                self.logout();
            }
            None => {
                tracing::warn!("discarding malformed persisted session");
                self.logout();
            }
        }
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref().map(|session| &session.user)
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Whether a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Whether a session is present and the user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.role.is_admin())
    }

    fn persist(&self, session: &Session) {
        let user_blob = match serde_json::to_string(&session.user) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize session user");
                return;
            }
        };
        let writes = [
            (keys::SESSION_USER, user_blob),
            (keys::SESSION_TOKEN, session.token.as_str().to_owned()),
            (
                keys::SESSION_EXPIRES_AT,
                session.expires_at.timestamp_millis().to_string(),
            ),
        ];
        for (key, value) in writes {
            if let Err(err) = self.port.set(key, &value) {
                tracing::warn!(key, %err, "failed to persist session key");
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.port.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "failed to read session key");
                None
            }
        }
    }
}

/// Reassemble a session from its three persisted blobs.
///
/// Any missing or unparseable piece makes the whole session malformed.
fn parse_session(
    user: Option<String>,
    token: Option<String>,
    expires: Option<String>,
) -> Option<Session> {
    let user: User = serde_json::from_str(&user?).ok()?;
    let token = SessionToken::from(token?);
    let millis: i64 = expires?.parse().ok()?;
    let expires_at = Utc.timestamp_millis_opt(millis).single()?;
    Some(Session {
        user,
        token,
        expires_at,
    })
}

//! User and credential directory types.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use tuhogar_core::Role;

/// An authenticated storefront user.
///
/// This is what the session stores and persists - the credential itself
/// never leaves the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub username: String,
    /// Name shown in greetings and the admin panel.
    pub display_name: String,
    /// Role gating the admin surface.
    pub role: Role,
}

/// One entry in the static credential directory.
///
/// Implements `Debug` manually to redact the password.
pub struct UserRecord {
    /// Login name.
    pub username: String,
    /// Plaintext password for exact-match lookup.
    pub password: SecretString,
    /// Name shown in greetings.
    pub display_name: String,
    /// Role granted on login.
    pub role: Role,
}

impl UserRecord {
    /// Create a new directory record.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            display_name: display_name.into(),
            role,
        }
    }

    fn to_user(&self) -> User {
        User {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish()
    }
}

/// Static username/password lookup table.
///
/// Read-only; not part of the engine's owned state. Lookup is an exact,
/// case-sensitive match on both fields.
#[derive(Debug, Default)]
pub struct CredentialDirectory {
    records: Vec<UserRecord>,
}

impl CredentialDirectory {
    /// Create a directory from explicit records.
    #[must_use]
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self { records }
    }

    /// Directory seeded with the two demo accounts.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(vec![
            UserRecord::new("admin", "admin123", "Administrator", Role::Admin),
            UserRecord::new("user", "user123", "Demo User", Role::Standard),
        ])
    }

    /// Look up a user by exact username/password match.
    ///
    /// Returns `None` when either field differs; the caller decides how to
    /// surface the failure.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        self.records
            .iter()
            .find(|r| r.username == username && r.password.expose_secret() == password)
            .map(UserRecord::to_user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_exact_match() {
        let directory = CredentialDirectory::seeded();
        let user = directory.authenticate("admin", "admin123").unwrap();
        assert_eq!(user.username, "admin");
        assert!(user.role.is_admin());
    }

    #[test]
    fn test_authenticate_is_case_sensitive() {
        let directory = CredentialDirectory::seeded();
        assert!(directory.authenticate("Admin", "admin123").is_none());
        assert!(directory.authenticate("admin", "ADMIN123").is_none());
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let directory = CredentialDirectory::seeded();
        assert!(directory.authenticate("admin", "wrongpass").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let record = UserRecord::new("admin", "admin123", "Administrator", Role::Admin);
        let debug_output = format!("{record:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("admin123"));
    }
}

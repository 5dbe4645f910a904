//! B2 account credentials.
//!
//! A [`Credentials`] value is the `(account, key)` pair a session was last
//! authorized with. The pair is always replaced as a whole.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// An account ID (or application key ID) with its application key.
#[derive(Clone)]
pub struct Credentials {
    account: String,
    key: SecretString,
}

impl Credentials {
    /// Create a new credential pair.
    pub fn new(account: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            key: SecretString::new(key.into()),
        }
    }

    /// Get the account ID.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Get the application key.
    ///
    /// Note: This exposes the secret. Use carefully and avoid logging.
    pub fn key(&self) -> &str {
        self.key.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("account-id", "app-key");
        assert_eq!(creds.account(), "account-id");
        assert_eq!(creds.key(), "app-key");
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = Credentials::new("account-id", "app-key");
        let debug = format!("{:?}", creds);

        assert!(debug.contains("account-id"));
        assert!(!debug.contains("app-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}

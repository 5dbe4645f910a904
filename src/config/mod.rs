//! Configuration types for the resilient B2 session.
//!
//! This module provides the `B2Config` type: optional account credentials
//! and the backoff and reauthorization settings used by every resilient
//! operation.

use crate::credentials::Credentials;
use crate::error::{B2Error, ConfigurationError};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default first wait of a fresh retry loop.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Default wait above which backoff stops doubling.
pub const DEFAULT_ADDITIVE_THRESHOLD: Duration = Duration::from_secs(15);

/// Configuration for a B2 session.
#[derive(Clone)]
pub struct B2Config {
    /// Account ID or application key ID used by `authorize_from_config`.
    pub account_id: Option<String>,

    /// Application key used by `authorize_from_config`.
    pub application_key: Option<SecretString>,

    /// Wait before the first retry of every resilient operation.
    pub initial_backoff: Duration,

    /// Waits longer than this grow additively instead of doubling.
    pub additive_threshold: Duration,

    /// Serialize reauthorization per session, skipping a reauthorization
    /// when another caller already refreshed the token.
    pub serialize_reauth: bool,
}

impl std::fmt::Debug for B2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("B2Config")
            .field("account_id", &self.account_id)
            .field("initial_backoff", &self.initial_backoff)
            .field("additive_threshold", &self.additive_threshold)
            .field("serialize_reauth", &self.serialize_reauth)
            // Intentionally omit application_key for security
            .finish_non_exhaustive()
    }
}

impl Default for B2Config {
    fn default() -> Self {
        Self {
            account_id: None,
            application_key: None,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            additive_threshold: DEFAULT_ADDITIVE_THRESHOLD,
            serialize_reauth: true,
        }
    }
}

impl B2Config {
    /// Create a new configuration builder.
    pub fn builder() -> B2ConfigBuilder {
        B2ConfigBuilder::default()
    }

    /// The configured credential pair, if both halves are present.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.account_id, &self.application_key) {
            (Some(account), Some(key)) => {
                Some(Credentials::new(account.clone(), key.expose_secret().clone()))
            }
            _ => None,
        }
    }
}

/// Builder for B2 configuration.
#[derive(Default)]
pub struct B2ConfigBuilder {
    account_id: Option<String>,
    application_key: Option<SecretString>,
    initial_backoff: Option<Duration>,
    additive_threshold: Option<Duration>,
    serialize_reauth: Option<bool>,
}

impl B2ConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account ID and application key.
    pub fn credentials(mut self, account_id: impl Into<String>, key: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self.application_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set the initial backoff delay.
    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = Some(delay);
        self
    }

    /// Set the threshold above which backoff grows additively.
    pub fn additive_threshold(mut self, threshold: Duration) -> Self {
        self.additive_threshold = Some(threshold);
        self
    }

    /// Enable or disable reauthorization serialization.
    pub fn serialize_reauth(mut self, enabled: bool) -> Self {
        self.serialize_reauth = Some(enabled);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        if let Ok(account) = std::env::var("B2_ACCOUNT_ID") {
            self.account_id = Some(account);
        }
        if let Ok(key) = std::env::var("B2_APPLICATION_KEY") {
            self.application_key = Some(SecretString::new(key));
        }

        if let Ok(val) = std::env::var("B2_INITIAL_BACKOFF_MS") {
            if let Ok(ms) = val.parse() {
                self.initial_backoff = Some(Duration::from_millis(ms));
            }
        }
        if let Ok(val) = std::env::var("B2_SERIALIZE_REAUTH") {
            self.serialize_reauth = Some(val.to_lowercase() == "true");
        }

        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<B2Config, B2Error> {
        let defaults = B2Config::default();

        let initial_backoff = self.initial_backoff.unwrap_or(defaults.initial_backoff);
        if initial_backoff.is_zero() {
            return Err(B2Error::Configuration(
                ConfigurationError::InvalidConfiguration {
                    field: "initial_backoff".to_string(),
                    message: "Initial backoff must be greater than zero".to_string(),
                },
            ));
        }

        let additive_threshold = self
            .additive_threshold
            .unwrap_or(defaults.additive_threshold);
        if additive_threshold < initial_backoff {
            return Err(B2Error::Configuration(
                ConfigurationError::InvalidConfiguration {
                    field: "additive_threshold".to_string(),
                    message: format!(
                        "Additive threshold must be at least the initial backoff ({:?})",
                        initial_backoff
                    ),
                },
            ));
        }

        Ok(B2Config {
            account_id: self.account_id,
            application_key: self.application_key,
            initial_backoff,
            additive_threshold,
            serialize_reauth: self.serialize_reauth.unwrap_or(defaults.serialize_reauth),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = B2Config::default();
        assert_eq!(config.initial_backoff, Duration::from_millis(500));
        assert_eq!(config.additive_threshold, Duration::from_secs(15));
        assert!(config.serialize_reauth);
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_builder() {
        let config = B2Config::builder()
            .credentials("account", "key")
            .initial_backoff(Duration::from_millis(100))
            .serialize_reauth(false)
            .build()
            .unwrap();

        assert_eq!(config.initial_backoff, Duration::from_millis(100));
        assert!(!config.serialize_reauth);

        let creds = config.credentials().unwrap();
        assert_eq!(creds.account(), "account");
        assert_eq!(creds.key(), "key");
    }

    #[test]
    fn test_zero_initial_backoff_rejected() {
        let result = B2Config::builder().initial_backoff(Duration::ZERO).build();
        assert!(matches!(
            result,
            Err(B2Error::Configuration(ConfigurationError::InvalidConfiguration { .. }))
        ));
    }

    #[test]
    fn test_threshold_below_initial_rejected() {
        let result = B2Config::builder()
            .initial_backoff(Duration::from_secs(2))
            .additive_threshold(Duration::from_secs(1))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_omits_key() {
        let config = B2Config::builder()
            .credentials("account", "super-secret")
            .build()
            .unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("account"));
        assert!(!debug.contains("super-secret"));
    }
}

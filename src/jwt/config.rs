use chrono::Duration;
use std::fmt;

use crate::AuthError;
use crate::config::TokenConfig;

/// Minimum required length for the signing secret in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 signing secret.
    pub(crate) secret: String,
    pub(crate) access_expiry: Duration,
    pub(crate) issuer: Option<String>,
    pub(crate) audience: Option<String>,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_expiry", &self.access_expiry)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the secret is shorter than 32 bytes.
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        Self::from_token_config(secret, &TokenConfig::default())
    }

    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the secret is shorter than 32 bytes.
    pub fn from_token_config(
        secret: impl Into<String>,
        tokens: &TokenConfig,
    ) -> Result<Self, AuthError> {
        let secret = secret.into();

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::ConfigurationError(format!(
                "JWT secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            access_expiry: tokens.access_token_expiry,
            issuer: tokens.issuer.clone(),
            audience: tokens.audience.clone(),
        })
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.access_expiry = expiry;
        self
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn expiry(&self) -> Duration {
        self.access_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let err = JwtConfig::new("too-short").unwrap_err();
        assert!(matches!(err, AuthError::ConfigurationError(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("test-secret-32-bytes-long-key-01").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-secret"));
    }

    #[test]
    fn test_from_token_config() {
        let tokens = TokenConfig {
            access_token_expiry: Duration::minutes(5),
            issuer: Some("teamgate".into()),
            audience: None,
        };
        let config = JwtConfig::from_token_config("test-secret-32-bytes-long-key-01", &tokens)
            .unwrap();
        assert_eq!(config.expiry(), Duration::minutes(5));
        assert_eq!(config.issuer.as_deref(), Some("teamgate"));
    }
}

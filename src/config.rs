//! Configuration types.
//!
//! ```rust
//! use teamgate::config::{TeamgateConfig, TokenConfig};
//! use chrono::Duration;
//!
//! let config = TeamgateConfig {
//!     tokens: TokenConfig {
//!         access_token_expiry: Duration::hours(1),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert_eq!(config.password.min_length, 8);
//! ```

use chrono::Duration;

use crate::validators::PasswordPolicy;

#[derive(Debug, Clone, Default)]
pub struct TeamgateConfig {
    pub tokens: TokenConfig,
    /// Rules applied to passwords at registration.
    pub password: PasswordPolicy,
}

impl TeamgateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Long-lived tokens for local work.
    pub fn development() -> Self {
        Self {
            tokens: TokenConfig {
                access_token_expiry: Duration::hours(24),
                ..Default::default()
            },
            password: PasswordPolicy::default(),
        }
    }

    pub fn strict() -> Self {
        Self {
            tokens: TokenConfig {
                access_token_expiry: Duration::minutes(15),
                ..Default::default()
            },
            password: PasswordPolicy::strict(),
        }
    }
}

/// Claims and lifetime of issued access tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Default: 1 hour
    pub access_token_expiry: Duration,
    /// `iss` claim, validated on decode when set.
    pub issuer: Option<String>,
    /// `aud` claim, validated on decode when set.
    pub audience: Option<String>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: Duration::hours(1),
            issuer: None,
            audience: None,
        }
    }
}

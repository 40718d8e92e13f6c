//! JWT access tokens carrying the caller's identity.
//!
//! ```rust
//! use teamgate::jwt::{JwtConfig, JwtService};
//! use teamgate::Identity;
//!
//! let config = JwtConfig::new("a-secret-that-is-at-least-32-bytes!!")
//!     .unwrap()
//!     .with_issuer("teamgate");
//! let service = JwtService::new(config);
//!
//! let identity = Identity::new(uuid::Uuid::new_v4(), "ada@example.com", Some("admin".into()));
//! let issued = service.issue(&identity).unwrap();
//! let verified = service.verify(issued.token.expose_secret()).unwrap();
//! assert!(verified.is_global_admin());
//! ```

mod claims;
mod config;
mod service;

pub use claims::{JwtClaims, TokenType};
pub use config::{JwtConfig, MIN_SECRET_LENGTH};
pub use service::{IssuedToken, JwtService};

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{JwtClaims, JwtConfig, TokenType};
use crate::{AuthError, Identity, SecretString};

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Signs an access token for the identity.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.config.expiry();

        let claims = JwtClaims {
            sub: identity.user_id.to_string(),
            email: identity.email.clone(),
            role: identity.global_role.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            token_type: TokenType::Access,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("failed to sign token: {e}")))?;

        Ok(IssuedToken {
            token: SecretString::new(token),
            expires_at,
        })
    }

    /// Decodes and validates a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);

        if let Some(ref iss) = self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        if let Some(ref aud) = self.config.audience {
            validation.set_audience(&[aud]);
        }

        let token_data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        Ok(token_data.claims)
    }

    /// Verifies a token and resolves the identity it carries.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.decode(token)?;
        Identity::from_claims(&claims)
    }

    pub fn expiry(&self) -> chrono::Duration {
        self.config.expiry()
    }
}

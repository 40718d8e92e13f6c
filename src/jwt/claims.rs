use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject - the user ID.
    pub sub: String,
    pub email: String,
    /// Global role of the user at issue time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    #[serde(rename = "typ", default = "default_token_type")]
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

fn default_token_type() -> TokenType {
    TokenType::Access
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        self.sub.parse().map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parses_uuid() {
        let id = Uuid::new_v4();
        let claims = JwtClaims {
            sub: id.to_string(),
            email: "a@example.com".into(),
            role: None,
            exp: 0,
            iat: 0,
            token_type: TokenType::Access,
            iss: None,
            aud: None,
        };
        assert_eq!(claims.user_id().unwrap(), id);

        let bad = JwtClaims {
            sub: "42".into(),
            ..claims
        };
        assert_eq!(bad.user_id().unwrap_err(), AuthError::TokenInvalid);
    }

    #[test]
    fn test_missing_role_deserializes_as_none() {
        let json = r#"{"sub":"x","email":"a@example.com","exp":1,"iat":0}"#;
        let claims: JwtClaims = serde_json::from_str(json).unwrap();
        assert!(claims.role.is_none());
        assert_eq!(claims.token_type, TokenType::Access);
    }
}

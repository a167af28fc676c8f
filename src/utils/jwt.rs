use crate::{config::jwt::JwtConfig, models::MemberRole};
use anyhow::Result;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub member_id: i32,
    pub role: MemberRole,
    #[serde(rename = "type")]
    pub token_type: String,
    pub exp: usize, // expiration time
    pub iat: usize, // issued at
}

/// Why a token was refused. Only logged; callers all see the same 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token malformed")]
    Malformed,
}

/// Issues and verifies HS256 access tokens with the server secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_token_expiry: u64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
        }
    }

    pub fn access_token_expiry(&self) -> u64 {
        self.access_token_expiry
    }

    pub fn issue_token(&self, member_id: i32, role: MemberRole) -> Result<String> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            member_id,
            role,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: now + self.access_token_expiry as usize,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::Malformed);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a_very_long_secret_key_that_is_at_least_32_chars";

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new(SECRET, 3600).unwrap())
    }

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_verify_round_trip() {
        let tokens = service();
        let token = tokens.issue_token(42, MemberRole::Cook).unwrap();
        let claims = tokens.verify_token(&token).unwrap();
        assert_eq!(claims.member_id, 42);
        assert_eq!(claims.role, MemberRole::Cook);
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let claims = Claims {
            member_id: 7,
            role: MemberRole::Admin,
            token_type: "access".into(),
            exp: 10,
            iat: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["member_id"], 7);
        assert_eq!(json["role"], "ADMIN");
        assert_eq!(json["type"], "access");
    }

    #[test]
    fn tampered_token_is_malformed() {
        let tokens = service();
        let token = tokens.issue_token(42, MemberRole::Gourmet).unwrap();
        // Flip a character in the middle of the token
        let mut chars: Vec<char> = token.chars().collect();
        let mid = chars.len() / 2;
        chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();
        assert_eq!(tokens.verify_token(&tampered).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let other = TokenService::new(&JwtConfig::new("b".repeat(40), 3600).unwrap());
        let token = other.issue_token(1, MemberRole::Gourmet).unwrap();
        assert_eq!(service().verify_token(&token).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn expired_token_reports_expired() {
        let now = chrono::Utc::now().timestamp() as usize;
        let token = sign(&Claims {
            member_id: 42,
            role: MemberRole::Gourmet,
            token_type: "access".into(),
            exp: now - 3600, // expired 1 hour ago
            iat: now - 7200,
        });
        assert_eq!(service().verify_token(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn non_access_type_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let token = sign(&Claims {
            member_id: 42,
            role: MemberRole::Gourmet,
            token_type: "refresh".into(),
            exp: now + 3600,
            iat: now,
        });
        assert_eq!(service().verify_token(&token).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn empty_token_fails() {
        assert!(service().verify_token("").is_err());
    }
}

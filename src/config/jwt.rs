use anyhow::Result;
use std::env;

/// Access tokens live for a day unless overridden.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: u64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;

        let access_token_expiry = env::var("JWT_ACCESS_EXPIRATION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY);

        Self::new(secret, access_token_expiry)
    }

    pub fn new(secret: impl Into<String>, access_token_expiry: u64) -> Result<Self> {
        let secret = secret.into();
        if secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters"
            ));
        }
        if access_token_expiry == 0 {
            return Err(anyhow::anyhow!("JWT_ACCESS_EXPIRATION must be > 0"));
        }

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_rejected() {
        assert!(JwtConfig::new("too-short", 60).is_err());
    }

    #[test]
    fn zero_expiry_rejected() {
        assert!(JwtConfig::new("a".repeat(32), 0).is_err());
    }
}

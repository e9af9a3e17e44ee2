use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use contracts::system::auth::TokenClaims;

use super::jwt::{generate_jwt_secret, JwtKeys};
use super::password;
use crate::shared::config::Config;

/// The single backoffice account and the keys its tokens are signed with
pub struct AdminAuth {
    email: String,
    password_hash: String,
    keys: JwtKeys,
}

impl AdminAuth {
    pub fn new(email: &str, password_hash: String, keys: JwtKeys) -> Self {
        Self {
            email: email.trim().to_string(),
            password_hash,
            keys,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let password_hash = match (&config.admin.password_hash, &config.admin.password) {
            (Some(hash), _) => hash.clone(),
            (None, Some(plain)) => password::hash_password(plain)?,
            (None, None) => return Err(anyhow!("admin password is not configured")),
        };

        let secret = match &config.auth.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "No JWT secret configured, generated a random one; tokens will not survive a restart"
                );
                generate_jwt_secret()
            }
        };

        Ok(Self::new(
            &config.admin.email,
            password_hash,
            JwtKeys::new(&secret, config.auth.token_lifetime_hours),
        ))
    }

    pub fn verify_credentials(&self, email: &str, password: &str) -> bool {
        if email.trim() != self.email {
            return false;
        }
        match password::verify_password(password, &self.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Admin password hash is unusable: {}", e);
                false
            }
        }
    }

    pub fn issue_token(&self) -> Result<(String, DateTime<Utc>)> {
        self.keys.generate_access_token(&self.email)
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenClaims> {
        let claims = self.keys.validate_token(token)?;
        if !claims.is_admin() {
            return Err(anyhow!("token does not carry the admin role"));
        }
        Ok(claims)
    }
}

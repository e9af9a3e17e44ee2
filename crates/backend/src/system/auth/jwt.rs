use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

/// HS256 signing keys for admin access tokens
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: chrono::Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: chrono::Duration::hours(lifetime_hours.max(1)),
        }
    }

    /// Generate an admin access token; returns the token and its expiry
    pub fn generate_access_token(&self, subject: &str) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + self.lifetime;

        let claims = TokenClaims {
            sub: subject.to_string(),
            role: TokenClaims::ADMIN_ROLE.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .context("Failed to encode JWT token")?;
        Ok((token, expires_at))
    }

    /// Validate JWT token (signature and expiry) and extract claims
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(token, &self.decoding, &Validation::default())
            .context("Failed to decode JWT token")?;
        Ok(token_data.claims)
    }
}

/// Generate a cryptographically secure JWT secret (256 bits)
pub fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_claims() {
        let keys = JwtKeys::new("test-secret", 1);
        let (token, expires_at) = keys.generate_access_token("admin@shop.in").unwrap();
        let claims = keys.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "admin@shop.in");
        assert!(claims.is_admin());
        assert_eq!(claims.exp, expires_at.timestamp() as usize);
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let ours = JwtKeys::new("secret-a", 1);
        let theirs = JwtKeys::new("secret-b", 1);
        let (token, _) = theirs.generate_access_token("admin@shop.in").unwrap();
        assert!(ours.validate_token(&token).is_err());
        assert!(ours.validate_token("admin-token-1700000000").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let keys = JwtKeys::new("test-secret", 1);
        let past = Utc::now() - chrono::Duration::hours(2);
        let claims = TokenClaims {
            sub: "admin@shop.in".into(),
            role: TokenClaims::ADMIN_ROLE.into(),
            exp: past.timestamp() as usize,
            iat: (past - chrono::Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(keys.validate_token(&token).is_err());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_jwt_secret();
        let b = generate_jwt_secret();
        assert_eq!(a.len(), 44);
        assert_ne!(a, b);
    }
}

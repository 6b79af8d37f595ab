use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user_id as string)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

/// Issues and verifies the bearer tokens the gateway trusts.
pub struct AuthService {
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// Issue a JWT for a user id
    pub fn issue_token(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::hours(self.token_ttl_hours))
            .ok_or_else(|| anyhow::anyhow!("Token TTL overflow"))?
            .timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Verify a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trip() {
        let svc = AuthService::new("unit-test-secret".to_string(), 1);
        let token = svc.issue_token(42).unwrap();
        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let issuer = AuthService::new("secret-a".to_string(), 1);
        let verifier = AuthService::new("secret-b".to_string(), 1);
        let token = issuer.issue_token(7).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let svc = AuthService::new("unit-test-secret".to_string(), 1);
        assert!(svc.verify_token("not.a.jwt").is_err());
    }
}

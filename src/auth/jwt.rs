use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a password-reset token, in minutes. The same window is
/// enforced twice: as the JWT `exp` and as the expiry stored on the user row.
pub const RESET_TOKEN_MINUTES: i64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(jsonwebtoken::errors::Error),
    /// Signature checks out but the clock is past `exp`. Kept separate from
    /// [`JwtError::Invalid`] so clients can distinguish "refresh and retry"
    /// from "re-login required".
    #[error("Token expired")]
    Expired,
    #[error("Token verification failed: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Access token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Password-reset token claims. Carries the account email instead of the id,
/// matching the link sent by email.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResetClaims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_minutes: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiration_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            expiration_minutes,
        }
    }

    /// Signs a short-lived access token with the configured lifetime.
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.generate_token(user_id, self.expiration_minutes)
    }

    pub fn generate_token(
        &self,
        user_id: Uuid,
        expires_in_minutes: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(expires_in_minutes)).timestamp();

        let claims = Claims {
            sub: user_id,
            exp,
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(JwtError::GenerationFailed)
    }

    /// Opaque random refresh token. Not a JWT: it is only ever compared
    /// against the stored row, never decoded.
    pub fn generate_refresh_token(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(map_verify_error)
    }

    pub fn generate_reset_token(&self, email: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = ResetClaims {
            email: email.to_string(),
            exp: (now + Duration::minutes(RESET_TOKEN_MINUTES)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(JwtError::GenerationFailed)
    }

    pub fn verify_reset_token(&self, token: &str) -> Result<ResetClaims, JwtError> {
        decode(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(map_verify_error)
    }
}

fn map_verify_error(err: jsonwebtoken::errors::Error) -> JwtError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(err),
    }
}

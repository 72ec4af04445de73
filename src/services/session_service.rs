use crate::models::validation::email_field;
use crate::utils::error::{AppError, ValidationError};
use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "token";
pub const SESSION_TTL_DAYS: i64 = 365;

/// Registered claims are set by the server only; client copies are dropped.
const RESERVED_CLAIMS: [&str; 8] = ["email", "iat", "exp", "jti", "aud", "iss", "sub", "nbf"];

/// Claims carried by a session token: the caller's payload plus the
/// registered claims set at issue time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

/// Signs and verifies session tokens with the process-wide secret and
/// builds the cookies that carry them.
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    secure: bool,
}

impl SessionManager {
    /// `secure` selects production cookies: `Secure` and `SameSite=None`.
    pub fn new(secret: &str, secure: bool) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            secure,
        }
    }

    pub fn issue(&self, mut payload: Map<String, Value>) -> Result<IssuedSession, AppError> {
        let email = email_field(&payload, "email", "email", true)?
            .ok_or_else(|| ValidationError::new("email", "is required"))?;

        for claim in RESERVED_CLAIMS {
            payload.remove(claim);
        }

        let now = Utc::now();
        let claims = SessionClaims {
            email,
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            payload,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::ServerError(format!("Failed to sign session token: {}", e)))?;

        Ok(IssuedSession { token, claims })
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        if token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.validate_nbf = true;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::warn!("🔒 Rejected session token: {}", e);
                AppError::Unauthorized
            })
    }

    fn same_site(&self) -> SameSite {
        if self.secure {
            SameSite::None
        } else {
            SameSite::Strict
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site())
            .finish()
    }

    /// Expired, empty cookie with the same attributes as the session cookie
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

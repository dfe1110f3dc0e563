//! Session middleware.
//!
//! Sessions are issued elsewhere; this layer only verifies them. A token is
//! read from `Authorization: Bearer ...` first, then from the `session`
//! cookie. Any missing, malformed or expired token is a `Missing session`.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{AppError, AppResult, SessionConfig};
use domain::{Capabilities, Role, BEARER_TOKEN_PREFIX, SESSION_COOKIE};

use crate::state::AppState;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 keys for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_hours: i64,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            expiration_hours: config.expiration_hours,
        }
    }

    /// Sign a session for an account.
    pub fn issue(&self, account_id: &str, email: &str, role: Role) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            role,
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Session attached to a request after verification.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSession {
    pub account_id: String,
    pub email: String,
    pub role: Role,
}

impl CurrentSession {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this session may act on the given account.
    pub fn owns(&self, account_id: &str) -> bool {
        self.account_id == account_id
    }
}

impl From<Claims> for CurrentSession {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Fail with `Forbidden` unless the session's role grants `allowed`.
pub fn require_capability(
    session: &CurrentSession,
    allowed: impl Fn(&Capabilities) -> bool,
) -> AppResult<()> {
    if allowed(&session.role.capabilities()) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Verify the session and stash it in request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or(AppError::MissingSession)?;

    let claims = state.sessions.verify(&token).map_err(|e| {
        debug!("Rejected session token: {}", e);
        AppError::MissingSession
    })?;

    request.extensions_mut().insert(CurrentSession::from(claims));
    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: "x".repeat(32),
            expiration_hours: 1,
        })
    }

    #[test]
    fn test_issued_session_verifies() {
        let keys = keys();
        let token = keys.issue("a1", "agent@example.com", Role::Agent).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "a1");
        assert_eq!(claims.role, Role::Agent);
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = keys().issue("a1", "a@example.com", Role::Admin).unwrap();
        let other = SessionKeys::new(&SessionConfig {
            secret: "y".repeat(32),
            expiration_hours: 1,
        });
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_token_read_from_bearer_then_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("session=from-cookie"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_capability_check() {
        let session = CurrentSession {
            account_id: "c1".into(),
            email: "c@example.com".into(),
            role: Role::Client,
        };
        assert!(require_capability(&session, |c| c.manage_appointments).is_ok());
        assert!(matches!(
            require_capability(&session, |c| c.manage_accounts),
            Err(AppError::Forbidden)
        ));
    }
}

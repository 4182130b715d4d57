// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.
//!
//! Session tokens are minted after the external identity provider has
//! verified the user; the owner ID used everywhere in the API is the
//! provider's subject carried in `sub`.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie set by the web client.
pub const SESSION_COOKIE: &str = "liftlog_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity-provider user ID)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub owner_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl AuthUser {
    /// Reject requests that name an owner other than the session's.
    pub fn ensure_owner(&self, owner_id: &str) -> Result<(), AppError> {
        if self.owner_id == owner_id {
            Ok(())
        } else {
            tracing::warn!(
                session_owner = %self.owner_id,
                requested_owner = %owner_id,
                "Cross-owner access rejected"
            );
            Err(AppError::Forbidden)
        }
    }

    /// Same as [`AuthUser::ensure_owner`] for an optional body assertion.
    pub fn ensure_claimed_owner(&self, claimed: Option<&str>) -> Result<(), AppError> {
        claimed.map_or(Ok(()), |owner_id| self.ensure_owner(owner_id))
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            owner_id: claims.sub,
            display_name: claims.name,
            email: claims.email,
            avatar_url: claims.picture,
        }
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    let key = DecodingKey::from_secret(&state.config.jwt_signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::InvalidToken
    })?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(AppError::InvalidToken);
    }

    let auth_user = AuthUser::from(token_data.claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Create a JWT for a user session.
pub fn create_jwt(user: &AuthUser, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user.owner_id.clone(),
        name: user.display_name.clone(),
        email: user.email.clone(),
        picture: user.avatar_url.clone(),
        iat: now,
        exp: now + 30 * 24 * 60 * 60, // 30 days
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_round_trip_carries_profile() {
        let key = b"test_jwt_key_32_bytes_minimum!!";
        let user = AuthUser {
            owner_id: "google-123".to_string(),
            display_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            avatar_url: None,
        };

        let token = create_jwt(&user, key).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(key),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        assert_eq!(AuthUser::from(decoded.claims), user);
    }

    #[test]
    fn test_ensure_owner() {
        let user = AuthUser {
            owner_id: "u1".to_string(),
            display_name: None,
            email: None,
            avatar_url: None,
        };

        assert!(user.ensure_owner("u1").is_ok());
        assert!(matches!(user.ensure_owner("u2"), Err(AppError::Forbidden)));
        assert!(user.ensure_claimed_owner(None).is_ok());
        assert!(user.ensure_claimed_owner(Some("u2")).is_err());
    }
}

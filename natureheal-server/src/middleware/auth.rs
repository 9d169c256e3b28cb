//! Bearer-token extractors.
//!
//! Tokens are HS256 JWTs issued by the account service; the user id is in the
//! `id` claim. Handlers pick the extractor matching their access level:
//! [`AuthUser`], [`MaybeUser`] or [`AdminUser`].

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entities::{UserProfile, UserStore};
use crate::error::ServerError;
use crate::state::AppState;

const NO_TOKEN: &str = "Not authorized, no token";
const TOKEN_FAILED: &str = "Not authorized, token failed";
const NOT_ADMIN: &str = "Not authorized as an admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserProfile);

/// An authenticated caller, or `None` for anonymous / invalid credentials.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserProfile>);

/// An authenticated caller with the `admin` role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserProfile);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<UserProfile, ServerError> {
    let token = bearer_token(parts).ok_or_else(|| ServerError::Unauthorized(NO_TOKEN.into()))?;
    let Some(secret) = state.config.jwt_secret.as_deref() else {
        warn!("bearer token presented but JWT_SECRET is not configured");
        return Err(ServerError::Unauthorized(TOKEN_FAILED.into()));
    };
    let claims = verify_token(token, secret).map_err(|e| {
        debug!(error = %e, "token verification failed");
        ServerError::Unauthorized(TOKEN_FAILED.into())
    })?;
    state
        .store
        .get_user(&claims.id)
        .await?
        .ok_or_else(|| ServerError::Unauthorized(TOKEN_FAILED.into()))
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(AuthUser)
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if bearer_token(parts).is_none() {
            return Ok(MaybeUser(None));
        }
        match authenticate(parts, state).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(e) => {
                debug!(error = %e, "treating caller as anonymous");
                Ok(MaybeUser(None))
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;
        if !user.is_admin() {
            return Err(ServerError::Unauthorized(NOT_ADMIN.into()));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
pub(crate) fn issue_test_token(secret: &str, user_id: &str) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        id: user_id.to_owned(),
        exp: now + 3600,
        iat: Some(now),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode test token")
}

//! Bearer token authentication.
//!
//! Handles credential checks, token issuance and the request extractor that
//! guards the receipt routes.

use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT claims structure.
///
/// There is no `iat` or `exp`, so a given user always receives the same token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Token type ("access")
    pub token_type: String,
}

/// Issues and validates HS256 access tokens.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenManager {
    pub fn new(secret: &str) -> Self {
        TokenManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate an access token for `username`.
    pub fn issue_access_token(&self, username: &str) -> Result<String, ApiError> {
        let claims = Claims {
            sub: username.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate a token and check that it is an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| ApiError::unauthenticated(format!("Invalid token: {}", e)))?
            .claims;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(ApiError::unauthenticated("Expected access token"));
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager").finish_non_exhaustive()
    }
}

/// Extract bearer token from authorization header.
///
/// The scheme is matched case-insensitively, so the `bearer` returned by
/// `POST /token` works as well as `Bearer`.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.trim().split_once(char::is_whitespace)?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// A user known to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub disabled: bool,
}

/// Source of truth for who may obtain a token.
pub trait CredentialVerifier: Send + Sync {
    /// Returns the user when `username` and `password` match.
    fn authenticate(&self, username: &str, password: &str) -> Option<User>;

    /// Looks up an active user by name.
    fn find_user(&self, username: &str) -> Option<User>;
}

/// A single configured user whose password is kept only as an Argon2 hash.
pub struct StaticCredentials {
    user: User,
    password_hash: String,
}

impl StaticCredentials {
    /// Hashes `password` and keeps the hash.
    pub fn new(user: User, password: &str) -> Result<Self, ApiError> {
        Ok(StaticCredentials {
            user,
            password_hash: hash_password(password)?,
        })
    }
}

impl CredentialVerifier for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        if username != self.user.username || self.user.disabled {
            return None;
        }
        if !verify_password(password, &self.password_hash) {
            return None;
        }
        Some(self.user.clone())
    }

    fn find_user(&self, username: &str) -> Option<User> {
        (username == self.user.username && !self.user.disabled).then(|| self.user.clone())
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against its hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Extractor for handlers that require a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthenticated("Missing Authorization header"))?
            .to_str()
            .map_err(|_| ApiError::unauthenticated("Authorization header is not valid text"))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::unauthenticated("Expected a bearer token"))?;

        let claims = state.tokens.validate_access_token(token)?;

        let user = state
            .credentials
            .find_user(&claims.sub)
            .ok_or_else(|| ApiError::unauthenticated("Unknown or disabled user"))?;

        debug!(username = %user.username, "Request authenticated");
        Ok(AuthenticatedUser(user))
    }
}

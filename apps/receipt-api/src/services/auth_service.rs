//! Token endpoint.
//!
//! Exchanges a username and password for a bearer token.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Form body of `POST /token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /token`
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(request) = form?;

    info!(username = %request.username, "Token request");

    let user = match state
        .credentials
        .authenticate(&request.username, &request.password)
    {
        Some(user) => user,
        None => {
            warn!(username = %request.username, "Incorrect username or password");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let access_token = state.tokens.issue_access_token(&user.username)?;

    info!(username = %user.username, "Token issued successfully");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

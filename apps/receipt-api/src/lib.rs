//! # Receipt API
//!
//! HTTP server that scores receipts.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Receipt API Routes                              │
//! │                                                                         │
//! │  ┌────────────────┐  ┌──────────────────────────┐  ┌────────────────┐  │
//! │  │  auth_service  │  │  receipt_service         │  │ health_service │  │
//! │  │                │  │                          │  │                │  │
//! │  │ • POST /token  │  │ • POST /receipts/process │  │ • GET /        │  │
//! │  │                │  │ • GET /receipts/{id}/    │  │ • GET /health  │  │
//! │  │                │  │         points           │  │                │  │
//! │  └────────────────┘  └──────────────────────────┘  └────────────────┘  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                          AppState                                 │  │
//! │  │   Arc<dyn ReceiptStore> • Arc<dyn CredentialVerifier> • tokens   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `BIND_ADDR` - Address to bind (default: 0.0.0.0)
//! - `PORT` - HTTP port (default: 8000)
//! - `JWT_SECRET` - Secret for token signing
//! - `AUTH_USERNAME` / `AUTH_PASSWORD` - The one user allowed to log in
//! - `AUTH_FULL_NAME` / `AUTH_EMAIL` - Profile of that user
//! - `RUST_LOG` - Log filter (default: info)

pub mod auth;
pub mod config;
pub mod error;
pub mod payload;
pub mod services;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use receipt_store::{InMemoryReceiptStore, ReceiptStore};
use tower_http::trace::TraceLayer;

use crate::auth::{CredentialVerifier, StaticCredentials, TokenManager, User};
use crate::services::{auth_service, health_service, receipt_service};

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;

/// Shared application state.
pub struct AppState {
    pub store: Arc<dyn ReceiptStore>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub tokens: TokenManager,
}

impl AppState {
    pub fn new(
        jwt_secret: &str,
        store: Arc<dyn ReceiptStore>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        AppState {
            store,
            credentials,
            tokens: TokenManager::new(jwt_secret),
        }
    }

    /// Builds state with an empty in-memory store and the configured user.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let user = User {
            username: config.auth_username.clone(),
            full_name: config.auth_full_name.clone(),
            email: config.auth_email.clone(),
            disabled: false,
        };
        let credentials = StaticCredentials::new(user, &config.auth_password)?;

        Ok(AppState::new(
            &config.jwt_secret,
            Arc::new(InMemoryReceiptStore::new()),
            Arc::new(credentials),
        ))
    }
}

/// Builds the router with every route and the request trace layer.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_service::index))
        .route("/health", get(health_service::health))
        .route("/token", post(auth_service::issue_token))
        .route("/receipts/process", post(receipt_service::process_receipt))
        .route("/receipts/{id}/points", get(receipt_service::get_points))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

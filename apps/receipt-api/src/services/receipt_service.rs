//! Receipt endpoints.
//!
//! ## Request Flow
//! ```text
//! POST /receipts/process
//!   AuthenticatedUser ─► Json<Value> ─► payload::validate_body
//!                                                    │
//!                                    calculate_points ◄┘
//!                                          │
//!                                   store.put ─► { id, points, breakdown }
//!
//! GET /receipts/{id}/points
//!   AuthenticatedUser ─► store.get(id) ─► { points } | 404
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use receipt_core::{calculate_points, PointsBreakdown};
use receipt_store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::payload::validate_body;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: String,
    pub points: u64,
    pub breakdown: PointsBreakdown,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// `POST /receipts/process`
pub async fn process_receipt(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProcessReceiptResponse>, ApiError> {
    let Json(body) = body?;

    let receipt = validate_body(&body).map_err(|errors| {
        warn!(
            username = %user.username,
            errors = errors.len(),
            "Rejected invalid receipt"
        );
        errors
    })?;

    let breakdown = calculate_points(&receipt);
    let points = breakdown.total();
    let retailer = receipt.retailer.clone();

    let id = state.store.put(receipt, points, breakdown)?;

    info!(
        id = %id,
        retailer = %retailer,
        points,
        "Processed receipt"
    );

    Ok(Json(ProcessReceiptResponse {
        id,
        points,
        breakdown,
    }))
}

/// `GET /receipts/{id}/points`
pub async fn get_points(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    match state.store.get(&id) {
        Ok(stored) => Ok(Json(PointsResponse {
            points: stored.points,
        })),
        Err(err @ StoreError::NotFound { .. }) => {
            warn!(id = %id, "Receipt not found");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

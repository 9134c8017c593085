//! # In-Memory Receipt Store
//!
//! ## Thread Safety
//! The map is wrapped in `RwLock` because:
//! 1. Request handlers run concurrently on the Tokio runtime
//! 2. Lookups vastly outnumber inserts and can proceed in parallel
//! 3. Inserts are a single `HashMap::insert`, so the write lock is brief
//!
//! No ordering is guaranteed between concurrent submissions.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use receipt_core::{PointsBreakdown, Receipt, StoredReceipt};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::ReceiptStore;

/// Process-lifetime receipt store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    receipts: RwLock<HashMap<String, StoredReceipt>>,
}

impl InMemoryReceiptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryReceiptStore {
            receipts: RwLock::new(HashMap::new()),
        }
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, receipt: Receipt, points: u64, breakdown: PointsBreakdown) -> StoreResult<String> {
        let breakdown_total = breakdown.total();
        if points != breakdown_total {
            return Err(StoreError::InconsistentPoints {
                points,
                breakdown_total,
            });
        }

        let mut receipts = self.receipts.write().map_err(|_| StoreError::LockPoisoned)?;

        // A v4 collision is astronomically unlikely, but ids must never be reused.
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if let Entry::Vacant(slot) = receipts.entry(candidate.clone()) {
                slot.insert(StoredReceipt {
                    id: candidate.clone(),
                    receipt,
                    points,
                    breakdown,
                    created_at: Utc::now(),
                });
                break candidate;
            }
        };

        debug!(id = %id, points, stored = receipts.len(), "Stored receipt");
        Ok(id)
    }

    fn get(&self, id: &str) -> StoreResult<StoredReceipt> {
        let receipts = self.receipts.read().map_err(|_| StoreError::LockPoisoned)?;
        receipts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn len(&self) -> StoreResult<usize> {
        let receipts = self.receipts.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(receipts.len())
    }
}

//! # receipt-store: Receipt Storage
//!
//! Keeps scored receipts for the lifetime of the process.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Data Flow                                │
//! │                                                                         │
//! │  POST /receipts/process                                                │
//! │       │  validate → calculate_points                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   receipt-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ReceiptStore trait  ◄──  InMemoryReceiptStore                 │   │
//! │  │   put / get / len          RwLock<HashMap<id, StoredReceipt>>   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       ▲                                                                 │
//! │       │  get(id)                                                        │
//! │  GET /receipts/{id}/points                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is an explicit object: construct one per process and hand it
//! to request handlers as `Arc<dyn ReceiptStore>`. There is no global.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use receipt_store::{InMemoryReceiptStore, ReceiptStore};
//!
//! let store = InMemoryReceiptStore::new();
//! let breakdown = calculate_points(&receipt);
//! let id = store.put(receipt, breakdown.total(), breakdown)?;
//! let stored = store.get(&id)?;
//! ```

pub mod error;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryReceiptStore;

use receipt_core::{PointsBreakdown, Receipt, StoredReceipt};

/// Storage for scored receipts.
///
/// Implementations must be safe to share across request handlers.
/// Records are immutable once stored; there is no update or delete.
pub trait ReceiptStore: Send + Sync {
    /// Stores a scored receipt under a freshly generated id and returns it.
    ///
    /// `points` must equal `breakdown.total()`.
    fn put(&self, receipt: Receipt, points: u64, breakdown: PointsBreakdown) -> StoreResult<String>;

    /// Looks up a stored receipt. Unknown ids are `StoreError::NotFound`.
    fn get(&self, id: &str) -> StoreResult<StoredReceipt>;

    /// Number of stored receipts.
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

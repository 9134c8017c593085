//! # receipt-core: Pure Business Logic for Receipt Points
//!
//! This crate is the **heart** of the receipt points service. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Points Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Clients                                 │   │
//! │  │    POST /token ──► POST /receipts/process ──► GET .../points    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    receipt-api (axum)                           │   │
//! │  │    auth, extractors, handlers, error responses                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ receipt-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │  points   │  │   │
//! │  │   │  Receipt  │  │   Money   │  │  payload  │  │  six      │  │   │
//! │  │   │  Item     │  │  parsing  │  │  → Receipt│  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    receipt-store                                │   │
//! │  │              id → StoredReceipt, process lifetime               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Receipt, Item, PointsBreakdown, StoredReceipt)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Payload validation
//! - [`points`] - The scoring rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same receipt in, same breakdown out
//! 2. **No I/O**: storage, network and clock access are FORBIDDEN here
//! 3. **Integer Money**: amounts are cents (i64), so `% 25` is exact
//! 4. **Explicit Errors**: validation errors are typed and name their field
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::{calculate_points, validate_receipt, ItemPayload, ReceiptPayload};
//!
//! let payload = ReceiptPayload {
//!     retailer: Some("M&M Corner Market".into()),
//!     purchase_date: Some("2022-03-20".into()),
//!     purchase_time: Some("14:33".into()),
//!     items: Some(vec![
//!         ItemPayload { short_description: Some("Gatorade".into()), price: Some("2.25".into()) };
//!         4
//!     ]),
//!     total: Some("9.00".into()),
//! };
//!
//! let receipt = validate_receipt(&payload).unwrap();
//! assert_eq!(calculate_points(&receipt).total(), 109);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod points;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationErrors};
pub use money::Money;
pub use points::calculate_points;
pub use types::*;
pub use validation::validate_receipt;

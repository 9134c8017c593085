//! # Domain Types
//!
//! Core domain types used throughout the receipt points service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  validate   ┌─────────────────┐                    │
//! │  │ ReceiptPayload  │ ──────────► │    Receipt      │                    │
//! │  │  ─────────────  │             │  ─────────────  │                    │
//! │  │  raw strings    │             │  retailer       │                    │
//! │  │  (all optional) │             │  purchase_date  │                    │
//! │  └─────────────────┘             │  purchase_time  │                    │
//! │                                  │  items: [Item]  │                    │
//! │                                  │  total: Money   │                    │
//! │                                  └────────┬────────┘                    │
//! │                                           │ calculate_points            │
//! │                                           ▼                             │
//! │  ┌─────────────────┐             ┌─────────────────┐                    │
//! │  │  StoredReceipt  │ ◄────────── │ PointsBreakdown │                    │
//! │  │  id, points,    │    store    │  six rule keys  │                    │
//! │  │  created_at     │             └─────────────────┘                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Wire Payloads
// =============================================================================

/// A receipt exactly as submitted, before validation.
///
/// Every field is optional so that a missing field is reported by
/// [`validate_receipt`](crate::validation::validate_receipt) alongside all
/// other problems instead of failing deserialization on the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    pub retailer: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_time: Option<String>,
    pub items: Option<Vec<ItemPayload>>,
    pub total: Option<String>,
}

/// A line item exactly as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub short_description: Option<String>,
    pub price: Option<String>,
}

// =============================================================================
// Receipt
// =============================================================================

/// A purchased line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Trimmed description.
    pub short_description: String,
    pub price: Money,
}

/// A validated purchase receipt.
///
/// ## Invariants
/// - `retailer` is trimmed and non-empty
/// - `items` is non-empty
/// - every price and the total are positive
///
/// `total` is not reconciled against the sum of item prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub purchase_time: NaiveTime,
    pub items: Vec<Item>,
    pub total: Money,
}

/// Serializes purchase times as `HH:MM`, the way receipts are submitted.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::validation::parse_purchase_time(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Points Breakdown
// =============================================================================

/// Contribution of each scoring rule.
///
/// All six keys are always serialized, zero when a rule did not fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub retailer_points: u64,
    pub round_dollar_points: u64,
    #[serde(rename = "multiple_of_0.25_points")]
    pub multiple_of_quarter_points: u64,
    /// Pair bonus plus the description-length surcharge.
    pub item_points: u64,
    pub odd_date_points: u64,
    pub time_points: u64,
}

impl PointsBreakdown {
    /// Total points: the sum of every rule.
    pub fn total(&self) -> u64 {
        [
            self.retailer_points,
            self.round_dollar_points,
            self.multiple_of_quarter_points,
            self.item_points,
            self.odd_date_points,
            self.time_points,
        ]
        .iter()
        .fold(0u64, |acc, points| acc.saturating_add(*points))
    }
}

// =============================================================================
// Stored Receipt
// =============================================================================

/// A scored receipt held by the store.
///
/// Immutable once created. `points` always equals `breakdown.total()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReceipt {
    pub id: String,
    pub receipt: Receipt,
    pub points: u64,
    pub breakdown: PointsBreakdown,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Points Calculator
//!
//! Scores a validated [`Receipt`].
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Breakdown key             Rule                                 Points  │
//! │  ────────────────────────  ───────────────────────────────────  ──────  │
//! │  retailer_points           per alphanumeric char in retailer       1    │
//! │  round_dollar_points       total has no cents                     50    │
//! │  multiple_of_0.25_points   total is a multiple of 0.25            25    │
//! │  item_points               per two items                           5    │
//! │                            + per item whose trimmed description         │
//! │                              length is a multiple of 3:                 │
//! │                              ceil(price × 0.2)                          │
//! │  odd_date_points           purchase day is odd                     6    │
//! │  time_points               14:00 < purchase time < 16:00          10    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is independent and non-negative. The calculator never fails:
//! it only ever sees receipts that passed validation.
//!
//! ```rust
//! use receipt_core::points::calculate_points;
//! use receipt_core::types::{ItemPayload, ReceiptPayload};
//! use receipt_core::validation::validate_receipt;
//!
//! let receipt = validate_receipt(&ReceiptPayload {
//!     retailer: Some("M&M Corner Market".into()),
//!     purchase_date: Some("2022-01-01".into()),
//!     purchase_time: Some("13:01".into()),
//!     items: Some(vec![ItemPayload {
//!         short_description: Some("Mountain Dew 12PK".into()),
//!         price: Some("6.49".into()),
//!     }]),
//!     total: Some("6.49".into()),
//! })
//! .unwrap();
//!
//! let breakdown = calculate_points(&receipt);
//! assert_eq!(breakdown.retailer_points, 14);
//! assert_eq!(breakdown.odd_date_points, 6);
//! assert_eq!(breakdown.total(), 20);
//! ```

use chrono::{Datelike, NaiveTime, Timelike};

use crate::money::Money;
use crate::types::{Item, PointsBreakdown, Receipt};

pub const ROUND_DOLLAR_POINTS: u64 = 50;
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;
pub const ITEM_PAIR_POINTS: u64 = 5;
pub const ODD_DATE_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;

/// Afternoon bonus window, seconds from midnight, both ends excluded.
const AFTERNOON_START_SECS: u32 = 14 * 3600;
const AFTERNOON_END_SECS: u32 = 16 * 3600;

/// Quarter dollar, in cents.
const QUARTER_CENTS: i64 = 25;

/// `ceil(price × 0.2)` in cents is `ceil(cents / 500)`.
const DESCRIPTION_DIVISOR_CENTS: i64 = 500;

/// Scores a receipt.
pub fn calculate_points(receipt: &Receipt) -> PointsBreakdown {
    PointsBreakdown {
        retailer_points: retailer_points(&receipt.retailer),
        round_dollar_points: round_dollar_points(receipt.total),
        multiple_of_quarter_points: quarter_multiple_points(receipt.total),
        item_points: item_points(&receipt.items),
        odd_date_points: odd_date_points(receipt.purchase_date.day()),
        time_points: time_points(receipt.purchase_time),
    }
}

/// One point per alphanumeric character.
pub fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64
}

pub fn round_dollar_points(total: Money) -> u64 {
    if total.is_round_dollar() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

pub fn quarter_multiple_points(total: Money) -> u64 {
    if total.is_multiple_of(QUARTER_CENTS) {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// Pair bonus plus the description surcharge of every item.
pub fn item_points(items: &[Item]) -> u64 {
    let pairs = (items.len() / 2) as u64 * ITEM_PAIR_POINTS;
    items
        .iter()
        .map(description_points)
        .fold(pairs, u64::saturating_add)
}

/// `ceil(price × 0.2)` when the trimmed description length is a multiple of 3.
pub fn description_points(item: &Item) -> u64 {
    let length = item.short_description.trim().chars().count();
    if length % 3 != 0 {
        return 0;
    }
    item.price.div_ceil(DESCRIPTION_DIVISOR_CENTS).max(0) as u64
}

pub fn odd_date_points(day: u32) -> u64 {
    if day % 2 == 1 {
        ODD_DATE_POINTS
    } else {
        0
    }
}

/// Both window endpoints are excluded: 14:00 and 16:00 score nothing.
pub fn time_points(time: NaiveTime) -> u64 {
    let seconds = time.num_seconds_from_midnight();
    if seconds > AFTERNOON_START_SECS && seconds < AFTERNOON_END_SECS {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

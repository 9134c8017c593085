//! # Validation Module
//!
//! Turns a raw [`ReceiptPayload`] into a validated [`Receipt`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: receipt-api body decoding                                    │
//! │  └── Body is JSON and every field has the right JSON type              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields present                                           │
//! │  ├── Allowed character sets                                            │
//! │  ├── Dates, times and amounts parse                                    │
//! │  └── Amounts are positive                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Points calculator: assumes everything above holds, never fails        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::types::{ItemPayload, ReceiptPayload};
//! use receipt_core::validation::validate_receipt;
//!
//! let payload = ReceiptPayload {
//!     retailer: Some("Target".into()),
//!     purchase_date: Some("2022-01-02".into()),
//!     purchase_time: Some("13:13".into()),
//!     items: Some(vec![ItemPayload {
//!         short_description: Some("Pepsi - 12-oz".into()),
//!         price: Some("1.25".into()),
//!     }]),
//!     total: Some("1.25".into()),
//! };
//!
//! let receipt = validate_receipt(&payload).unwrap();
//! assert_eq!(receipt.total.cents(), 125);
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::{Item, ItemPayload, Receipt, ReceiptPayload};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Receipt Validation
// =============================================================================

/// Validates every field of a submitted receipt.
///
/// All failures are collected; the error lists each one with its field path.
pub fn validate_receipt(payload: &ReceiptPayload) -> Result<Receipt, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let retailer = collect(
        &mut errors,
        required("retailer", payload.retailer.as_deref()).and_then(validate_retailer),
    );

    let purchase_date = collect(
        &mut errors,
        required("purchaseDate", payload.purchase_date.as_deref()).and_then(validate_purchase_date),
    );

    let purchase_time = collect(
        &mut errors,
        required("purchaseTime", payload.purchase_time.as_deref()).and_then(validate_purchase_time),
    );

    let items = match payload.items.as_deref() {
        None => {
            errors.push(ValidationError::Required {
                field: "items".to_string(),
            });
            None
        }
        Some([]) => {
            errors.push(ValidationError::EmptyList {
                field: "items".to_string(),
            });
            None
        }
        Some(items) => {
            let validated: Vec<Option<Item>> = items
                .iter()
                .enumerate()
                .map(|(index, item)| validate_item(index, item, &mut errors))
                .collect();
            validated.into_iter().collect::<Option<Vec<Item>>>()
        }
    };

    let total = collect(
        &mut errors,
        required("total", payload.total.as_deref()).and_then(|raw| validate_amount("total", raw)),
    );

    match (retailer, purchase_date, purchase_time, items, total) {
        (Some(retailer), Some(purchase_date), Some(purchase_time), Some(items), Some(total))
            if errors.is_empty() =>
        {
            Ok(Receipt {
                retailer,
                purchase_date,
                purchase_time,
                items,
                total,
            })
        }
        _ => Err(errors),
    }
}

/// Validates one line item, recording failures under `items[index]`.
fn validate_item(index: usize, item: &ItemPayload, errors: &mut ValidationErrors) -> Option<Item> {
    let description_field = format!("items[{index}].shortDescription");
    let price_field = format!("items[{index}].price");

    let short_description = collect(
        errors,
        required(&description_field, item.short_description.as_deref())
            .and_then(|raw| validate_short_description(&description_field, raw)),
    );

    let price = collect(
        errors,
        required(&price_field, item.price.as_deref())
            .and_then(|raw| validate_amount(&price_field, raw)),
    );

    Some(Item {
        short_description: short_description?,
        price: price?,
    })
}

fn collect<T>(errors: &mut ValidationErrors, result: ValidationResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a retailer name and returns it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - Only letters, digits, whitespace, `-` and `&`
///
/// ```rust
/// use receipt_core::validation::validate_retailer;
///
/// assert_eq!(validate_retailer("  M&M Corner Market ").unwrap(), "M&M Corner Market");
/// assert!(validate_retailer("123!@#$%").is_err());
/// assert!(validate_retailer("   ").is_err());
/// ```
pub fn validate_retailer(retailer: &str) -> ValidationResult<String> {
    validate_text(
        "retailer",
        retailer,
        &['-', '&'],
        "letters, numbers, spaces, hyphens, or ampersands",
    )
}

/// Validates an item description and returns it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - Only letters, digits, whitespace, `-` and `_`
pub fn validate_short_description(field: &str, description: &str) -> ValidationResult<String> {
    validate_text(
        field,
        description,
        &['-', '_'],
        "letters, numbers, spaces, hyphens, or underscores",
    )
}

fn validate_text(
    field: &str,
    value: &str,
    extra: &[char],
    allowed: &str,
) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || extra.contains(&c))
    {
        return Err(ValidationError::InvalidCharacters {
            field: field.to_string(),
            allowed: allowed.to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a price or total.
///
/// ## Rules
/// - Decimal string with exactly two fractional digits (`"6.49"`)
/// - Must be greater than zero
///
/// ```rust
/// use receipt_core::validation::validate_amount;
///
/// assert_eq!(validate_amount("total", "6.49").unwrap().cents(), 649);
/// assert!(validate_amount("total", "6.4").is_err());
/// assert!(validate_amount("total", "0.00").is_err());
/// ```
pub fn validate_amount(field: &str, raw: &str) -> ValidationResult<Money> {
    let amount: Money = raw.parse().map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("{e} (e.g. '6.49')"),
    })?;

    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

// =============================================================================
// Date/Time Validators
// =============================================================================

/// Validates a `YYYY-MM-DD` purchase date.
pub fn validate_purchase_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| ValidationError::InvalidFormat {
        field: "purchaseDate".to_string(),
        reason: format!("{e}; expected YYYY-MM-DD"),
    })
}

/// Validates a 24-hour `HH:MM` purchase time.
pub fn validate_purchase_time(raw: &str) -> ValidationResult<NaiveTime> {
    parse_purchase_time(raw).map_err(|e| ValidationError::InvalidFormat {
        field: "purchaseTime".to_string(),
        reason: format!("{e}; expected HH:MM"),
    })
}

/// Parses `HH:MM`, also accepting `HH:MM:SS`.
pub fn parse_purchase_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
}

// =============================================================================
// Unit Tests
// =============================================================================

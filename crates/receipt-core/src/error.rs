//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── ValidationError   - One field failed validation                   │
//! │  └── ValidationErrors  - Every failure found in one receipt            │
//! │                                                                         │
//! │  receipt-store errors (separate crate)                                 │
//! │  └── StoreError        - Lookup and locking failures                   │
//! │                                                                         │
//! │  receipt-api errors (in app)                                           │
//! │  └── ApiError          - What HTTP clients see (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → ApiError → 422 response    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the field it concerns (`items[2].price`)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single input validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A list field has no entries.
    #[error("{field} must contain at least one entry")]
    EmptyList { field: String },

    /// Field contains characters outside its allowed set.
    ///
    /// ## When This Occurs
    /// - Retailer with punctuation other than `-` and `&`
    /// - Item description with punctuation other than `-` and `_`
    #[error("{field} must contain only {allowed}")]
    InvalidCharacters { field: String, allowed: String },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad date, wrong number of decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The submitted JSON value has the wrong type, e.g. a number for a price.
    #[error("{field} must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ValidationError {
    /// Returns the location of the offending field, e.g. `items[0].price`.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::EmptyList { field }
            | ValidationError::InvalidCharacters { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::WrongType { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// All validation failures collected from one receipt.
///
/// Validation does not stop at the first bad field, so a client can fix
/// every problem in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("receipt failed validation with {} error(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors {
            errors: vec![error],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

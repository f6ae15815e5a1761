//! # Error Types
//!
//! Domain-specific error types for teller-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  teller-core errors (this file)                                        │
//! │  ├── VaultError       - Everything a vault operation can return        │
//! │  │   ├── Configuration(ConfigError)  - fatal, no Vault produced        │
//! │  │   ├── Validation(ValidationError) - bad deposit input               │
//! │  │   ├── OutOfRange                  - withdrawal amount outside limits│
//! │  │   └── Unsatisfiable               - greedy pass left a remainder    │
//! │  ├── ConfigError      - Malformed limits / denomination table          │
//! │  └── ValidationError  - Deposit shape and per-slot bound failures      │
//! │                                                                         │
//! │  teller-state errors (separate crate)                                  │
//! │  └── StateError       - Config file I/O, wraps VaultError              │
//! │                                                                         │
//! │  Flow: ConfigError / ValidationError → VaultError → StateError         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery
//! Every variant except `Configuration` is recoverable: the vault is left
//! count-for-count identical and the caller may retry with other input.

use thiserror::Error;

// =============================================================================
// Vault Error
// =============================================================================

/// Errors returned by [`crate::Vault`] construction and operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Construction input is malformed. No vault exists.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Deposit input failed validation. Inventory unchanged.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Withdrawal amount is outside `[min_amount, max_amount]`.
    ///
    /// ## When This Occurs
    /// - Requesting 0 when `min_amount` is 1
    /// - Requesting more than the per-transaction ceiling
    #[error("Amount {amount} is out of range [{min}, {max}]")]
    OutOfRange { amount: i64, min: i64, max: i64 },

    /// The greedy allocation could not make exact change from current stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock: 500×1, 200×2, 50×1     Request: 600
    ///      │
    ///      ▼
    /// 500 taken → 100 left, 200 too big, 50 taken → 50 left
    ///      │
    ///      ▼
    /// Unsatisfiable { amount: 600, remaining: 50 }
    /// ```
    ///
    /// Returned even when a different combination of notes would have
    /// worked (here 200×3 would, given a third 200).
    #[error("Cannot dispense {amount} from available banknotes ({remaining} left over)")]
    Unsatisfiable { amount: i64, remaining: i64 },
}

impl VaultError {
    /// Returns true if the caller can retry (everything but configuration).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VaultError::Configuration(_))
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Malformed construction input: limits or the denomination table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Mapping size differs from `denomination_count`.
    #[error("Denomination table has {actual} entries, expected {expected}")]
    SlotCountMismatch { expected: i64, actual: usize },

    /// A limit field is negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeLimit { field: String, value: i64 },

    /// A min/max pair is inverted.
    #[error("min_{field} ({min}) is greater than max_{field} ({max})")]
    InvertedBounds { field: String, min: i64, max: i64 },

    /// Face values must be strictly positive.
    #[error("Denomination at slot {index} must be positive (got {value})")]
    NonPositiveDenomination { index: usize, value: i64 },

    /// Two slots map to the same face value.
    #[error("Denomination {value} is assigned to both slot {first} and slot {second}")]
    DuplicateDenomination {
        value: i64,
        first: usize,
        second: usize,
    },

    /// Slot indices must be contiguous from zero.
    #[error("Denomination table has no entry for slot {index}")]
    MissingSlot { index: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Deposit input validation errors.
///
/// Checked before any mutation, so a failed deposit is always a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The sequence does not have one entry per slot.
    #[error("Deposit has {actual} slots, expected {expected}")]
    SlotCount { expected: usize, actual: usize },

    /// A single slot's quantity is outside the per-deposit bounds.
    #[error(
        "Quantity {quantity} for slot {slot} (denomination {denomination}) must be between {min} and {max}"
    )]
    QuantityOutOfBounds {
        slot: usize,
        denomination: i64,
        quantity: i64,
        min: i64,
        max: i64,
    },

    /// Adding the quantity would overflow the held count.
    #[error("Held count for slot {slot} (denomination {denomination}) would overflow")]
    CountOverflow { slot: usize, denomination: i64 },

    /// The cash held after the deposit would not fit in an `i64`.
    #[error("Total held value would overflow")]
    ValueOverflow,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VaultError.
pub type VaultResult<T> = Result<T, VaultError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VaultError::OutOfRange {
            amount: 0,
            min: 1,
            max: 1000,
        };
        assert_eq!(err.to_string(), "Amount 0 is out of range [1, 1000]");

        let err = VaultError::Unsatisfiable {
            amount: 600,
            remaining: 50,
        };
        assert_eq!(
            err.to_string(),
            "Cannot dispense 600 from available banknotes (50 left over)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::SlotCount {
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.to_string(), "Deposit has 4 slots, expected 5");

        let err = ValidationError::QuantityOutOfBounds {
            slot: 2,
            denomination: 100,
            quantity: -1,
            min: 0,
            max: 50,
        };
        assert_eq!(
            err.to_string(),
            "Quantity -1 for slot 2 (denomination 100) must be between 0 and 50"
        );

        assert_eq!(
            ValidationError::ValueOverflow.to_string(),
            "Total held value would overflow"
        );
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvertedBounds {
            field: "amount".to_string(),
            min: 10,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "min_amount (10) is greater than max_amount (5)"
        );
    }

    #[test]
    fn test_conversions_into_vault_error() {
        let err: VaultError = ValidationError::SlotCount {
            expected: 5,
            actual: 0,
        }
        .into();
        assert!(matches!(err, VaultError::Validation(_)));
        assert!(err.is_recoverable());

        let err: VaultError = ConfigError::MissingSlot { index: 3 }.into();
        assert!(matches!(err, VaultError::Configuration(_)));
        assert!(!err.is_recoverable());
    }
}

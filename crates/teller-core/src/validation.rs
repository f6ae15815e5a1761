//! # Validation Module
//!
//! Input checks that run before the vault touches its inventory.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Each Check Runs                              │
//! │                                                                         │
//! │  Vault::new ──────► validate_limits()                                  │
//! │                     ├── every limit ≥ 0                                 │
//! │                     ├── min ≤ max for both pairs                        │
//! │                     └── table size == denomination_count                │
//! │                                                                         │
//! │  Vault::deposit ──► validate_deposit()                                 │
//! │                     ├── one entry per slot                              │
//! │                     └── each entry within banknote bounds               │
//! │                                                                         │
//! │  Vault::withdraw ─► validate_amount()                                  │
//! │                     └── min_amount ≤ amount ≤ max_amount                │
//! │                                                                         │
//! │  All checks are pure: nothing is mutated until they pass.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::denomination::DenominationMap;
use crate::error::{ConfigError, ValidationError, VaultError, VaultResult};
use crate::types::Limits;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Construction
// =============================================================================

/// Validates limits against the denomination table.
///
/// ## Rules
/// - No limit may be negative
/// - `min_banknote_count <= max_banknote_count`
/// - `min_amount <= max_amount`
/// - The table holds exactly `denomination_count` slots
pub fn validate_limits(limits: &Limits, map: &DenominationMap) -> Result<(), ConfigError> {
    for (field, value) in limits.named_fields() {
        if value < 0 {
            return Err(ConfigError::NegativeLimit {
                field: field.to_string(),
                value,
            });
        }
    }

    if limits.min_banknote_count > limits.max_banknote_count {
        return Err(ConfigError::InvertedBounds {
            field: "banknote_count".to_string(),
            min: limits.min_banknote_count,
            max: limits.max_banknote_count,
        });
    }

    if limits.min_amount > limits.max_amount {
        return Err(ConfigError::InvertedBounds {
            field: "amount".to_string(),
            min: limits.min_amount,
            max: limits.max_amount,
        });
    }

    if usize::try_from(limits.denomination_count).ok() != Some(map.len()) {
        return Err(ConfigError::SlotCountMismatch {
            expected: limits.denomination_count,
            actual: map.len(),
        });
    }

    Ok(())
}

// =============================================================================
// Deposit
// =============================================================================

/// Validates a deposit sequence.
///
/// A wrong length is rejected before any element is looked at. Otherwise
/// the first out-of-bounds slot is reported.
///
/// ## Example
/// ```rust
/// use teller_core::validation::validate_deposit;
/// use teller_core::{DenominationMap, Limits};
///
/// let map = DenominationMap::from_values(&[10, 50]).unwrap();
/// let limits = Limits {
///     denomination_count: 2,
///     min_banknote_count: 0,
///     max_banknote_count: 10,
///     min_amount: 1,
///     max_amount: 1000,
/// };
///
/// assert!(validate_deposit(&[3, 0], &limits, &map).is_ok());
/// assert!(validate_deposit(&[3], &limits, &map).is_err());
/// assert!(validate_deposit(&[3, 11], &limits, &map).is_err());
/// ```
pub fn validate_deposit(
    counts: &[i64],
    limits: &Limits,
    map: &DenominationMap,
) -> ValidationResult<()> {
    if counts.len() != map.len() {
        return Err(ValidationError::SlotCount {
            expected: map.len(),
            actual: counts.len(),
        });
    }

    for (slot, (&quantity, &denomination)) in counts.iter().zip(map.values()).enumerate() {
        if !limits.quantity_in_range(quantity) {
            return Err(ValidationError::QuantityOutOfBounds {
                slot,
                denomination,
                quantity,
                min: limits.min_banknote_count,
                max: limits.max_banknote_count,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Withdrawal
// =============================================================================

/// Validates a withdrawal amount against the configured bounds.
pub fn validate_amount(amount: i64, limits: &Limits) -> VaultResult<()> {
    if !limits.amount_in_range(amount) {
        return Err(VaultError::OutOfRange {
            amount,
            min: limits.min_amount,
            max: limits.max_amount,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> DenominationMap {
        DenominationMap::from_values(&[10, 50, 100, 200, 500]).unwrap()
    }

    fn limits() -> Limits {
        Limits {
            denomination_count: 5,
            min_banknote_count: 0,
            max_banknote_count: 100,
            min_amount: 1,
            max_amount: 10_000,
        }
    }

    #[test]
    fn test_validate_limits() {
        assert!(validate_limits(&limits(), &map()).is_ok());

        let negative = Limits {
            min_amount: -1,
            ..limits()
        };
        assert_eq!(
            validate_limits(&negative, &map()),
            Err(ConfigError::NegativeLimit {
                field: "min_amount".to_string(),
                value: -1
            })
        );

        let inverted = Limits {
            min_banknote_count: 10,
            max_banknote_count: 5,
            ..limits()
        };
        assert!(matches!(
            validate_limits(&inverted, &map()),
            Err(ConfigError::InvertedBounds { .. })
        ));

        let wrong_count = Limits {
            denomination_count: 4,
            ..limits()
        };
        assert_eq!(
            validate_limits(&wrong_count, &map()),
            Err(ConfigError::SlotCountMismatch {
                expected: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn test_validate_deposit_length_first() {
        // Out-of-bounds content does not matter when the length is wrong
        let err = validate_deposit(&[-7, 1_000, 0, 0], &limits(), &map()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SlotCount {
                expected: 5,
                actual: 4
            }
        );
        assert!(validate_deposit(&[], &limits(), &map()).is_err());
        assert!(validate_deposit(&[0; 6], &limits(), &map()).is_err());
    }

    #[test]
    fn test_validate_deposit_bounds() {
        assert!(validate_deposit(&[0, 0, 1, 2, 1], &limits(), &map()).is_ok());
        assert!(validate_deposit(&[100, 100, 100, 100, 100], &limits(), &map()).is_ok());

        let err = validate_deposit(&[0, 0, 0, 101, 0], &limits(), &map()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::QuantityOutOfBounds {
                slot: 3,
                denomination: 200,
                quantity: 101,
                min: 0,
                max: 100,
            }
        );

        assert!(validate_deposit(&[0, -1, 0, 0, 0], &limits(), &map()).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1, &limits()).is_ok());
        assert!(validate_amount(10_000, &limits()).is_ok());
        assert!(matches!(
            validate_amount(0, &limits()),
            Err(VaultError::OutOfRange { amount: 0, .. })
        ));
        assert!(validate_amount(10_001, &limits()).is_err());
    }
}

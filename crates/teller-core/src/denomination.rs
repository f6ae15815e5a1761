//! # Denomination Mapping
//!
//! The bijection between slot indices (positions in deposit / withdrawal
//! sequences) and banknote face values.
//!
//! ```text
//! slot:   0    1    2    3    4
//! value:  10   50   100  200  500
//! ```
//!
//! Both directions are built once from a single table and never change.

use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Slot index ⇄ face value bijection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationMap {
    by_index: Vec<i64>,
    by_value: BTreeMap<i64, usize>,
}

impl DenominationMap {
    /// Builds the mapping from an ordered list where position is the slot.
    ///
    /// ## Errors
    /// - `NonPositiveDenomination` for a zero or negative face value
    /// - `DuplicateDenomination` if two slots share a value
    pub fn from_values(values: &[i64]) -> Result<Self, ConfigError> {
        let mut by_value = BTreeMap::new();

        for (index, &value) in values.iter().enumerate() {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDenomination { index, value });
            }
            if let Some(&first) = by_value.get(&value) {
                return Err(ConfigError::DuplicateDenomination {
                    value,
                    first,
                    second: index,
                });
            }
            by_value.insert(value, index);
        }

        Ok(DenominationMap {
            by_index: values.to_vec(),
            by_value,
        })
    }

    /// Builds the mapping from an explicit `index → value` table.
    ///
    /// Indices must be exactly `0..n`; a gap is reported as `MissingSlot`.
    pub fn from_table(table: &BTreeMap<usize, i64>) -> Result<Self, ConfigError> {
        let mut values = Vec::with_capacity(table.len());
        for (expected, (&index, &value)) in table.iter().enumerate() {
            if index != expected {
                return Err(ConfigError::MissingSlot { index: expected });
            }
            values.push(value);
        }
        Self::from_values(&values)
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Face value held in `index`.
    #[inline]
    pub fn value_at(&self, index: usize) -> Option<i64> {
        self.by_index.get(index).copied()
    }

    /// Slot that holds `value`.
    #[inline]
    pub fn index_of(&self, value: i64) -> Option<usize> {
        self.by_value.get(&value).copied()
    }

    /// Face values in slot order.
    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.by_index
    }

    /// `(slot, value)` pairs sorted by face value, largest first.
    ///
    /// Sorted explicitly on every call; the result never depends on the
    /// order the table was supplied in.
    pub fn descending(&self) -> Vec<(usize, i64)> {
        let mut pairs: Vec<(usize, i64)> = self.by_index.iter().copied().enumerate().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

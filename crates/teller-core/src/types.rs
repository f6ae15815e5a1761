//! # Domain Types
//!
//! Plain data types shared by the vault and its callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │         Limits           │        │    InventorySnapshot     │      │
//! │  │  ──────────────────────  │        │  ──────────────────────  │      │
//! │  │  denomination_count      │        │  counts: value → held    │      │
//! │  │  min/max_banknote_count  │        │  (ordered by value)      │      │
//! │  │  min/max_amount          │        │                          │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │   immutable, set at construction       read-only copy for callers      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Limits
// =============================================================================

/// Operating limits of a vault.
///
/// ## Fields
/// - `denomination_count`: exact length of deposit/withdrawal sequences
/// - `min_banknote_count` / `max_banknote_count`: per-slot bounds for one deposit
/// - `min_amount` / `max_amount`: bounds on one withdrawal request
///
/// All fields are signed so that a negative value in a config file reaches
/// validation instead of failing deserialization with a less useful message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Limits {
    pub denomination_count: i64,
    pub min_banknote_count: i64,
    pub max_banknote_count: i64,
    pub min_amount: i64,
    pub max_amount: i64,
}

impl Limits {
    /// Returns the limit fields paired with their names, for validation
    /// messages.
    pub(crate) fn named_fields(&self) -> [(&'static str, i64); 5] {
        [
            ("denomination_count", self.denomination_count),
            ("min_banknote_count", self.min_banknote_count),
            ("max_banknote_count", self.max_banknote_count),
            ("min_amount", self.min_amount),
            ("max_amount", self.max_amount),
        ]
    }

    /// Returns true if `amount` is an acceptable withdrawal request.
    #[inline]
    pub fn amount_in_range(&self, amount: i64) -> bool {
        self.min_amount <= amount && amount <= self.max_amount
    }

    /// Returns true if `quantity` is an acceptable per-slot deposit count.
    #[inline]
    pub fn quantity_in_range(&self, quantity: i64) -> bool {
        self.min_banknote_count <= quantity && quantity <= self.max_banknote_count
    }
}

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// Read-only copy of the vault inventory at one point in time.
///
/// Contains an entry for every configured denomination, including those
/// with zero notes held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventorySnapshot {
    /// Face value → number of notes held.
    #[ts(type = "Record<string, number>")]
    pub counts: BTreeMap<i64, i64>,
}

impl InventorySnapshot {
    /// Notes held for `denomination`, or `None` if it is not configured.
    pub fn count_of(&self, denomination: i64) -> Option<i64> {
        self.counts.get(&denomination).copied()
    }

    /// Total cash represented by the snapshot (saturating).
    pub fn total_value(&self) -> i64 {
        self.counts
            .iter()
            .fold(0i64, |total, (value, count)| {
                total.saturating_add(value.saturating_mul(*count))
            })
    }

    /// Total number of notes held across all denominations.
    pub fn note_count(&self) -> i64 {
        self.counts
            .values()
            .fold(0i64, |total, count| total.saturating_add(*count))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_limits_from_json() {
        let json = r#"{
            "denomination_count": 5,
            "min_banknote_count": 0,
            "max_banknote_count": 100,
            "min_amount": 1,
            "max_amount": 10000
        }"#;
        let parsed: Limits = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, limits());
    }

    #[test]
    fn test_range_checks() {
        let limits = limits();
        assert!(limits.amount_in_range(1));
        assert!(limits.amount_in_range(10_000));
        assert!(!limits.amount_in_range(0));
        assert!(!limits.amount_in_range(10_001));

        assert!(limits.quantity_in_range(0));
        assert!(limits.quantity_in_range(100));
        assert!(!limits.quantity_in_range(-1));
        assert!(!limits.quantity_in_range(101));
    }

    #[test]
    fn test_snapshot_totals() {
        let snapshot = InventorySnapshot {
            counts: BTreeMap::from([(10, 0), (50, 1), (200, 3), (500, 1)]),
        };
        assert_eq!(snapshot.total_value(), 1150);
        assert_eq!(snapshot.note_count(), 5);
        assert_eq!(snapshot.count_of(10), Some(0));
        assert_eq!(snapshot.count_of(20), None);
    }

    #[test]
    fn test_snapshot_totals_saturate() {
        let snapshot = InventorySnapshot {
            counts: BTreeMap::from([(1, i64::MAX), (2, i64::MAX)]),
        };
        assert_eq!(snapshot.note_count(), i64::MAX);
        assert_eq!(snapshot.total_value(), i64::MAX);
    }
}

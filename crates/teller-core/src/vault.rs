//! # Vault
//!
//! The banknote inventory and its two transactions.
//!
//! ## Transaction Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     deposit / withdraw                                  │
//! │                                                                         │
//! │   validate ──► fail ──────────────────────────────► Err (no change)    │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   copy counts into scratch                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   apply to scratch ──► fail (overflow / remainder) ─► Err (no change)  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   swap scratch in ──────────────────────────────────► Ok               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The live counts are only ever replaced wholesale, so every failure path
//! leaves the inventory exactly as it was.
//!
//! ## Withdrawal Policy
//! Greedy, largest face value first, no backtracking. For each denomination
//! in descending order take as many notes as are both available and fit in
//! the remaining amount. If anything is left over the request fails, even
//! when some other combination of notes would have been exact.

use std::collections::BTreeMap;

use crate::denomination::DenominationMap;
use crate::error::{ValidationError, VaultError, VaultResult};
use crate::types::{InventorySnapshot, Limits};
use crate::validation::{validate_amount, validate_deposit, validate_limits};

/// Banknote inventory with fixed limits and denomination mapping.
///
/// ## Invariants
/// - `counts` has exactly one entry per slot, all non-negative
/// - `counts` is replaced only after an operation fully succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    limits: Limits,
    map: DenominationMap,
    /// Held notes, indexed by slot.
    counts: Vec<i64>,
}

impl Vault {
    /// Creates an empty vault.
    ///
    /// ## Errors
    /// `VaultError::Configuration` if the limits are negative or inverted, or
    /// the table size differs from `denomination_count`.
    ///
    /// ## Example
    /// ```rust
    /// use teller_core::{DenominationMap, Limits, Vault};
    ///
    /// let map = DenominationMap::from_values(&[10, 50, 100, 200, 500]).unwrap();
    /// let limits = Limits {
    ///     denomination_count: 5,
    ///     min_banknote_count: 0,
    ///     max_banknote_count: 1_000,
    ///     min_amount: 1,
    ///     max_amount: 100_000,
    /// };
    ///
    /// let mut vault = Vault::new(limits, map).unwrap();
    /// vault.deposit(&[0, 0, 1, 2, 1]).unwrap();
    /// assert_eq!(vault.withdraw(600).unwrap(), vec![0, 0, 1, 0, 1]);
    /// ```
    pub fn new(limits: Limits, map: DenominationMap) -> VaultResult<Self> {
        validate_limits(&limits, &map)?;
        let counts = vec![0; map.len()];

        Ok(Vault {
            limits,
            map,
            counts,
        })
    }

    /// Adds notes to the inventory, one quantity per slot.
    ///
    /// ## Errors
    /// `VaultError::Validation` for a wrong slot count, a quantity outside
    /// `[min_banknote_count, max_banknote_count]`, a held count that would
    /// overflow, or a total held value that would overflow. The inventory is
    /// unchanged on error.
    pub fn deposit(&mut self, counts: &[i64]) -> VaultResult<()> {
        validate_deposit(counts, &self.limits, &self.map)?;

        let mut next = self.counts.clone();
        for (slot, ((held, &quantity), &denomination)) in next
            .iter_mut()
            .zip(counts)
            .zip(self.map.values())
            .enumerate()
        {
            *held = held
                .checked_add(quantity)
                .ok_or(ValidationError::CountOverflow { slot, denomination })?;
        }

        // Withdrawals only lower the total, so it stays representable from here on
        if self.checked_value(&next).is_none() {
            return Err(ValidationError::ValueOverflow.into());
        }

        self.counts = next;
        Ok(())
    }

    /// Dispenses `amount` and returns how many notes were taken per slot.
    ///
    /// ## Errors
    /// - `OutOfRange` if `amount` is outside `[min_amount, max_amount]`
    /// - `Unsatisfiable` if the greedy pass cannot reach exactly zero
    ///
    /// The inventory is unchanged on error.
    pub fn withdraw(&mut self, amount: i64) -> VaultResult<Vec<i64>> {
        let (dispensed, remaining_stock) = self.allocate(amount)?;
        self.counts = remaining_stock;
        Ok(dispensed)
    }

    /// Runs the withdrawal policy without committing it.
    ///
    /// Returns exactly what [`Vault::withdraw`] would return from the
    /// current state.
    pub fn preview_withdrawal(&self, amount: i64) -> VaultResult<Vec<i64>> {
        self.allocate(amount).map(|(dispensed, _)| dispensed)
    }

    /// Greedy allocation over a scratch copy of the counts.
    ///
    /// Returns `(dispensed per slot, counts after dispensing)`.
    fn allocate(&self, amount: i64) -> VaultResult<(Vec<i64>, Vec<i64>)> {
        validate_amount(amount, &self.limits)?;

        let mut scratch = self.counts.clone();
        let mut dispensed = vec![0; self.map.len()];
        let mut remaining = amount;

        for (slot, value) in self.map.descending() {
            if value > remaining {
                continue;
            }
            let take = (remaining / value).min(scratch[slot]);
            remaining -= take * value;
            scratch[slot] -= take;
            dispensed[slot] += take;
        }

        if remaining != 0 {
            return Err(VaultError::Unsatisfiable { amount, remaining });
        }

        Ok((dispensed, scratch))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the configured limits.
    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the slot ⇄ denomination mapping.
    #[inline]
    pub fn denominations(&self) -> &DenominationMap {
        &self.map
    }

    /// Notes held for `denomination`, or `None` if it is not configured.
    pub fn count_of(&self, denomination: i64) -> Option<i64> {
        self.map
            .index_of(denomination)
            .map(|slot| self.counts[slot])
    }

    /// Held notes in slot order.
    #[inline]
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    /// Copies the inventory out as `denomination → count`.
    pub fn snapshot(&self) -> InventorySnapshot {
        let counts: BTreeMap<i64, i64> = self
            .map
            .values()
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
            .collect();
        InventorySnapshot { counts }
    }

    /// Total cash held. Computed from the counts, never tracked separately.
    ///
    /// Always exact: `deposit` refuses anything that would push it past
    /// `i64::MAX`.
    pub fn total_value(&self) -> i64 {
        self.breakdown_value(&self.counts)
    }

    /// Cash value of a per-slot sequence, or `None` if it overflows.
    pub fn checked_value(&self, per_slot: &[i64]) -> Option<i64> {
        per_slot
            .iter()
            .zip(self.map.values())
            .try_fold(0i64, |total, (count, value)| {
                total.checked_add(count.checked_mul(*value)?)
            })
    }

    /// Cash value of a per-slot sequence (a deposit or a dispensed breakdown).
    ///
    /// Entries beyond the configured slots are ignored. Saturates at
    /// `i64::MAX` / `i64::MIN` instead of overflowing.
    pub fn breakdown_value(&self, per_slot: &[i64]) -> i64 {
        per_slot
            .iter()
            .zip(self.map.values())
            .fold(0i64, |total, (count, value)| {
                total.saturating_add(count.saturating_mul(*value))
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Vault State
//!
//! Shares one [`Vault`] between callers.
//!
//! ## Thread Safety
//! The vault is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several callers (dispenser, deposit slot, operator console) may hit it
//! 2. A withdrawal copies the counts, works on the copy and swaps it in;
//!    two of those interleaving would lose or double-count notes
//! 3. The lock is held for the whole operation, journal write included
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    VaultState Operations                                │
//! │                                                                         │
//! │  Caller                   VaultState              Inner (locked)        │
//! │  ──────                   ──────────              ──────────────        │
//! │                                                                         │
//! │  Notes inserted ────────► deposit(counts) ──────► vault.deposit()      │
//! │                                                   journal.record()     │
//! │                                                                         │
//! │  Cash requested ────────► withdraw(amount) ─────► vault.withdraw()     │
//! │                                                   journal.record()     │
//! │                                                                         │
//! │  Status screen ─────────► snapshot() ───────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use teller_core::{InventorySnapshot, Vault, VaultResult};
use tracing::{debug, info, warn};

use crate::config::TellerConfig;
use crate::error::StateResult;
use crate::journal::{Journal, JournalEntry, Operation, Outcome, DEFAULT_JOURNAL_CAPACITY};

/// Vault and journal, always locked together.
#[derive(Debug)]
struct Inner {
    vault: Vault,
    journal: Journal,
}

/// Shared, lock-protected vault.
///
/// Cloning is cheap and every clone refers to the same vault.
///
/// ## Why Not RwLock?
/// Deposits and withdrawals both write; reads are short snapshots.
#[derive(Debug, Clone)]
pub struct VaultState {
    inner: Arc<Mutex<Inner>>,
}

impl VaultState {
    /// Wraps an existing vault with an empty journal of default capacity.
    pub fn new(vault: Vault) -> Self {
        Self::with_journal_capacity(vault, DEFAULT_JOURNAL_CAPACITY)
    }

    /// Wraps an existing vault with an empty journal keeping at most
    /// `max_entries` lines.
    pub fn with_journal_capacity(vault: Vault, max_entries: usize) -> Self {
        VaultState {
            inner: Arc::new(Mutex::new(Inner {
                vault,
                journal: Journal::with_capacity(max_entries),
            })),
        }
    }

    /// Builds an empty vault from configuration.
    pub fn from_config(config: &TellerConfig) -> StateResult<Self> {
        let vault = config.build_vault()?;
        info!(
            denominations = ?vault.denominations().values(),
            min_amount = vault.limits().min_amount,
            max_amount = vault.limits().max_amount,
            journal_max_entries = config.journal.max_entries,
            "Vault created"
        );
        Ok(Self::with_journal_capacity(vault, config.journal.max_entries))
    }

    /// Deposits notes. See [`Vault::deposit`].
    pub fn deposit(&self, counts: &[i64]) -> VaultResult<()> {
        let mut inner = self.lock();
        let result = inner.vault.deposit(counts);

        let operation = Operation::Deposit {
            counts: counts.to_vec(),
        };
        match &result {
            Ok(()) => {
                let value = inner.vault.breakdown_value(counts);
                inner.journal.record(operation, Outcome::Accepted, value);
                debug!(
                    slots = ?counts,
                    value,
                    total_value = inner.vault.total_value(),
                    "Deposit accepted"
                );
            }
            Err(err) => {
                inner.journal.record(
                    operation,
                    Outcome::Rejected {
                        reason: err.to_string(),
                    },
                    0,
                );
                warn!(slots = ?counts, error = %err, "Deposit rejected");
            }
        }

        result
    }

    /// Withdraws cash. See [`Vault::withdraw`].
    pub fn withdraw(&self, amount: i64) -> VaultResult<Vec<i64>> {
        let mut inner = self.lock();
        let result = inner.vault.withdraw(amount);

        match &result {
            Ok(breakdown) => {
                inner.journal.record(
                    Operation::Withdrawal {
                        amount,
                        breakdown: Some(breakdown.clone()),
                    },
                    Outcome::Accepted,
                    amount,
                );
                debug!(
                    amount,
                    slots = ?breakdown,
                    total_value = inner.vault.total_value(),
                    "Withdrawal dispensed"
                );
            }
            Err(err) => {
                inner.journal.record(
                    Operation::Withdrawal {
                        amount,
                        breakdown: None,
                    },
                    Outcome::Rejected {
                        reason: err.to_string(),
                    },
                    0,
                );
                warn!(amount, error = %err, "Withdrawal rejected");
            }
        }

        result
    }

    /// Copies the current inventory.
    pub fn snapshot(&self) -> InventorySnapshot {
        self.lock().vault.snapshot()
    }

    /// Total cash currently held.
    pub fn total_value(&self) -> i64 {
        self.lock().vault.total_value()
    }

    /// Executes a function with read access to the vault.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let preview = state.with_vault(|vault| vault.preview_withdrawal(550));
    /// ```
    pub fn with_vault<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vault) -> R,
    {
        let inner = self.lock();
        f(&inner.vault)
    }

    /// Executes a function with read access to the journal.
    pub fn with_journal<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Journal) -> R,
    {
        let inner = self.lock();
        f(&inner.journal)
    }

    /// Copies out the retained journal entries, oldest first.
    pub fn journal_entries(&self) -> Vec<JournalEntry> {
        self.with_journal(|journal| journal.entries().cloned().collect())
    }

    /// Vault operations commit all-or-nothing, so the data behind a
    /// poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_core::VaultError;

    fn state() -> VaultState {
        VaultState::from_config(&TellerConfig::default()).unwrap()
    }

    #[test]
    fn test_reference_scenario_through_state() {
        let state = state();

        state.deposit(&[0, 0, 1, 2, 1]).unwrap();
        assert_eq!(state.withdraw(600).unwrap(), vec![0, 0, 1, 0, 1]);

        state.deposit(&[0, 1, 0, 1, 1]).unwrap();
        assert!(matches!(
            state.withdraw(600),
            Err(VaultError::Unsatisfiable { .. })
        ));
        assert_eq!(state.withdraw(550).unwrap(), vec![0, 1, 0, 0, 1]);

        let entries = state.journal_entries();
        assert_eq!(entries.len(), 5);
        assert!(!entries[3].outcome.is_accepted());
        assert_eq!(
            entries[4].operation,
            Operation::Withdrawal {
                amount: 550,
                breakdown: Some(vec![0, 1, 0, 0, 1])
            }
        );
    }

    #[test]
    fn test_rejections_are_journaled_and_change_nothing() {
        let state = state();
        state.deposit(&[2, 2, 2, 2, 2]).unwrap();
        let before = state.snapshot();

        assert!(state.deposit(&[1, 1, 1, 1]).is_err());
        assert!(state.deposit(&[1, 1, -1, 1, 1]).is_err());
        assert!(state.withdraw(0).is_err());
        assert!(state.withdraw(5).is_err());

        assert_eq!(state.snapshot(), before);
        state.with_journal(|journal| {
            assert_eq!(journal.rejected_count(), 4);
            assert_eq!(journal.net_value(), before.total_value());
        });
    }

    #[test]
    fn test_clones_share_vault() {
        let state = state();
        let other = state.clone();
        other.deposit(&[0, 0, 0, 0, 1]).unwrap();
        assert_eq!(state.total_value(), 500);
        assert_eq!(state.with_vault(|vault| vault.count_of(500)), Some(1));
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let state = state();
        state.deposit(&[1, 0, 0, 0, 0]).unwrap();

        let poisoner = state.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with_vault::<_, ()>(|_| panic!("reader panicked"));
        })
        .join();

        assert_eq!(state.total_value(), 10);
        state.deposit(&[1, 0, 0, 0, 0]).unwrap();
        assert_eq!(state.total_value(), 20);
    }

    #[test]
    fn test_small_journal_still_balances() {
        let mut config = TellerConfig::default();
        config.journal.max_entries = 3;
        let state = VaultState::from_config(&config).unwrap();

        for _ in 0..5 {
            state.deposit(&[0, 0, 1, 2, 1]).unwrap();
        }
        assert!(state.withdraw(5).is_err());
        state.withdraw(600).unwrap();

        state.with_journal(|journal| {
            assert_eq!(journal.len(), 3);
            assert_eq!(journal.evicted_count(), 4);
            assert_eq!(journal.rejected_count(), 1);
            assert_eq!(journal.net_value(), 4400);
        });
        assert_eq!(state.total_value(), 4400);
        assert_eq!(state.journal_entries().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_operations_conserve_value() {
        let state = state();
        state.deposit(&[100, 100, 100, 100, 100]).unwrap();

        let mut handles = Vec::new();
        for task in 0..16i64 {
            let state = state.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                for round in 0..50i64 {
                    if (task + round) % 3 == 0 {
                        let _ = state.deposit(&[1, 1, 0, 0, 1]);
                    } else {
                        let _ = state.withdraw(10 * (1 + (task * round) % 90));
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let total = state.total_value();
        let snapshot = state.snapshot();
        assert!(snapshot.counts.values().all(|&count| count >= 0));
        assert_eq!(snapshot.total_value(), total);
        assert_eq!(state.with_journal(|journal| journal.net_value()), total);
        assert_eq!(state.with_journal(|journal| journal.len()), 1 + 16 * 50);
    }
}

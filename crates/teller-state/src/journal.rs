//! # Transaction Journal
//!
//! Bounded, append-only record of every deposit and withdrawal attempted through
//! [`crate::VaultState`], accepted or not.
//!
//! ## Conservation Check
//! ```text
//! vault.total_value() == journal.accepted_deposit_value()
//!                        - journal.accepted_withdrawal_value()
//! ```
//! holds after any sequence of operations on a vault that started empty,
//! including once old entries have been evicted.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Notes put in, one quantity per slot (as submitted).
    Deposit { counts: Vec<i64> },
    /// Cash requested; `breakdown` is the per-slot dispense when accepted.
    Withdrawal {
        amount: i64,
        breakdown: Option<Vec<i64>>,
    },
}

/// How it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected { reason: String },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// When the operation completed.
    pub at: DateTime<Utc>,

    pub operation: Operation,

    pub outcome: Outcome,

    /// Cash moved. Zero for rejected operations.
    pub value: i64,
}

/// Entries kept when no capacity is configured.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 10_000;

/// In-memory journal holding the most recent `max_entries` lines.
///
/// Totals are kept as running sums, so they still cover entries that have
/// been evicted.
#[derive(Debug, Clone)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    max_entries: usize,
    deposit_total: i64,
    withdrawal_total: i64,
    rejected: usize,
    evicted: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a journal that keeps at most `max_entries` lines (at least one).
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Journal {
            entries: VecDeque::with_capacity(max_entries.min(DEFAULT_JOURNAL_CAPACITY)),
            max_entries,
            deposit_total: 0,
            withdrawal_total: 0,
            rejected: 0,
            evicted: 0,
        }
    }

    /// Appends an entry and returns its id, dropping the oldest entry when full.
    ///
    /// `value` is forced to zero for rejected outcomes.
    pub fn record(&mut self, operation: Operation, outcome: Outcome, value: i64) -> Uuid {
        let value = if outcome.is_accepted() { value } else { 0 };

        match (&outcome, &operation) {
            (Outcome::Rejected { .. }, _) => self.rejected += 1,
            (Outcome::Accepted, Operation::Deposit { .. }) => {
                self.deposit_total = self.deposit_total.saturating_add(value);
            }
            (Outcome::Accepted, Operation::Withdrawal { .. }) => {
                self.withdrawal_total = self.withdrawal_total.saturating_add(value);
            }
        }

        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
            self.evicted += 1;
        }

        let id = Uuid::new_v4();
        self.entries.push_back(JournalEntry {
            id,
            at: Utc::now(),
            operation,
            outcome,
            value,
        });
        id
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Entries dropped to stay within `max_entries`.
    pub fn evicted_count(&self) -> usize {
        self.evicted
    }

    /// Sum of accepted deposit values over the whole history (saturating).
    pub fn accepted_deposit_value(&self) -> i64 {
        self.deposit_total
    }

    /// Sum of accepted withdrawal amounts over the whole history (saturating).
    pub fn accepted_withdrawal_value(&self) -> i64 {
        self.withdrawal_total
    }

    /// Deposits minus withdrawals.
    pub fn net_value(&self) -> i64 {
        self.deposit_total.saturating_sub(self.withdrawal_total)
    }

    /// Number of rejected operations over the whole history.
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Serializes the retained entries as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut journal = Journal::new();
        journal.record(
            Operation::Deposit {
                counts: vec![0, 0, 1, 2, 1],
            },
            Outcome::Accepted,
            1000,
        );
        journal.record(
            Operation::Withdrawal {
                amount: 600,
                breakdown: Some(vec![0, 0, 1, 0, 1]),
            },
            Outcome::Accepted,
            600,
        );
        journal.record(
            Operation::Withdrawal {
                amount: 50,
                breakdown: None,
            },
            Outcome::Rejected {
                reason: "nope".to_string(),
            },
            50,
        );

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.accepted_deposit_value(), 1000);
        assert_eq!(journal.accepted_withdrawal_value(), 600);
        assert_eq!(journal.net_value(), 400);
        assert_eq!(journal.rejected_count(), 1);
        assert_eq!(journal.entries().nth(2).map(|entry| entry.value), Some(0));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut journal = Journal::new();
        let first = journal.record(Operation::Deposit { counts: vec![1] }, Outcome::Accepted, 10);
        let second = journal.record(Operation::Deposit { counts: vec![1] }, Outcome::Accepted, 10);
        assert_ne!(first, second);
        assert_eq!(journal.last().map(|entry| entry.id), Some(second));
    }

    #[test]
    fn test_json_shape() {
        let mut journal = Journal::new();
        journal.record(
            Operation::Withdrawal {
                amount: 0,
                breakdown: None,
            },
            Outcome::Rejected {
                reason: "Amount 0 is out of range [1, 10]".to_string(),
            },
            0,
        );

        let json = journal.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["operation"]["type"], "withdrawal");
        assert_eq!(parsed[0]["outcome"]["status"], "rejected");
        assert_eq!(parsed[0]["value"], 0);
    }

    #[test]
    fn test_oldest_entries_are_evicted_but_totals_survive() {
        let mut journal = Journal::with_capacity(4);
        for _ in 0..10 {
            journal.record(Operation::Deposit { counts: vec![1] }, Outcome::Accepted, 100);
        }
        let newest = journal.record(
            Operation::Withdrawal {
                amount: 300,
                breakdown: Some(vec![3]),
            },
            Outcome::Accepted,
            300,
        );
        journal.record(
            Operation::Withdrawal {
                amount: 5,
                breakdown: None,
            },
            Outcome::Rejected {
                reason: "nope".to_string(),
            },
            5,
        );

        assert_eq!(journal.len(), 4);
        assert_eq!(journal.evicted_count(), 8);
        assert_eq!(journal.accepted_deposit_value(), 1000);
        assert_eq!(journal.accepted_withdrawal_value(), 300);
        assert_eq!(journal.net_value(), 700);
        assert_eq!(journal.rejected_count(), 1);
        assert_eq!(journal.entries().nth(2).map(|entry| entry.id), Some(newest));
    }

    #[test]
    fn test_zero_capacity_keeps_latest_entry() {
        let mut journal = Journal::with_capacity(0);
        journal.record(Operation::Deposit { counts: vec![1] }, Outcome::Accepted, 10);
        let id = journal.record(Operation::Deposit { counts: vec![2] }, Outcome::Accepted, 20);
        assert_eq!(journal.max_entries(), 1);
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.last().map(|entry| entry.id), Some(id));
        assert_eq!(journal.net_value(), 30);
    }

    #[test]
    fn test_totals_saturate() {
        let mut journal = Journal::new();
        journal.record(Operation::Deposit { counts: vec![1] }, Outcome::Accepted, i64::MAX);
        journal.record(Operation::Deposit { counts: vec![1] }, Outcome::Accepted, i64::MAX);
        assert_eq!(journal.accepted_deposit_value(), i64::MAX);
        assert_eq!(journal.net_value(), i64::MAX);
    }
}

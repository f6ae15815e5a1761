//! # teller-core: Pure Cash-Inventory Logic for Teller
//!
//! This crate is the **heart** of Teller. It holds the banknote inventory of
//! an automated teller machine and the rules for putting notes in and taking
//! them out, as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Teller Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Callers (dispenser driver, UI, tests)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    teller-state                                 │   │
//! │  │    VaultState (Arc<Mutex>), TellerConfig, Journal, tracing      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ teller-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │denomination│  │   types   │  │   vault   │  │ validation│  │   │
//! │  │   │ slot⇄value │  │  Limits   │  │  deposit  │  │   rules   │  │   │
//! │  │   │            │  │ Snapshot  │  │  withdraw │  │  checks   │  │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO LOCKS • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`denomination`] - Slot index ⇄ face value mapping
//! - [`types`] - Limits and inventory snapshots
//! - [`vault`] - The inventory and its deposit / withdraw transactions
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks run before any mutation
//!
//! ## Design Principles
//!
//! 1. **All or nothing**: a failed operation leaves every count untouched
//! 2. **Greedy withdrawal**: largest note first, no backtracking, no optimizer
//! 3. **Integer amounts**: face values and counts are `i64`
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use teller_core::{DenominationMap, Limits, Vault, VaultError};
//!
//! let map = DenominationMap::from_values(&[10, 50, 100, 200, 500]).unwrap();
//! let limits = Limits {
//!     denomination_count: 5,
//!     min_banknote_count: 0,
//!     max_banknote_count: 1_000,
//!     min_amount: 1,
//!     max_amount: 100_000,
//! };
//! let mut vault = Vault::new(limits, map).unwrap();
//!
//! vault.deposit(&[0, 1, 0, 1, 1]).unwrap();
//!
//! // 500 taken, 200 is too big for the remaining 100, 50 taken: 50 left over
//! assert!(matches!(vault.withdraw(600), Err(VaultError::Unsatisfiable { .. })));
//! assert_eq!(vault.withdraw(550).unwrap(), vec![0, 1, 0, 0, 1]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod denomination;
pub mod error;
pub mod types;
pub mod validation;
pub mod vault;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use denomination::DenominationMap;
pub use error::{ConfigError, ValidationError, VaultError, VaultResult};
pub use types::{InventorySnapshot, Limits};
pub use vault::Vault;

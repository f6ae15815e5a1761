//! # teller-state: Shared Vault, Configuration and Journal for Teller
//!
//! Everything around the pure vault that needs I/O, locks or logging.
//!
//! ## Module Organization
//! ```text
//! teller_state/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── state.rs        ◄─── VaultState: Arc<Mutex<Vault>> + journal
//! ├── config.rs       ◄─── TellerConfig: defaults → teller.toml → TELLER_* env
//! ├── journal.rs      ◄─── Bounded operation log
//! ├── logging.rs      ◄─── tracing-subscriber setup
//! └── error.rs        ◄─── StateError
//! ```
//!
//! ## Startup Sequence
//! ```rust,no_run
//! use teller_state::{logging, TellerConfig, VaultState};
//!
//! logging::init_tracing();
//! let config = TellerConfig::load(None)?;
//! let state = VaultState::from_config(&config)?;
//!
//! state.deposit(&[0, 0, 1, 2, 1])?;
//! let breakdown = state.withdraw(600)?;
//! assert_eq!(breakdown, vec![0, 0, 1, 0, 1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod journal;
pub mod logging;
pub mod state;

pub use config::TellerConfig;
pub use error::{StateError, StateResult};
pub use journal::{Journal, JournalEntry, Operation, Outcome, DEFAULT_JOURNAL_CAPACITY};
pub use state::VaultState;

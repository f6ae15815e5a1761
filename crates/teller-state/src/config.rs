//! # Teller Configuration
//!
//! Limits and denomination table for a vault, loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TELLER_MIN_AMOUNT=1                                                │
//! │     TELLER_DENOMINATIONS=10,50,100,200,500                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/teller/teller.toml (Linux)                               │
//! │     ~/Library/Application Support/com.teller.atm/teller.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5 denominations: 10, 50, 100, 200, 500                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # teller.toml
//! [limits]
//! denomination_count = 5
//! min_banknote_count = 0
//! max_banknote_count = 10000000000
//! min_amount = 1
//! max_amount = 10000000000
//!
//! [denominations]
//! values = [10, 50, 100, 200, 500]  # position = slot index
//!
//! [journal]
//! max_entries = 10000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use teller_core::{DenominationMap, Limits, Vault, VaultError};
use tracing::{debug, info, warn};

use crate::error::{StateError, StateResult};
use crate::journal::DEFAULT_JOURNAL_CAPACITY;

// =============================================================================
// Defaults
// =============================================================================

/// Face values used when nothing else is configured.
pub const DEFAULT_DENOMINATIONS: [i64; 5] = [10, 50, 100, 200, 500];

/// Per-slot deposit ceiling and per-request withdrawal ceiling.
const DEFAULT_CEILING: i64 = 10_000_000_000;

fn default_limits() -> Limits {
    Limits {
        denomination_count: DEFAULT_DENOMINATIONS.len() as i64,
        min_banknote_count: 0,
        max_banknote_count: DEFAULT_CEILING,
        min_amount: 1,
        max_amount: DEFAULT_CEILING,
    }
}

// =============================================================================
// Denomination Settings
// =============================================================================

/// The `[denominations]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationSettings {
    /// Face values in slot order.
    pub values: Vec<i64>,
}

impl Default for DenominationSettings {
    fn default() -> Self {
        DenominationSettings {
            values: DEFAULT_DENOMINATIONS.to_vec(),
        }
    }
}

// =============================================================================
// Journal Settings
// =============================================================================

/// The `[journal]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalSettings {
    /// Entries kept in memory before the oldest are dropped.
    pub max_entries: usize,
}

impl Default for JournalSettings {
    fn default() -> Self {
        JournalSettings {
            max_entries: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

// =============================================================================
// Teller Configuration
// =============================================================================

/// Complete vault configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerConfig {
    /// Operating limits.
    #[serde(default = "default_limits")]
    pub limits: Limits,

    /// Slot ⇄ denomination table.
    #[serde(default)]
    pub denominations: DenominationSettings,

    /// Journal retention.
    #[serde(default)]
    pub journal: JournalSettings,
}

impl Default for TellerConfig {
    fn default() -> Self {
        TellerConfig {
            limits: default_limits(),
            denominations: DenominationSettings::default(),
            journal: JournalSettings::default(),
        }
    }
}

impl TellerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (teller.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StateResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`TellerConfig::load`] with a custom variable lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> StateResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading teller config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying overrides or validation.
    pub fn from_file(path: &Path) -> StateResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StateResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StateError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StateError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StateError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Teller config saved");
        Ok(())
    }

    /// Validates the configuration by running it through the core's checks.
    pub fn validate(&self) -> StateResult<()> {
        self.build_vault().map(|_| ())
    }

    /// Builds the denomination mapping.
    pub fn denomination_map(&self) -> StateResult<DenominationMap> {
        DenominationMap::from_values(&self.denominations.values)
            .map_err(|e| StateError::Vault(VaultError::from(e)))
    }

    /// Builds an empty vault from this configuration.
    pub fn build_vault(&self) -> StateResult<Vault> {
        let map = self.denomination_map()?;
        Ok(Vault::new(self.limits, map)?)
    }

    /// Applies `TELLER_*` overrides.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let numeric = [
            ("TELLER_MIN_BANKNOTE_COUNT", &mut self.limits.min_banknote_count),
            ("TELLER_MAX_BANKNOTE_COUNT", &mut self.limits.max_banknote_count),
            ("TELLER_MIN_AMOUNT", &mut self.limits.min_amount),
            ("TELLER_MAX_AMOUNT", &mut self.limits.max_amount),
        ];
        for (key, field) in numeric {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<i64>() {
                    Ok(value) => {
                        debug!(key, value, "Overriding limit from environment");
                        *field = value;
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring non-numeric override"),
                }
            }
        }

        if let Some(raw) = lookup("TELLER_JOURNAL_MAX_ENTRIES") {
            match raw.trim().parse::<usize>() {
                Ok(value) => {
                    debug!(value, "Overriding journal capacity from environment");
                    self.journal.max_entries = value;
                }
                Err(_) => warn!(value = %raw, "Ignoring non-numeric TELLER_JOURNAL_MAX_ENTRIES"),
            }
        }

        // Replacing the table also resets the slot count to match
        if let Some(raw) = lookup("TELLER_DENOMINATIONS") {
            let parsed: Result<Vec<i64>, _> =
                raw.split(',').map(|part| part.trim().parse::<i64>()).collect();
            match parsed {
                Ok(values) => {
                    debug!(?values, "Overriding denominations from environment");
                    self.limits.denomination_count = values.len() as i64;
                    self.denominations.values = values;
                }
                Err(_) => warn!(value = %raw, "Ignoring malformed TELLER_DENOMINATIONS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "teller", "atm")
            .map(|dirs| dirs.config_dir().join("teller.toml"))
    }
}

//! Configuration constants and settings for the ledger.

use crate::error::{LedgerError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default printer power draw in watts.
pub const DEFAULT_PRINTER_POWER: f64 = 100.0;

/// Default electricity price per kWh.
pub const DEFAULT_ELECTRICITY_PRICE: f64 = 0.12;

/// Currency symbol used whenever none is set.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "🦁";

/// Filament diameter in millimeters.
pub const FILAMENT_DIAMETER_MM: f64 = 1.75;

/// Density used for empty, unknown, or custom materials (PLA), g/cm³.
pub const FALLBACK_DENSITY: f64 = 1.24;

/// Selling price is computed from `total_cost * MARKUP_RATIO`.
pub const MARKUP_RATIO: f64 = 3.0 / 5.0;

/// Selling prices end in multiples of this many currency units.
pub const PRICE_STEP: f64 = 5.0;

/// Print time assigned to new and cleared jobs.
pub const DEFAULT_PRINT_TIME: &str = "0:00";

/// Largest accepted job id. Larger integers do not survive JSON readers
/// that hold numbers as doubles.
pub const MAX_JOB_ID: u64 = (1 << 53) - 1;

/// Name of the primary data file.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Number of import backups kept.
pub const IMPORT_BACKUP_RETENTION: usize = 10;

/// Number of periodic backups kept.
pub const AUTO_BACKUP_RETENTION: usize = 5;

/// Default interval between periodic backups.
pub const DEFAULT_BACKUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Username shipped as the default.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password shipped as the default.
pub const DEFAULT_PASSWORD: &str = "admin";

/// Location of the local best-effort store.
pub fn fallback_store_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|d| d.join("printcost").join("fallback.json"))
        .ok_or(LedgerError::NoFallbackLocation)
}

/// Settings for the long-running host of the durable store.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Permit the shipped `admin`/`admin` pair.
    pub allow_default_credentials: bool,
    /// Interval between periodic backups.
    pub backup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            allow_default_credentials: false,
            backup_interval: DEFAULT_BACKUP_INTERVAL,
        }
    }
}

impl ServerConfig {
    /// Create a configuration with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Whether the shipped default credentials are in use.
    pub fn uses_default_credentials(&self) -> bool {
        self.username == DEFAULT_USERNAME && self.password == DEFAULT_PASSWORD
    }

    /// Check the configuration before startup.
    ///
    /// Every error returned here is fatal.
    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            return Err(LedgerError::EmptyPassword);
        }
        if self.uses_default_credentials() {
            if !self.allow_default_credentials {
                return Err(LedgerError::DefaultCredentials);
            }
            tracing::warn!("Running with default credentials");
        }
        if self.backup_interval.is_zero() {
            return Err(LedgerError::ZeroBackupInterval);
        }
        Ok(())
    }
}

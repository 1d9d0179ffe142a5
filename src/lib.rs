//! printcost - track 3D print jobs and estimate their cost and selling price.
//!
//! Jobs (material, filament price, weight, print time) and global settings
//! (printer power, electricity price, currency) are kept in an in-memory
//! [`AppState`]. Costs are derived on demand by [`calculate_job`], and the
//! whole state is saved in the background through a [`Gateway`] that falls
//! back to a local store when the primary one is unavailable.
//!
//! # Example
//!
//! ```no_run
//! use printcost::{DataFile, Gateway, JobField, JobUpdate, Ledger};
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(Gateway::new(DataFile::new("data.json")));
//! let mut ledger = Ledger::open(gateway).unwrap();
//! let id = ledger.add_job();
//! ledger.update_job(id, JobUpdate::from_input(JobField::WeightG, "50"));
//! println!("{:?}", ledger.costs(id));
//! ledger.flush();
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod persistence;
pub mod pricing;
pub mod report;
pub mod store;

// Re-exports for convenience
pub use codec::{export_state, import_into};
pub use config::ServerConfig;
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use model::{GlobalSettings, Job, JobField, JobUpdate, SettingsField, SettingsUpdate, StoreData};
pub use persistence::{
    AutoBackup, Backups, Cadence, DataFile, Durable, Gateway, PersistenceStatus, SaveWorker,
    WriteKind,
};
pub use pricing::{calculate_job, JobCosts};
pub use store::{AppState, JobStore};

use std::path::Path;
use std::sync::Arc;

/// Gateway over `<data_dir>/data.json` with import backups, falling back to `fallback`.
pub fn open_gateway(data_dir: &Path, fallback: Option<&Path>) -> (Arc<Gateway>, Arc<Backups>) {
    let data_path = data_dir.join(config::DEFAULT_DATA_FILE);
    let backups = Arc::new(Backups::new(&data_path));
    let primary = DataFile::new(&data_path).with_backups(backups.clone());

    let mut gateway = Gateway::new(primary);
    if let Some(path) = fallback {
        gateway = gateway.with_fallback(DataFile::new(path));
    }
    (Arc::new(gateway), backups)
}

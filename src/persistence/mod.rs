//! Durable storage: data files, backups, and best-effort saving.

mod backup;
mod data_file;
mod gateway;
mod scheduler;
mod worker;

pub use backup::{Backups, Cadence};
pub use data_file::DataFile;
pub use gateway::{Gateway, PersistenceStatus};
pub use scheduler::AutoBackup;
pub use worker::SaveWorker;

use crate::error::Result;
use crate::model::StoreData;
use std::sync::Arc;

/// What triggered a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// A regular edit.
    Edit,
    /// A wholesale import; the previous copy is backed up first.
    Import,
}

impl WriteKind {
    /// Combine two pending writes into one; an import is never downgraded.
    pub fn merge(self, other: WriteKind) -> WriteKind {
        if self == WriteKind::Import || other == WriteKind::Import {
            WriteKind::Import
        } else {
            WriteKind::Edit
        }
    }
}

/// A backing store for the whole ledger.
pub trait Durable: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Read the stored copy; `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<StoreData>>;

    /// Replace the stored copy.
    fn write(&self, data: &StoreData, kind: WriteKind) -> Result<()>;
}

impl<T: Durable + ?Sized> Durable for Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read(&self) -> Result<Option<StoreData>> {
        (**self).read()
    }

    fn write(&self, data: &StoreData, kind: WriteKind) -> Result<()> {
        (**self).write(data, kind)
    }
}

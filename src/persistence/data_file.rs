//! DataFile - a JSON file acting as a durable store.

use super::backup::{Backups, Cadence};
use super::{Durable, WriteKind};
use crate::error::{LedgerError, Result};
use crate::model::StoreData;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// JSON file store, optionally rotating backups before imports.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    backups: Option<Arc<Backups>>,
}

impl DataFile {
    /// Store at `path`, without backups.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backups: None,
        }
    }

    /// Take an import backup before every import write.
    pub fn with_backups(mut self, backups: Arc<Backups>) -> Self {
        self.backups = Some(backups);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn partial_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{}.{}.partial", name, std::process::id()))
    }
}

impl Durable for DataFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<StoreData>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| LedgerError::CorruptStore {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(Some(StoreData::from_value_lenient(&value)))
    }

    fn write(&self, data: &StoreData, kind: WriteKind) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if kind == WriteKind::Import {
            if let Some(backups) = &self.backups {
                if let Err(e) = backups.rotate(Cadence::Import) {
                    warn!("Import backup of {} failed: {}", self.path.display(), e);
                }
            }
        }

        let json = serde_json::to_string_pretty(data)?;
        let partial = self.partial_path();
        fs::write(&partial, json)?;
        fs::rename(&partial, &self.path)?;
        debug!("Wrote {} job(s) to {}", data.jobs.len(), self.path.display());
        Ok(())
    }
}

//! Timestamped backups of the primary data file.
//!
//! Each cadence copies the current file to
//! `<file>.<tag>-<YYYY-MM-DDTHH-MM-SS-mmmZ>` and then deletes all but the
//! newest copies of that cadence. Names sort by time, so pruning is a
//! filename sort. Sweeps of the same cadence are serialized.

use crate::config::{AUTO_BACKUP_RETENTION, IMPORT_BACKUP_RETENTION};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Why a backup was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Before an import overwrites the data file.
    Import,
    /// On a fixed timer.
    Auto,
}

impl Cadence {
    /// Tag embedded in backup file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Cadence::Import => "import-backup",
            Cadence::Auto => "auto-backup",
        }
    }

    /// Default number of backups kept.
    pub fn default_retention(&self) -> usize {
        match self {
            Cadence::Import => IMPORT_BACKUP_RETENTION,
            Cadence::Auto => AUTO_BACKUP_RETENTION,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Per-cadence state.
#[derive(Debug)]
struct Sweep {
    retention: usize,
    lock: Mutex<()>,
}

impl Sweep {
    fn new(retention: usize) -> Self {
        Self {
            retention,
            lock: Mutex::new(()),
        }
    }
}

/// Backup rotation for one data file.
#[derive(Debug)]
pub struct Backups {
    source: PathBuf,
    import: Sweep,
    auto: Sweep,
}

impl Backups {
    /// Backups of `source`, with default retention.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            import: Sweep::new(Cadence::Import.default_retention()),
            auto: Sweep::new(Cadence::Auto.default_retention()),
        }
    }

    /// Override how many backups a cadence keeps.
    pub fn with_retention(mut self, cadence: Cadence, keep: usize) -> Self {
        *self.sweep_mut(cadence) = Sweep::new(keep);
        self
    }

    /// The file being backed up.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn sweep(&self, cadence: Cadence) -> &Sweep {
        match cadence {
            Cadence::Import => &self.import,
            Cadence::Auto => &self.auto,
        }
    }

    fn sweep_mut(&mut self, cadence: Cadence) -> &mut Sweep {
        match cadence {
            Cadence::Import => &mut self.import,
            Cadence::Auto => &mut self.auto,
        }
    }

    fn directory(&self) -> PathBuf {
        match self.source.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn prefix(&self, cadence: Cadence) -> String {
        format!("{}.{}-", self.file_name(), cadence.tag())
    }

    /// Path of the backup taken at `at`.
    pub fn backup_path(&self, cadence: Cadence, at: DateTime<Utc>) -> PathBuf {
        let stamp = at.format("%Y-%m-%dT%H-%M-%S-%3fZ");
        self.directory()
            .join(format!("{}{}", self.prefix(cadence), stamp))
    }

    /// Temporary copy used while writing the backup stamped `at`.
    ///
    /// Named per process, so concurrent processes never share it.
    fn partial_path(&self, cadence: Cadence, at: DateTime<Utc>) -> PathBuf {
        let stamp = at.format("%Y-%m-%dT%H-%M-%S-%3fZ");
        self.directory().join(format!(
            ".{}.{}-{}.{}.partial",
            self.file_name(),
            cadence.tag(),
            stamp,
            std::process::id()
        ))
    }

    /// Take a backup now. See [`Backups::rotate_at`].
    pub fn rotate(&self, cadence: Cadence) -> Result<Option<PathBuf>> {
        self.rotate_at(cadence, Utc::now())
    }

    /// Copy the source to a backup stamped `at`, then prune.
    ///
    /// Returns `None` when there is no source file yet.
    pub fn rotate_at(&self, cadence: Cadence, at: DateTime<Utc>) -> Result<Option<PathBuf>> {
        let sweep = self.sweep(cadence);
        let _guard = sweep.lock.lock().unwrap_or_else(|e| e.into_inner());

        let target = self.backup_path(cadence, at);
        let partial = self.partial_path(cadence, at);

        match fs::copy(&self.source, &partial) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {} to back up yet", self.source.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
        fs::rename(&partial, &target)?;
        info!("Backup written: {}", target.display());

        let removed = self.prune(cadence, sweep.retention)?;
        if removed > 0 {
            debug!("Pruned {} old {} file(s)", removed, cadence);
        }
        Ok(Some(target))
    }

    /// Existing backups of a cadence, oldest first.
    pub fn list(&self, cadence: Cadence) -> Result<Vec<PathBuf>> {
        let prefix = self.prefix(cadence);
        let mut found = Vec::new();

        let entries = match fs::read_dir(self.directory()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(found),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with(&prefix) {
                found.push(entry.path());
            }
        }

        found.sort();
        Ok(found)
    }

    fn prune(&self, cadence: Cadence, keep: usize) -> Result<usize> {
        let existing = self.list(cadence)?;
        let excess = existing.len().saturating_sub(keep);
        for old in &existing[..excess] {
            if let Err(e) = fs::remove_file(old) {
                warn!("Could not remove backup {}: {}", old.display(), e);
            }
        }
        Ok(excess)
    }
}

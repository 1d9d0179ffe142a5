//! Gateway - best-effort persistence over a primary and a fallback store.

use super::{Durable, WriteKind};
use crate::model::StoreData;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Outcome of the most recent load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PersistenceStatus {
    /// The primary store answered.
    #[default]
    Healthy,
    /// The primary store failed; the fallback store was used.
    Fallback,
    /// Neither store could be used.
    Unsaved,
}

impl PersistenceStatus {
    /// User-facing warning, if any.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            PersistenceStatus::Healthy => None,
            PersistenceStatus::Fallback => {
                Some("Database not accessible. Changes are kept in the local fallback store only.")
            }
            PersistenceStatus::Unsaved => Some("Database not accessible. Changes will not be saved."),
        }
    }
}

/// Tries the primary store, then the fallback. Never returns an error.
pub struct Gateway {
    primary: Box<dyn Durable>,
    fallback: Option<Box<dyn Durable>>,
    status: Mutex<PersistenceStatus>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("primary", &self.primary.describe())
            .field("fallback", &self.fallback.as_ref().map(|s| s.describe()))
            .field("status", &self.status())
            .finish()
    }
}

impl Gateway {
    /// Gateway without a fallback store.
    pub fn new(primary: impl Durable + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: None,
            status: Mutex::new(PersistenceStatus::Healthy),
        }
    }

    /// Use `fallback` whenever the primary store fails.
    pub fn with_fallback(mut self, fallback: impl Durable + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn status(&self) -> PersistenceStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_status(&self, status: PersistenceStatus) {
        let mut current = self.status.lock().unwrap_or_else(|e| e.into_inner());
        if *current != status {
            match status {
                PersistenceStatus::Healthy => info!("Primary store reachable again"),
                other => warn!("{}", other.warning().unwrap_or_default()),
            }
        }
        *current = status;
    }

    /// Whether a warning should be shown.
    pub fn is_degraded(&self) -> bool {
        self.status() != PersistenceStatus::Healthy
    }

    /// Current user-facing warning.
    pub fn warning(&self) -> Option<&'static str> {
        self.status().warning()
    }

    /// Load the stored data, falling back to defaults.
    pub fn load(&self) -> StoreData {
        match self.primary.read() {
            Ok(data) => {
                self.set_status(PersistenceStatus::Healthy);
                return data.unwrap_or_default();
            }
            Err(e) => error!("Loading from {} failed: {}", self.primary.describe(), e),
        }

        let Some(fallback) = &self.fallback else {
            self.set_status(PersistenceStatus::Unsaved);
            return StoreData::default();
        };

        match fallback.read() {
            Ok(data) => {
                self.set_status(PersistenceStatus::Fallback);
                data.unwrap_or_default()
            }
            Err(e) => {
                error!("Loading from {} failed: {}", fallback.describe(), e);
                self.set_status(PersistenceStatus::Unsaved);
                StoreData::default()
            }
        }
    }

    /// Save `data`, falling back if needed. Failures are logged only.
    pub fn save(&self, data: &StoreData, kind: WriteKind) -> PersistenceStatus {
        let status = match self.primary.write(data, kind) {
            Ok(()) => PersistenceStatus::Healthy,
            Err(e) => {
                warn!("Saving to {} failed: {}", self.primary.describe(), e);
                match &self.fallback {
                    Some(fallback) => match fallback.write(data, WriteKind::Edit) {
                        Ok(()) => PersistenceStatus::Fallback,
                        Err(e) => {
                            error!("Saving to {} failed: {}", fallback.describe(), e);
                            PersistenceStatus::Unsaved
                        }
                    },
                    None => PersistenceStatus::Unsaved,
                }
            }
        };
        self.set_status(status);
        status
    }
}

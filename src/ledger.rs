//! Ledger - application state wired to persistence.
//!
//! Every mutation updates the in-memory state first and then queues a save
//! of the full snapshot; callers never wait on storage.

use crate::codec::{export_state, import_into};
use crate::error::Result;
use crate::model::{GlobalSettings, Job, JobUpdate, SettingsUpdate};
use crate::persistence::{Gateway, PersistenceStatus, SaveWorker, WriteKind};
use crate::pricing::JobCosts;
use crate::store::AppState;
use std::sync::Arc;
use tracing::info;

/// A loaded ledger with background persistence.
#[derive(Debug)]
pub struct Ledger {
    state: AppState,
    gateway: Arc<Gateway>,
    saver: SaveWorker,
}

impl Ledger {
    /// Load through `gateway` and start the save worker.
    pub fn open(gateway: Arc<Gateway>) -> Result<Self> {
        let state = AppState::from_data(gateway.load());
        info!("Loaded {} job(s)", state.jobs().len());

        let saver = SaveWorker::spawn(gateway.clone())?;
        Ok(Self {
            state,
            gateway,
            saver,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &GlobalSettings {
        self.state.settings()
    }

    pub fn jobs(&self) -> &[Job] {
        self.state.jobs().jobs()
    }

    pub fn job(&self, id: u64) -> Option<&Job> {
        self.state.jobs().get(id)
    }

    pub fn costs(&self, id: u64) -> Option<JobCosts> {
        self.state.costs(id)
    }

    pub fn rows(&self) -> Vec<(&Job, JobCosts)> {
        self.state.rows()
    }

    /// Status of the last load or finished save.
    pub fn status(&self) -> PersistenceStatus {
        self.gateway.status()
    }

    /// Persistent warning to display, if storage is degraded.
    pub fn warning(&self) -> Option<&'static str> {
        self.gateway.warning()
    }

    fn persist(&self, kind: WriteKind) {
        self.saver.submit(self.state.snapshot(), kind);
    }

    /// Append an empty job and return its id.
    pub fn add_job(&mut self) -> u64 {
        let id = self.state.jobs_mut().add_job().id;
        self.persist(WriteKind::Edit);
        id
    }

    /// Copy job `id`; returns the new id.
    pub fn duplicate_job(&mut self, id: u64) -> Option<u64> {
        let new_id = self.state.jobs_mut().duplicate_job(id).map(|j| j.id)?;
        self.persist(WriteKind::Edit);
        Some(new_id)
    }

    /// Delete job `id`.
    pub fn delete_job(&mut self, id: u64) -> bool {
        let removed = self.state.jobs_mut().delete_job(id);
        if removed {
            self.persist(WriteKind::Edit);
        }
        removed
    }

    /// Reset job `id` in place.
    pub fn clear_job(&mut self, id: u64) -> bool {
        let cleared = self.state.jobs_mut().clear_job(id);
        if cleared {
            self.persist(WriteKind::Edit);
        }
        cleared
    }

    /// Edit one field of job `id`, returning its new costs.
    pub fn update_job(&mut self, id: u64, update: JobUpdate) -> Option<JobCosts> {
        if !self.state.jobs_mut().update_job(id, update) {
            return None;
        }
        self.persist(WriteKind::Edit);
        self.state.costs(id)
    }

    /// Edit one global setting.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.state.update_settings(update);
        self.persist(WriteKind::Edit);
    }

    /// Settings and jobs as pretty-printed JSON.
    pub fn export(&self) -> Result<String> {
        export_state(&self.state)
    }

    /// Replace everything with the content of `text`.
    ///
    /// On error the ledger is unchanged and nothing is saved.
    pub fn import(&mut self, text: &str) -> Result<()> {
        import_into(&mut self.state, text)?;
        info!("Imported {} job(s)", self.state.jobs().len());
        self.persist(WriteKind::Import);
        Ok(())
    }

    /// Wait until all queued saves have been attempted.
    pub fn flush(&self) {
        self.saver.flush();
    }
}

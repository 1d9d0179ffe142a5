//! AppState - settings and jobs owned together.

use super::JobStore;
use crate::error::Result;
use crate::model::{GlobalSettings, Job, SettingsUpdate, StoreData};
use crate::pricing::{calculate_job, JobCosts};

/// The whole editable state of the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    settings: GlobalSettings,
    store: JobStore,
}

impl AppState {
    /// Create a state holding defaults and no jobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted data, renumbering jobs with unusable ids.
    pub fn from_data(data: StoreData) -> Self {
        Self {
            settings: data.global_settings.normalized(),
            store: JobStore::from_parts(data.jobs, data.next_id),
        }
    }

    /// Copy of everything that is persisted.
    pub fn snapshot(&self) -> StoreData {
        StoreData {
            global_settings: self.settings.clone(),
            jobs: self.store.jobs().to_vec(),
            next_id: self.store.next_id(),
        }
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn jobs(&self) -> &JobStore {
        &self.store
    }

    pub fn jobs_mut(&mut self) -> &mut JobStore {
        &mut self.store
    }

    /// Apply one settings edit.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
    }

    /// Wholesale replacement of settings and jobs.
    ///
    /// `None` settings keep the current ones. On error nothing changes.
    pub fn set_from_import(&mut self, settings: Option<GlobalSettings>, jobs: Vec<Job>) -> Result<()> {
        self.store.replace(jobs)?;
        if let Some(settings) = settings {
            self.settings = settings.normalized();
        }
        Ok(())
    }

    /// Costs for job `id`.
    pub fn costs(&self, id: u64) -> Option<JobCosts> {
        self.store
            .get(id)
            .map(|job| calculate_job(job, &self.settings))
    }

    /// Every job paired with its costs, in display order.
    pub fn rows(&self) -> Vec<(&Job, JobCosts)> {
        self.store
            .jobs()
            .iter()
            .map(|job| (job, calculate_job(job, &self.settings)))
            .collect()
    }
}

//! StoreData - the persisted shape of the whole ledger.

use crate::config::MAX_JOB_ID;
use super::{GlobalSettings, Job};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything written to a durable store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub global_settings: GlobalSettings,
    pub jobs: Vec<Job>,
    pub next_id: u64,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            global_settings: GlobalSettings::default(),
            jobs: Vec::new(),
            next_id: 1,
        }
    }
}

impl StoreData {
    /// Build from loosely shaped JSON, defaulting each part independently.
    ///
    /// A missing or malformed `globalSettings`, `jobs`, or `nextId` falls back
    /// to its default without discarding the other parts. `nextId` is raised
    /// above every job id.
    pub fn from_value_lenient(value: &Value) -> Self {
        let global_settings = value
            .get("globalSettings")
            .and_then(|v| serde_json::from_value::<GlobalSettings>(v.clone()).ok())
            .map(GlobalSettings::normalized)
            .unwrap_or_default();

        let jobs = value
            .get("jobs")
            .and_then(|v| serde_json::from_value::<Vec<Job>>(v.clone()).ok())
            .unwrap_or_default();

        let next_id = value
            .get("nextId")
            .and_then(Value::as_u64)
            .filter(|id| (1..=MAX_JOB_ID + 1).contains(id))
            .unwrap_or(1);

        let mut data = Self {
            global_settings,
            jobs,
            next_id,
        };
        data.next_id = data.next_id.max(data.min_next_id());
        data
    }

    /// Smallest `nextId` consistent with the stored jobs.
    ///
    /// Ids above [`MAX_JOB_ID`] are ignored; those jobs are renumbered on restore.
    pub fn min_next_id(&self) -> u64 {
        self.jobs
            .iter()
            .map(|j| j.id)
            .filter(|id| *id <= MAX_JOB_ID)
            .max()
            .unwrap_or(0)
            + 1
    }
}

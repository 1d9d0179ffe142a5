//! JobStore - ordered jobs plus the id allocator.

use crate::config::MAX_JOB_ID;
use crate::error::{LedgerError, Result};
use crate::model::{Job, JobUpdate};
use std::collections::HashSet;
use tracing::warn;

/// Ordered collection of jobs. Insertion order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStore {
    jobs: Vec<Job>,
    next_id: u64,
}

impl Default for JobStore {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 1,
        }
    }
}

fn id_in_range(id: u64) -> bool {
    (1..=MAX_JOB_ID).contains(&id)
}

/// Reject ids out of range and repeated ids.
fn check_ids(jobs: &[Job]) -> Result<()> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if !id_in_range(job.id) {
            return Err(LedgerError::InvalidJobId { id: job.id });
        }
        if !seen.insert(job.id) {
            return Err(LedgerError::DuplicateJobId { id: job.id });
        }
    }
    Ok(())
}

fn max_id_plus_one(jobs: &[Job]) -> u64 {
    jobs.iter()
        .map(|j| j.id)
        .filter(|id| id_in_range(*id))
        .max()
        .unwrap_or(0)
        + 1
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted store. `next_id` is raised above every job id.
    ///
    /// Jobs whose id is out of range or already taken by an earlier job keep
    /// their position and content but get a fresh id.
    pub fn from_parts(jobs: Vec<Job>, next_id: u64) -> Self {
        let next_id = next_id.clamp(1, MAX_JOB_ID + 1).max(max_id_plus_one(&jobs));
        let mut store = Self {
            jobs: Vec::with_capacity(jobs.len()),
            next_id,
        };

        let mut seen = HashSet::with_capacity(jobs.len());
        for mut job in jobs {
            if !id_in_range(job.id) || !seen.insert(job.id) {
                let old = job.id;
                job.id = store.allocate_id();
                seen.insert(job.id);
                warn!("Stored job id {} is invalid or repeated; renumbered to {}", old, job.id);
            }
            store.jobs.push(job);
        }
        store
    }

    /// All jobs in display order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Id the next created job will get.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the store holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Find a job by id.
    pub fn get(&self, id: u64) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Append an empty job.
    pub fn add_job(&mut self) -> &Job {
        let id = self.allocate_id();
        self.jobs.push(Job::new(id));
        &self.jobs[self.jobs.len() - 1]
    }

    /// Append a copy of job `id` under a fresh id. `None` if `id` is unknown.
    pub fn duplicate_job(&mut self, id: u64) -> Option<&Job> {
        let source = self.get(id)?.clone();
        let new_id = self.allocate_id();
        self.jobs.push(source.duplicate(new_id));
        self.jobs.last()
    }

    /// Remove job `id`. Returns whether a job was removed.
    pub fn delete_job(&mut self, id: u64) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != id);
        self.jobs.len() != before
    }

    /// Reset job `id` in place.
    pub fn clear_job(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(job) => {
                job.clear();
                true
            }
            None => false,
        }
    }

    /// Apply one edit to job `id`.
    pub fn update_job(&mut self, id: u64, update: JobUpdate) -> bool {
        match self.get_mut(id) {
            Some(job) => {
                job.apply(update);
                true
            }
            None => false,
        }
    }

    /// Replace every job. `next_id` becomes one past the highest id, or 1.
    ///
    /// Fails without touching the store if an id is out of range or repeated.
    pub fn replace(&mut self, jobs: Vec<Job>) -> Result<()> {
        check_ids(&jobs)?;
        self.next_id = max_id_plus_one(&jobs);
        self.jobs = jobs;
        Ok(())
    }
}

//! AutoBackup - periodic backups independent of editing activity.

use super::{Backups, Cadence};
use crate::error::Result;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};

/// Timer thread taking an auto backup every `interval`. Stops when dropped.
#[derive(Debug)]
pub struct AutoBackup {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AutoBackup {
    /// Start taking backups; the first one happens after one interval.
    pub fn start(backups: Arc<Backups>, interval: Duration) -> Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("printcost-backup".to_string())
            .spawn(move || loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => match backups.rotate(Cadence::Auto) {
                        Ok(Some(_)) => {}
                        Ok(None) => debug!("Nothing to back up yet"),
                        Err(e) => error!("Auto backup of {} failed: {}", backups.source().display(), e),
                    },
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        info!("Auto backup every {}s", interval.as_secs_f64());
        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Block the calling thread for as long as the timer runs.
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Auto backup thread panicked");
            }
        }
    }

    /// Stop the timer and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Auto backup thread panicked");
            }
        }
    }
}

impl Drop for AutoBackup {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AUTO_BACKUP_RETENTION;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_periodic_backups_respect_retention() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("data.json");
        fs::write(&source, "{}").unwrap();
        let backups = Arc::new(Backups::new(&source));

        let timer = AutoBackup::start(backups.clone(), Duration::from_millis(15)).unwrap();
        thread::sleep(Duration::from_millis(250));
        timer.stop();

        let kept = backups.list(Cadence::Auto).unwrap();
        assert!(!kept.is_empty());
        assert!(kept.len() <= AUTO_BACKUP_RETENTION);
        assert!(backups.list(Cadence::Import).unwrap().is_empty());
    }

    #[test]
    fn test_stop_is_prompt() {
        let dir = tempdir().unwrap();
        let backups = Arc::new(Backups::new(dir.path().join("data.json")));
        let timer = AutoBackup::start(backups, Duration::from_secs(3600)).unwrap();
        let started = std::time::Instant::now();
        timer.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

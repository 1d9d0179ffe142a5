//! SaveWorker - fire-and-forget saves on a background thread.
//!
//! Snapshots queued while a save is running are coalesced: only the newest
//! one is written, so at most one save is in flight at any time.

use super::{Gateway, WriteKind};
use crate::error::Result;
use crate::model::StoreData;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

enum Message {
    Save(StoreData, WriteKind),
    Flush(Sender<()>),
}

/// Background writer in front of a [`Gateway`].
#[derive(Debug)]
pub struct SaveWorker {
    sender: Option<Sender<Message>>,
    handle: Option<JoinHandle<()>>,
}

impl SaveWorker {
    /// Start the worker thread.
    pub fn spawn(gateway: Arc<Gateway>) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("printcost-save".to_string())
            .spawn(move || run(&gateway, receiver))?;
        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    fn send(&self, message: Message) -> bool {
        match &self.sender {
            Some(sender) => sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Queue a save and return immediately.
    pub fn submit(&self, data: StoreData, kind: WriteKind) {
        if !self.send(Message::Save(data, kind)) {
            error!("Save worker stopped; change not saved");
        }
    }

    /// Block until every queued save has been attempted.
    pub fn flush(&self) {
        let (ack, done) = mpsc::channel();
        if self.send(Message::Flush(ack)) {
            // Err only if the worker died, in which case there is nothing to wait for.
            let _ = done.recv();
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        // Closing the channel lets the worker finish the queue and exit.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Save worker panicked");
            }
        }
    }
}

fn run(gateway: &Gateway, receiver: Receiver<Message>) {
    while let Ok(first) = receiver.recv() {
        let mut pending: Option<(StoreData, WriteKind)> = None;
        let mut waiters = Vec::new();
        let mut coalesced = 0usize;

        let mut take = |message: Message| match message {
            Message::Save(data, kind) => {
                let kind = match pending.take() {
                    Some((_, previous)) => {
                        coalesced += 1;
                        previous.merge(kind)
                    }
                    None => kind,
                };
                pending = Some((data, kind));
            }
            Message::Flush(ack) => waiters.push(ack),
        };

        take(first);
        while let Ok(next) = receiver.try_recv() {
            take(next);
        }

        if let Some((data, kind)) = pending {
            if coalesced > 0 {
                debug!("Coalesced {} queued save(s)", coalesced);
            }
            gateway.save(&data, kind);
        }
        for ack in waiters {
            let _ = ack.send(());
        }
    }
}

use std::sync::{
    Mutex, PoisonError,
    mpsc::{self, Receiver, Sender, TryRecvError},
};
use tracing::debug;

use super::Task;

/// Both lists as they were right after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Sending halves of every live subscription.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Mutex<Vec<Sender<Snapshot>>>,
}

impl Subscribers {
    pub fn register(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        Subscription { receiver: rx }
    }

    pub fn is_empty(&self) -> bool {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Sends `snapshot` to every subscriber, forgetting the ones that went away.
    pub fn notify(&self, snapshot: &Snapshot) {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders.retain(|tx| tx.send(snapshot.clone()).is_ok());
        debug!(subscribers = senders.len(), "snapshot sent");
    }
}

/// Receives a [`Snapshot`] after each successful change to the task lists.
///
/// The channel closes when the owning `TaskList` is dropped.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<Snapshot>,
}

impl Subscription {
    /// Next pending snapshot, without blocking.
    pub fn try_recv(&self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Blocks until the next snapshot. `None` once the task list is gone.
    pub fn recv(&self) -> Option<Snapshot> {
        self.receiver.recv().ok()
    }

    /// Drains the queue and keeps only the most recent snapshot.
    pub fn latest(&self) -> Option<Snapshot> {
        let mut last = None;
        loop {
            match self.receiver.try_recv() {
                Ok(s) => last = Some(s),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return last,
            }
        }
    }

    /// Stops receiving. The list drops the sender on its next change.
    pub fn unsubscribe(self) {
        drop(self.receiver);
    }
}

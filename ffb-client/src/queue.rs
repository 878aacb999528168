//! Work handed from other contexts to the context that owns the session.

use std::{collections::VecDeque, sync::Arc};

use api::NetCommand;
use derivative::Derivative;
use parking_lot::Mutex;

use crate::Session;

/// Connection generation. Bumped on every connect and stop so work produced
/// by an older connection can be recognised and dropped.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, derive_more::Display)]
pub struct Epoch(u64);

impl Epoch {
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

pub type Task = Box<dyn FnOnce(&mut Session) + Send>;

#[derive(Derivative)]
#[derivative(Debug)]
pub(crate) enum QueuedAction {
    Command(NetCommand),
    /// A frame the transport received but could not decode.
    Malformed(String),
    /// The receive stream ended, with the error that ended it if any.
    Closed(Option<anyhow::Error>),
    Task(#[derivative(Debug = "ignore")] Task),
}

#[derive(Debug)]
pub(crate) struct Queued {
    /// `None` for work that does not belong to a connection.
    pub epoch: Option<Epoch>,
    pub action: QueuedAction,
}

#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    inner: Arc<Mutex<VecDeque<Queued>>>,
}

impl ActionQueue {
    pub(crate) fn push(&self, epoch: Option<Epoch>, action: QueuedAction) {
        self.inner.lock().push_back(Queued { epoch, action });
    }

    pub(crate) fn pop(&self) -> Option<Queued> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Cloneable handle for queueing arbitrary work onto the session.
#[derive(Debug, Clone)]
pub struct Executor {
    queue: ActionQueue,
}

impl Executor {
    pub(crate) fn new(queue: ActionQueue) -> Self {
        Self { queue }
    }

    /// Runs `task` on the next [`Session::drain`].
    pub fn execute(&self, task: impl FnOnce(&mut Session) + Send + 'static) {
        self.queue.push(None, QueuedAction::Task(Box::new(task)));
    }
}

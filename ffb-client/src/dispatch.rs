//! Maps a message's kind tag to the one handler that applies it to the model.

use std::collections::HashMap;

use api::{DialogParameter, Message, ModelChange, Payload};
use ffb_core::{Core, Result};
use once_cell::sync::Lazy;
use tracing::trace;

use crate::model_change;

type BoxedHandler<M> = Box<dyn Fn(&mut Core, &M) -> Result<()> + Send + Sync>;

pub struct Dispatcher<M: Message> {
    handlers: HashMap<M::Kind, BoxedHandler<M>>,
}

impl<M: Message> Default for Dispatcher<M> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<M: Message> Dispatcher<M> {
    /// Binds `handler` to the kind of `P`. A later registration for the same
    /// kind replaces the earlier one.
    pub fn register<P: Payload<M>>(&mut self, handler: fn(&mut Core, &P) -> Result<()>) -> &mut Self {
        let handler: BoxedHandler<M> = Box::new(move |core: &mut Core, message: &M| {
            match P::extract(message) {
                Some(payload) => handler(core, payload),
                None => Ok(()),
            }
        });
        self.handlers.insert(P::KIND, handler);
        self
    }

    pub fn handles(&self, kind: M::Kind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Applies `message` to `core`. Returns `Ok(false)` when no handler is
    /// registered for its kind.
    pub fn dispatch(&self, core: &mut Core, message: &M) -> Result<bool> {
        let kind = message.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            trace!("no handler registered for {kind:?}");
            return Ok(false);
        };
        trace!("apply {kind:?}");
        handler(core, message)?;
        Ok(true)
    }
}

pub static MODEL_CHANGES: Lazy<Dispatcher<ModelChange>> = Lazy::new(|| {
    let mut dispatcher = Dispatcher::default();
    model_change::register(&mut dispatcher);
    dispatcher
});

pub static DIALOGS: Lazy<Dispatcher<DialogParameter>> = Lazy::new(|| {
    let mut dispatcher = Dispatcher::default();
    model_change::register_dialogs(&mut dispatcher);
    dispatcher
});

pub trait ApplyChange {
    /// Applies one incremental change. Kinds without a handler are ignored.
    fn apply_change(&mut self, change: &ModelChange) -> Result<()>;
}

impl ApplyChange for Core {
    fn apply_change(&mut self, change: &ModelChange) -> Result<()> {
        MODEL_CHANGES.dispatch(self, change).map(|_| ())
    }
}

//! Chat, log and sound notifications, plus the history behind them.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    sync::atomic::{AtomicUsize, Ordering},
};

use api::Report;
use derivative::Derivative;
use ffb_core::{ChatSource, Core};
use getset::{CopyGetters, Getters};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct ChatEntry {
    #[getset(get = "pub")]
    coach: String,
    #[getset(get_copy = "pub")]
    source: ChatSource,
    #[getset(get = "pub")]
    text: String,
}

impl ChatEntry {
    pub fn new(coach: impl Into<String>, source: ChatSource, text: impl Into<String>) -> Self {
        Self {
            coach: coach.into(),
            source,
            text: text.into(),
        }
    }
}

/// Whether a report is happening now or is history being replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Normal,
    Silent,
}

pub type ChatListener = dyn Fn(&ChatEntry) -> anyhow::Result<()>;
pub type ReportListener = dyn Fn(&Report, ReportMode) -> anyhow::Result<()>;
pub type SoundListener = dyn Fn(&str) -> anyhow::Result<()>;

#[derive(Derivative)]
#[derivative(Debug, Default)]
pub struct NotificationHub {
    chat: Vec<ChatEntry>,
    log: Vec<Report>,
    #[derivative(Debug = "ignore")]
    chat_bus: Rc<ListenerBus<ChatListener>>,
    #[derivative(Debug = "ignore")]
    report_bus: Rc<ListenerBus<ReportListener>>,
    #[derivative(Debug = "ignore")]
    sound_bus: Rc<ListenerBus<SoundListener>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_chat(
        &self,
        listener: impl Fn(&ChatEntry) -> anyhow::Result<()> + 'static,
    ) -> ListenerToken {
        self.chat_bus.clone().register(Rc::new(listener))
    }

    pub fn on_report(
        &self,
        listener: impl Fn(&Report, ReportMode) -> anyhow::Result<()> + 'static,
    ) -> ListenerToken {
        self.report_bus.clone().register(Rc::new(listener))
    }

    pub fn on_sound(&self, listener: impl Fn(&str) -> anyhow::Result<()> + 'static) -> ListenerToken {
        self.sound_bus.clone().register(Rc::new(listener))
    }

    /// Records a chat line, attributing it to a side by the coach names in `model`.
    pub fn add_chat_entry(&mut self, model: &Core, coach: &str, text: &str) -> anyhow::Result<()> {
        let entry = ChatEntry::new(coach, model.classify_coach(coach), text);
        self.chat.push(entry.clone());
        self.deliver_chat(&entry)
    }

    /// Records a report. Listener failures are logged and never reach the caller.
    pub fn add_report(&mut self, report: Report) {
        self.deliver_report(&report, ReportMode::Normal);
        self.log.push(report);
    }

    pub fn play_sound(&self, sound: &str) -> anyhow::Result<()> {
        for listener in self.sound_bus.listeners() {
            listener(sound)?;
        }
        Ok(())
    }

    /// Replays the whole log (silently) and then the whole chat to every
    /// current listener.
    pub fn refresh_state(&self) -> anyhow::Result<()> {
        debug!(
            "replay {} reports and {} chat entries",
            self.log.len(),
            self.chat.len()
        );
        for report in &self.log {
            self.deliver_report(report, ReportMode::Silent);
        }
        for entry in &self.chat {
            self.deliver_chat(entry)?;
        }
        Ok(())
    }

    pub fn chat(&self) -> &[ChatEntry] {
        &self.chat
    }

    pub fn log(&self) -> &[Report] {
        &self.log
    }

    pub fn clear_history(&mut self) {
        self.chat.clear();
        self.log.clear();
    }

    fn deliver_chat(&self, entry: &ChatEntry) -> anyhow::Result<()> {
        for listener in self.chat_bus.listeners() {
            listener(entry)?;
        }
        Ok(())
    }

    fn deliver_report(&self, report: &Report, mode: ReportMode) {
        for listener in self.report_bus.listeners() {
            if let Err(err) = listener(report, mode) {
                error!("report listener failed on {report:?}: {err:#}");
            }
        }
    }
}

/// Subscribers of one event category.
pub struct ListenerBus<F: ?Sized> {
    listeners: RefCell<Vec<(ListenerId, Rc<F>)>>,
}

impl<F: ?Sized> Default for ListenerBus<F> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(vec![]),
        }
    }
}

impl<F: ?Sized + 'static> ListenerBus<F> {
    pub fn register(self: Rc<Self>, listener: Rc<F>) -> ListenerToken {
        let id = ListenerId::new();
        self.listeners.borrow_mut().push((id, listener));
        let bus: Weak<dyn Deregister> = Rc::downgrade(&self) as Weak<dyn Deregister>;
        ListenerToken { id, bus }
    }

    /// Copy of the current listeners, so a listener may drop its own token
    /// while being called.
    fn listeners(&self) -> Vec<Rc<F>> {
        self.listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

trait Deregister {
    fn deregister(&self, id: ListenerId);
}

impl<F: ?Sized> Deregister for ListenerBus<F> {
    fn deregister(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|(jd, _)| id == *jd) {
            listeners.remove(index);
        }
    }
}

/// Keeps a listener subscribed. Dropping the token unsubscribes it.
#[must_use]
pub struct ListenerToken {
    id: ListenerId,
    bus: Weak<dyn Deregister>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct ListenerId(usize);

impl ListenerId {
    fn new() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(0);
        ListenerId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Drop for ListenerToken {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.deregister(self.id)
        }
    }
}

use std::sync::Arc;

use api::{GameId, NetCommand, ProtocolError, Report};
use derivative::Derivative;
use ffb_core::Core;
use futures::{FutureExt, StreamExt};
use getset::{CopyGetters, Getters};
use stream_cancel::{StreamExt as _, Trigger, Tripwire};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::{
    dispatch::ApplyChange,
    hub::NotificationHub,
    queue::{ActionQueue, Epoch, Executor, Queued, QueuedAction},
    snapshot, Result, SessionError, Transport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Connecting,
    Active,
}

/// The one game this client is watching.
///
/// All mutation happens on the context that owns the session, inside
/// [`Session::drain`] or the public methods. The transport task only ever
/// pushes onto the action queue.
#[derive(Derivative, Getters, CopyGetters)]
#[derivative(Debug)]
pub struct Session {
    #[getset(get = "pub")]
    model: Core,
    #[getset(get = "pub")]
    hub: NotificationHub,
    #[getset(get_copy = "pub")]
    state: SessionState,
    #[getset(get_copy = "pub")]
    game_id: Option<GameId>,
    coach_name: Option<String>,
    epoch: Epoch,
    queue: ActionQueue,
    #[derivative(Debug = "ignore")]
    transport: Arc<dyn Transport>,
    /// Dropped on stop; ends the receive loop of the current connection.
    #[derivative(Debug = "ignore")]
    recv_trigger: Option<Trigger>,
}

impl Session {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            model: Core::new(),
            hub: NotificationHub::new(),
            state: SessionState::Idle,
            game_id: None,
            coach_name: None,
            epoch: Epoch::default(),
            queue: ActionQueue::default(),
            transport,
            recv_trigger: None,
        }
    }

    pub fn executor(&self) -> Executor {
        Executor::new(self.queue.clone())
    }

    pub fn coach_name(&self) -> Option<&str> {
        self.coach_name.as_deref()
    }

    pub fn set_coach_name(&mut self, name: impl Into<String>) {
        self.coach_name = Some(name.into());
    }

    /// Starts watching `game_id`. Any previous connection is stopped first.
    ///
    /// The returned task connects the transport and feeds the action queue
    /// until the connection ends; nothing is applied until [`Session::drain`].
    pub fn connect(&mut self, game_id: GameId) -> JoinHandle<()> {
        if self.state != SessionState::Idle {
            self.stop();
        }
        self.hub.clear_history();
        if let Err(err) = self.hub.refresh_state() {
            error!("listener failed while resetting history: {err:#}");
        }
        self.epoch.advance();
        self.game_id = Some(game_id);
        self.state = SessionState::Connecting;
        debug!("connecting to game {game_id}, epoch {}", self.epoch);

        let (trigger, tripwire) = Tripwire::new();
        self.recv_trigger = Some(trigger);
        tokio::spawn(receive_loop(
            self.transport.clone(),
            self.queue.clone(),
            self.epoch,
            tripwire,
        ))
    }

    /// Leaves the current game. Calling it again, or while idle, is harmless.
    pub fn stop(&mut self) {
        if self.state != SessionState::Idle {
            debug!("stop session for game {:?}", self.game_id);
        }
        self.epoch.advance();
        self.recv_trigger = None;
        self.transport.disconnect();
        self.model.clear();
        self.game_id = None;
        self.state = SessionState::Idle;
    }

    /// Runs everything queued so far. Work from an earlier connection is
    /// discarded. Returns the number of actions that ran.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Some(Queued { epoch, action }) = self.queue.pop() {
            if epoch.is_some_and(|epoch| epoch != self.epoch) {
                trace!("discard stale {action:?}");
                continue;
            }
            processed += 1;
            match action {
                QueuedAction::Command(command) => self.apply(&command),
                QueuedAction::Malformed(detail) => {
                    warn!("malformed frame: {detail}");
                    self.add_report(Report::raw(format!("Malformed server message: {detail}")));
                }
                QueuedAction::Closed(reason) => self.on_transport_closed(reason),
                QueuedAction::Task(task) => task(self),
            }
        }
        processed
    }

    /// Applies one server command. Returns `Ok(false)` for commands this
    /// client does not handle.
    pub fn handle_net_command(&mut self, command: &NetCommand) -> Result<bool> {
        match command {
            NetCommand::ServerVersion(version) => {
                self.add_report(Report::raw(format!(
                    "Connected - Server version {}",
                    version.server_version
                )));
                if let Some(game_id) = self.game_id {
                    self.transport
                        .spectate(game_id, self.coach_name())
                        .map_err(SessionError::Transport)?;
                }
            }
            NetCommand::ServerTalk(talk) => {
                for text in &talk.talks {
                    self.add_chat_entry(&talk.coach, text)?;
                }
            }
            NetCommand::ServerSound(sound) => self.play_sound(&sound.sound)?,
            NetCommand::ServerJoin(join) => self.add_report(Report::raw(format!(
                "{} {} joins the game",
                join.client_mode, join.coach
            ))),
            NetCommand::ServerLeave(leave) => self.add_report(Report::raw(format!(
                "{} {} leaves the game",
                leave.client_mode, leave.coach
            ))),
            NetCommand::ServerGameState(state) => {
                snapshot::load(&mut self.model, &state.game)?;
                if self.state == SessionState::Connecting {
                    debug!("game {:?} is active", self.game_id);
                    self.state = SessionState::Active;
                }
            }
            NetCommand::ServerModelSync(sync) => {
                for change in &sync.model_change_list.model_change_array {
                    self.model.apply_change(change)?;
                }
                for report in &sync.report_list.reports {
                    self.add_report(report.clone());
                }
                if let Some(sound) = &sync.sound {
                    self.play_sound(sound)?;
                }
            }
            NetCommand::Unknown => {
                trace!("ignore unknown net command");
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn add_chat_entry(&mut self, coach: &str, text: &str) -> Result<()> {
        self.hub
            .add_chat_entry(&self.model, coach, text)
            .map_err(SessionError::Listener)
    }

    pub fn add_report(&mut self, report: Report) {
        self.hub.add_report(report);
    }

    pub fn play_sound(&self, sound: &str) -> Result<()> {
        self.hub.play_sound(sound).map_err(SessionError::Listener)
    }

    /// Replays chat and log history to the current listeners.
    pub fn refresh_state(&self) -> Result<()> {
        self.hub.refresh_state().map_err(SessionError::Listener)
    }

    fn apply(&mut self, command: &NetCommand) {
        match self.handle_net_command(command) {
            Ok(_) => {}
            Err(err @ SessionError::Listener(_)) => error!("{err}"),
            Err(err) => {
                error!("failed to apply {command:?}: {err}");
                self.add_report(Report::raw(format!("Cannot apply server message: {err}")));
            }
        }
    }

    fn on_transport_closed(&mut self, reason: Option<anyhow::Error>) {
        let line = match reason {
            Some(err) => {
                warn!("connection to game {:?} failed: {err:#}", self.game_id);
                format!("Connection lost: {err:#}")
            }
            None => {
                debug!("connection to game {:?} closed", self.game_id);
                "Connection closed".to_string()
            }
        };
        self.add_report(Report::raw(line));
        self.stop();
    }
}

async fn receive_loop(
    transport: Arc<dyn Transport>,
    queue: ActionQueue,
    epoch: Epoch,
    tripwire: Tripwire,
) {
    let stopped = |tripwire: &Tripwire| tripwire.clone().now_or_never().unwrap_or(false);
    if stopped(&tripwire) {
        debug!("session stopped before connecting, epoch {epoch}");
        return;
    }
    let connected = tokio::select! {
        biased;
        _ = tripwire.clone() => None,
        result = transport.connect() => Some(result),
    };
    match connected {
        None => {
            debug!("session stopped while connecting, epoch {epoch}");
            return;
        }
        Some(Err(err)) => {
            queue.push(Some(epoch), QueuedAction::Closed(Some(err)));
            return;
        }
        Some(Ok(())) => {}
    }
    if stopped(&tripwire) {
        transport.disconnect();
        return;
    }
    debug!("receive loop started, epoch {epoch}");
    let mut commands = transport.start_receive().take_until_if(tripwire).boxed();
    let mut failure = None;
    while let Some(command) = commands.next().await {
        match command {
            Ok(command) => queue.push(Some(epoch), QueuedAction::Command(command)),
            Err(err) if err.downcast_ref::<ProtocolError>().is_some() => {
                queue.push(Some(epoch), QueuedAction::Malformed(format!("{err:#}")))
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }
    queue.push(Some(epoch), QueuedAction::Closed(failure));
    debug!("receive loop ended, epoch {epoch}");
}

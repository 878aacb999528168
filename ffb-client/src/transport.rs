//! The seam between the session and whatever carries protocol frames.

use anyhow::{anyhow, Context as _};
use api::{ClientCommand, GameId, NetCommand};
use futures::{
    future::{self, BoxFuture},
    stream::{self, BoxStream},
    FutureExt, StreamExt,
};
use std::sync::Arc;

use parking_lot::Mutex;
use stream_cancel::{StreamExt as _, Trigger, Tripwire};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// A connection to the game server.
///
/// Decode failures are yielded as [`api::ProtocolError`] items and the stream
/// keeps going. Any other error item ends the connection.
pub trait Transport: Send + Sync {
    fn connect(&self) -> BoxFuture<'_, anyhow::Result<()>>;

    /// Decoded commands until [`Transport::disconnect`] is called or the
    /// connection drops.
    fn start_receive(&self) -> BoxStream<'static, anyhow::Result<NetCommand>>;

    /// Ends the receive stream. Safe to call at any time, any number of times.
    fn disconnect(&self);

    /// Asks to watch `game_id`, announcing `coach` when set.
    fn spectate(&self, game_id: GameId, coach: Option<&str>) -> anyhow::Result<()>;
}

/// In-process transport fed with JSON frames through a channel.
///
/// The frame channel outlives connections, so the same pair can be
/// connected again after [`Transport::disconnect`].
pub struct ChannelTransport {
    incoming: Arc<tokio::sync::Mutex<UnboundedReceiver<String>>>,
    requests: UnboundedSender<ClientCommand>,
    connection: Mutex<Option<ConnectionInner>>,
}

struct ConnectionInner {
    _recv_trigger: Trigger,
    tripwire: Tripwire,
}

/// The server side of a [`ChannelTransport`].
pub struct ServerEnd {
    pub frames: UnboundedSender<String>,
    pub requests: UnboundedReceiver<ClientCommand>,
}

impl ServerEnd {
    pub fn send(&self, frame: impl Into<String>) -> anyhow::Result<()> {
        self.frames
            .send(frame.into())
            .map_err(|_| anyhow!("client end of the channel is closed"))
    }
}

impl ChannelTransport {
    pub fn pair() -> (Self, ServerEnd) {
        let (frames, incoming) = mpsc::unbounded_channel();
        let (requests, requests_rx) = mpsc::unbounded_channel();
        let transport = ChannelTransport {
            incoming: Arc::new(tokio::sync::Mutex::new(incoming)),
            requests,
            connection: Mutex::new(None),
        };
        let server = ServerEnd {
            frames,
            requests: requests_rx,
        };
        (transport, server)
    }

    pub fn connected(&self) -> bool {
        self.connection.lock().is_some()
    }
}

impl Transport for ChannelTransport {
    fn connect(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        if self.requests.is_closed() {
            return future::ready(Err(anyhow!("server end of the channel is closed"))).boxed();
        }
        let (trigger, tripwire) = Tripwire::new();
        *self.connection.lock() = Some(ConnectionInner {
            _recv_trigger: trigger,
            tripwire,
        });
        future::ready(Ok(())).boxed()
    }

    fn start_receive(&self) -> BoxStream<'static, anyhow::Result<NetCommand>> {
        let tripwire = match self.connection.lock().as_ref() {
            Some(connection) => connection.tripwire.clone(),
            None => return stream::once(future::ready(Err(anyhow!("not connected")))).boxed(),
        };
        stream::unfold(self.incoming.clone(), |incoming| async move {
            let frame = incoming.lock().await.recv().await?;
            let command = NetCommand::from_json(&frame)
                .with_context(|| format!("cannot decode frame {frame:?}"));
            Some((command, incoming))
        })
        .take_until_if(tripwire)
        .boxed()
    }

    fn disconnect(&self) {
        if self.connection.lock().take().is_some() {
            debug!("channel transport disconnected");
        }
    }

    fn spectate(&self, game_id: GameId, coach: Option<&str>) -> anyhow::Result<()> {
        self.requests
            .send(ClientCommand::spectate(game_id, coach.map(str::to_string)))
            .map_err(|_| anyhow!("server end of the channel is closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ProtocolError;
    use assert2::{assert, check, let_assert};

    #[tokio::test]
    async fn receives_decoded_commands() -> anyhow::Result<()> {
        let (transport, server) = ChannelTransport::pair();
        transport.connect().await?;
        let mut commands = transport.start_receive();

        server.send(r#"{"netCommandId":"serverSound","sound":"kickoff"}"#)?;
        server.send("garbage")?;
        drop(server);

        let_assert!(Some(Ok(NetCommand::ServerSound(sound))) = commands.next().await);
        check!(sound.sound == "kickoff");
        let_assert!(Some(Err(err)) = commands.next().await);
        assert!(err.downcast_ref::<ProtocolError>().is_some());
        assert!(commands.next().await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn disconnect_ends_the_stream() -> anyhow::Result<()> {
        let (transport, _server) = ChannelTransport::pair();
        transport.connect().await?;
        let mut commands = transport.start_receive();
        transport.disconnect();
        transport.disconnect();
        check!(!transport.connected());
        assert!(commands.next().await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn receiving_requires_connection() {
        let (transport, _server) = ChannelTransport::pair();
        let mut commands = transport.start_receive();
        let_assert!(Some(Err(_)) = commands.next().await);
    }

    #[tokio::test]
    async fn spectate_sends_join_request() -> anyhow::Result<()> {
        let (transport, mut server) = ChannelTransport::pair();
        transport.spectate(GameId(7), Some("Carol"))?;
        let_assert!(Some(ClientCommand::ClientJoin(join)) = server.requests.recv().await);
        check!(join.game_id == GameId(7));
        check!(join.client_mode == "spectator");
        check!(join.coach.as_deref() == Some("Carol"));
        Ok(())
    }

    #[tokio::test]
    async fn reconnects_after_disconnect() -> anyhow::Result<()> {
        let (transport, server) = ChannelTransport::pair();
        transport.connect().await?;
        let mut first = transport.start_receive();
        transport.disconnect();
        assert!(first.next().await.is_none());
        drop(first);

        transport.connect().await?;
        let mut second = transport.start_receive();
        server.send(r#"{"netCommandId":"serverSound","sound":"whistle"}"#)?;
        let_assert!(Some(Ok(NetCommand::ServerSound(sound))) = second.next().await);
        check!(sound.sound == "whistle");
        check!(transport.connected());
        Ok(())
    }
}

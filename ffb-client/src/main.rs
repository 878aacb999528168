use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use ffb_client::{ChannelTransport, ClientConfig, ServerEnd, Session, SessionState};
use itertools::Itertools;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc::UnboundedSender,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DRAIN_INTERVAL: Duration = Duration::from_millis(20);

/// Replays a JSON-lines capture of server commands (file argument or stdin)
/// through a session and logs what a viewer would see.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (transport, ServerEnd { frames, requests: _requests }) = ChannelTransport::pair();
    let mut session = Session::new(Arc::new(transport));
    if let Some(name) = config.coach_name() {
        session.set_coach_name(name.clone());
    }

    let _chat = session.hub().on_chat(|entry| {
        info!("chat [{:?}] {}: {}", entry.source(), entry.coach(), entry.text());
        Ok(())
    });
    let _log = session.hub().on_report(|report, mode| {
        info!("log ({mode:?}) {report}");
        Ok(())
    });
    let _sound = session.hub().on_sound(|sound| {
        info!("sound {sound}");
        Ok(())
    });

    let game_id = config.game_id().unwrap_or_default();
    let receiver = session.connect(game_id);
    let feeder = tokio::spawn(feed(std::env::args().nth(1), frames));

    let mut ticks = tokio::time::interval(DRAIN_INTERVAL);
    while session.state() != SessionState::Idle {
        ticks.tick().await;
        session.drain();
    }

    let sent = feeder.await??;
    receiver.await?;
    let chat_by_side = session
        .hub()
        .chat()
        .iter()
        .counts_by(|entry| entry.source())
        .into_iter()
        .map(|(source, count)| format!("{source:?}={count}"))
        .sorted()
        .join(", ");
    info!(
        "replayed {sent} frames of game {game_id}: {} log lines, chat {}",
        session.hub().log().len(),
        chat_by_side
    );
    Ok(())
}

async fn feed(path: Option<String>, frames: UnboundedSender<String>) -> anyhow::Result<usize> {
    let input: Box<dyn AsyncRead + Unpin + Send> = match &path {
        Some(path) => Box::new(
            File::open(path)
                .await
                .with_context(|| format!("cannot open capture {path}"))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };
    let mut lines = BufReader::new(input).lines();
    let mut sent = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        frames
            .send(line)
            .context("session stopped before the capture was fully replayed")?;
        sent += 1;
    }
    Ok(sent)
}

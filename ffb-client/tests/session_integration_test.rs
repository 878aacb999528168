use std::{cell::RefCell, rc::Rc, sync::Arc, time::Duration};

use anyhow::{Context as _, Result};
use api::{ClientCommand, GameId, Report};
use assert2::{assert, check, let_assert};
use ffb_client::{ChannelTransport, ServerEnd, Session, SessionState};
use ffb_core::{overlay::BlockDieFace, ChatSource, Coordinate};

const VERSION: &str = r#"{"netCommandId":"serverVersion","serverVersion":"2.9.1"}"#;

const GAME_STATE: &str = r#"{
    "netCommandId": "serverGameState",
    "game": {
        "half": 1,
        "turnMode": "regular",
        "teamHome": {
            "teamId": "th", "teamName": "Reavers", "coach": "Alice",
            "roster": {"positionArray": [{"positionId": "l", "shorthand": "L", "positionName": "Lineman"}]},
            "playerArray": [{"playerId": "h1", "playerName": "Griff", "positionId": "l", "movement": 6}]
        },
        "teamAway": {
            "teamId": "ta", "teamName": "Gouged Eye", "coach": "Bob",
            "roster": {"positionArray": [{"positionId": "l", "shorthand": "L", "positionName": "Lineman"}]},
            "playerArray": [{"playerId": "a1", "playerName": "Snag", "positionId": "l", "movement": 5}]
        }
    }
}"#;

const MODEL_SYNC: &str = r#"{
    "netCommandId": "serverModelSync",
    "modelChangeList": {"modelChangeArray": [
        {"modelChangeId": "fieldModelSetBallCoordinate", "modelChangeValue": [13, 7]},
        {"modelChangeId": "playerSetCoordinate", "modelChangeKey": "h1", "modelChangeValue": [12, 7]},
        {"modelChangeId": "actingPlayerSetPlayerId", "modelChangeValue": "h1"},
        {"modelChangeId": "gameSetDialogParameter", "modelChangeValue":
            {"dialogId": "blockRoll", "choosingTeamId": "th", "nrOfDice": 2, "blockRoll": [3, 6]}},
        {"modelChangeId": "gameSetWeather", "modelChangeValue": "nice"}
    ]},
    "reportList": {"reports": [{"reportId": "rawString", "text": "Griff blocks Snag"}]},
    "sound": "block"
}"#;

const TALK: &str = r#"{"netCommandId":"serverTalk","coach":"Bob","talks":["nice block"]}"#;

async fn drain_until(session: &mut Session, done: impl Fn(&Session) -> bool) -> Result<()> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            session.drain();
            if done(session) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .context("session did not reach the expected state in time")
}

fn new_session() -> (Session, ServerEnd) {
    let (transport, server) = ChannelTransport::pair();
    (Session::new(Arc::new(transport)), server)
}

#[tokio::test]
async fn spectating_a_game_end_to_end() -> Result<()> {
    let (mut session, mut server) = new_session();
    let sounds: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = sounds.clone();
    let _sound = session.hub().on_sound(move |sound| {
        sink.borrow_mut().push(sound.to_string());
        Ok(())
    });

    let receiver = session.connect(GameId(7));
    server.send(VERSION)?;
    drain_until(&mut session, |s| !s.hub().log().is_empty()).await?;
    let_assert!(Some(ClientCommand::ClientJoin(join)) = server.requests.recv().await);
    check!(join.game_id == GameId(7));

    server.send(GAME_STATE)?;
    drain_until(&mut session, |s| s.state() == SessionState::Active).await?;
    check!(session.model().player_count() == 2);

    server.send(MODEL_SYNC)?;
    server.send(TALK)?;
    drain_until(&mut session, |s| !s.hub().chat().is_empty()).await?;

    let model = session.model();
    check!(model.ball().coordinate == Some(Coordinate::new(13, 7)));
    let_assert!(Ok(Some(acting)) = model.acting());
    check!(acting.coordinate() == Some(Coordinate::new(12, 7)));
    let faces: Vec<BlockDieFace> = model
        .block_dice()
        .iter()
        .filter(|die| die.read().active)
        .map(|die| die.read().roll)
        .collect();
    check!(faces == vec![BlockDieFace::Pushback, BlockDieFace::Pow]);
    check!(*sounds.borrow() == vec!["block".to_string()]);
    check!(session.hub().chat()[0].source() == ChatSource::Away);
    check!(session.hub().log().last() == Some(&Report::raw("Griff blocks Snag")));

    drop(server);
    drain_until(&mut session, |s| s.state() == SessionState::Idle).await?;
    receiver.await?;
    check!(session.game_id() == None);
    check!(session.model().player_count() == 0);
    check!(session.hub().log().last() == Some(&Report::raw("Connection closed")));
    Ok(())
}

#[tokio::test]
async fn malformed_frame_becomes_a_log_line() -> Result<()> {
    let (mut session, server) = new_session();
    let _receiver = session.connect(GameId(1));
    server.send("{\"netCommandId\": ")?;
    server.send(GAME_STATE)?;
    drain_until(&mut session, |s| s.state() == SessionState::Active).await?;

    let_assert!([Report::RawString(line)] = session.hub().log());
    assert!(line.text.starts_with("Malformed server message"));
    Ok(())
}

#[tokio::test]
async fn stop_ends_receiving_and_drops_pending_work() -> Result<()> {
    let (mut session, server) = new_session();
    let receiver = session.connect(GameId(2));
    server.send(GAME_STATE)?;
    drain_until(&mut session, |s| s.state() == SessionState::Active).await?;

    server.send(TALK)?;
    session.stop();
    session.stop();
    tokio::time::timeout(Duration::from_secs(5), receiver).await??;

    check!(session.drain() == 0);
    check!(session.state() == SessionState::Idle);
    check!(session.hub().chat().is_empty());
    Ok(())
}

#[tokio::test]
async fn reconnects_to_another_game_after_stop() -> Result<()> {
    let (mut session, mut server) = new_session();
    session.set_coach_name("Carol");
    let first = session.connect(GameId(1));
    server.send(GAME_STATE)?;
    drain_until(&mut session, |s| s.state() == SessionState::Active).await?;

    session.stop();
    tokio::time::timeout(Duration::from_secs(5), first).await??;
    let second = session.connect(GameId(2));
    server.send(VERSION)?;
    server.send(GAME_STATE)?;
    drain_until(&mut session, |s| s.state() == SessionState::Active).await?;

    check!(session.game_id() == Some(GameId(2)));
    check!(session.model().player_count() == 2);
    let_assert!(Some(ClientCommand::ClientJoin(join)) = server.requests.recv().await);
    check!(join.game_id == GameId(2));
    check!(join.coach.as_deref() == Some("Carol"));

    drop(server);
    drain_until(&mut session, |s| s.state() == SessionState::Idle).await?;
    tokio::time::timeout(Duration::from_secs(5), second).await??;
    check!(session.hub().log().last() == Some(&Report::raw("Connection closed")));
    Ok(())
}

use api::{
    ActingPlayerSetCurrentMove, ActingPlayerSetGoingForIt, ActingPlayerSetHasBlocked,
    ActingPlayerSetPlayerAction, ActingPlayerSetPlayerId, GameResultSetScore, GameSetHalf,
    GameSetHomePlaying, GameSetTurnMode, Side, TurnDataSetTurnNr,
};
use ffb_core::{Core, Result, TurnMode};

pub(super) fn set_acting_player_id(core: &mut Core, change: &ActingPlayerSetPlayerId) -> Result<()> {
    core.acting_player_mut().player_id = change.player_id.clone();
    Ok(())
}

pub(super) fn set_current_move(core: &mut Core, change: &ActingPlayerSetCurrentMove) -> Result<()> {
    core.acting_player_mut().current_move = change.current_move;
    Ok(())
}

pub(super) fn set_player_action(core: &mut Core, change: &ActingPlayerSetPlayerAction) -> Result<()> {
    core.acting_player_mut().player_action = change.player_action.clone();
    Ok(())
}

pub(super) fn set_going_for_it(core: &mut Core, change: &ActingPlayerSetGoingForIt) -> Result<()> {
    core.acting_player_mut().going_for_it = change.going_for_it;
    Ok(())
}

pub(super) fn set_has_blocked(core: &mut Core, change: &ActingPlayerSetHasBlocked) -> Result<()> {
    core.acting_player_mut().has_blocked = change.has_blocked;
    Ok(())
}

pub(super) fn set_half(core: &mut Core, change: &GameSetHalf) -> Result<()> {
    core.turn_mut().half = change.half;
    Ok(())
}

pub(super) fn set_home_playing(core: &mut Core, change: &GameSetHomePlaying) -> Result<()> {
    core.set_home_playing(change.home_playing);
    Ok(())
}

pub(super) fn set_turn_mode(core: &mut Core, change: &GameSetTurnMode) -> Result<()> {
    core.turn_mut().turn_mode = TurnMode::from_tag(&change.turn_mode);
    Ok(())
}

pub(super) fn set_turn_nr(core: &mut Core, change: &TurnDataSetTurnNr) -> Result<()> {
    let turn = core.turn_mut();
    match change.side {
        Side::Home => turn.turn_home = change.turn_nr,
        Side::Away => turn.turn_away = change.turn_nr,
    }
    Ok(())
}

pub(super) fn set_score(core: &mut Core, change: &GameResultSetScore) -> Result<()> {
    let score = core.score_mut();
    match change.side {
        Side::Home => score.home = change.score,
        Side::Away => score.away = change.score,
    }
    Ok(())
}

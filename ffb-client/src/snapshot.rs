//! Rebuilds the model store from a full game-state message.

use std::{collections::HashMap, sync::Arc};

use api::{GameData, PlayerData, SkillData, TeamData, TeamResultData};
use ffb_core::{
    Attributes, Coach, Core, Error, Player, Position, Result, Score, Team, TurnMode, TurnState,
};
use tracing::debug;

/// Replaces everything in `core` with the state described by `game`.
///
/// The new state is assembled on a fresh store first. If any lookup fails the
/// error is returned and `core` is left exactly as it was.
pub fn load(core: &mut Core, game: &GameData) -> Result<()> {
    let staged = build(game)?;
    debug!(
        "install snapshot with {} players, half {}",
        staged.player_count(),
        staged.turn().half
    );
    core.install(staged);
    Ok(())
}

fn build(game: &GameData) -> Result<Core> {
    let mut core = Core::new();
    let result = &game.game_result;

    let home = team(&game.team_home, &result.team_result_home, true);
    let away = team(&game.team_away, &result.team_result_away, false);
    core.set_teams(home.clone(), away.clone());

    let field = &game.field_model;
    let ball = core.ball_mut();
    ball.coordinate = field.ball_coordinate;
    ball.in_play = field.ball_in_play;
    ball.moving = field.ball_moving;

    for (data, team) in [(&game.team_home, &home), (&game.team_away, &away)] {
        let positions = positions(data);
        for player in &data.player_array {
            core.add_player(self::player(player, team, &positions)?);
        }
    }

    for team_result in [&result.team_result_home, &result.team_result_away] {
        for player_result in &team_result.player_results {
            core.player_mut(&player_result.player_id)?
                .set_spp(player_result.current_spps);
        }
    }

    for field_player in &field.player_data_array {
        let player = core.player_mut(&field_player.player_id)?;
        player.set_coordinate(field_player.player_coordinate);
        player.set_state(field_player.player_state);
    }

    *core.turn_mut() = TurnState {
        half: game.half,
        turn_home: game.turn_data_home.turn_nr,
        turn_away: game.turn_data_away.turn_nr,
        turn_mode: TurnMode::from_tag(&game.turn_mode),
    };
    *core.score_mut() = Score {
        home: result.team_result_home.score,
        away: result.team_result_away.score,
    };

    let acting = core.acting_player_mut();
    acting.player_id = game.acting_player.player_id.clone();
    acting.current_move = game.acting_player.current_move;
    acting.player_action = game.acting_player.player_action.clone();
    acting.going_for_it = game.acting_player.going_for_it;
    acting.has_blocked = game.acting_player.has_blocked;
    core.set_home_playing(game.home_playing);

    Ok(core)
}

fn team(data: &TeamData, result: &TeamResultData, is_home: bool) -> Arc<Team> {
    let coach = Arc::new(Coach::new(data.coach.as_str(), is_home));
    Arc::new(Team::new(
        data.team_id.as_str(),
        coach,
        data.team_name.as_str(),
        result.fame,
        data.fan_factor,
    ))
}

fn positions(data: &TeamData) -> HashMap<&str, Arc<Position>> {
    data.roster
        .position_array
        .iter()
        .map(|position| {
            let built = Position::new(
                position.position_id.as_str(),
                position.shorthand.as_str(),
                position.position_name.as_str(),
                position.url_icon_set.clone(),
                position.url_portrait.clone(),
                SkillData::keys(&position.skill_array).collect(),
            );
            (position.position_id.as_str(), Arc::new(built))
        })
        .collect()
}

fn player(
    data: &PlayerData,
    team: &Arc<Team>,
    positions: &HashMap<&str, Arc<Position>>,
) -> Result<Player> {
    let position = positions
        .get(data.position_id.as_str())
        .ok_or_else(|| Error::PositionNotFound {
            team_id: team.id().clone(),
            position_id: data.position_id.clone(),
        })?;

    let mut player = Player::new(
        data.player_id.as_str(),
        data.player_name.as_str(),
        team.clone(),
        position.clone(),
    );
    player.set_gender(data.player_gender.unwrap_or_default());
    player.set_attributes(Attributes {
        movement: data.movement,
        strength: data.strength,
        agility: data.agility,
        armour: data.armour,
    });
    player.set_portrait_url(data.url_portrait.clone());
    player.add_skills(SkillData::keys(&data.skill_array));
    Ok(player)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assert2::{assert, check, let_assert};
    use ffb_core::{Coordinate, Gender, PlayerStatus};

    /// Two teams of one lineman each, home player on the pitch.
    pub(crate) const SNAPSHOT: &str = r#"{
        "half": 1,
        "turnMode": "regular",
        "homePlaying": true,
        "teamHome": {
            "teamId": "th", "teamName": "Reikland Reavers", "coach": "Alice", "fanFactor": 4,
            "roster": {"positionArray": [
                {"positionId": "hl", "shorthand": "L", "positionName": "Lineman", "urlPortrait": "hl.png"}
            ]},
            "playerArray": [
                {"playerId": "h1", "playerName": "Griff", "positionId": "hl",
                 "movement": 6, "strength": 3, "agility": 3, "armour": 8,
                 "skillArray": [{"key": "Block"}]}
            ]
        },
        "teamAway": {
            "teamId": "ta", "teamName": "Gouged Eye", "coach": "Bob", "fanFactor": 2,
            "roster": {"positionArray": [
                {"positionId": "al", "shorthand": "L", "positionName": "Lineman", "skillArray": []}
            ]},
            "playerArray": [
                {"playerId": "a1", "playerName": "Snag", "playerGender": "female", "positionId": "al",
                 "movement": 5, "strength": 3, "agility": 3, "armour": 9}
            ]
        },
        "turnDataHome": {"turnNr": 2},
        "turnDataAway": {"turnNr": 1},
        "fieldModel": {
            "ballCoordinate": [7, 7], "ballInPlay": true,
            "playerDataArray": [
                {"playerId": "h1", "playerCoordinate": [7, 7], "playerState": 257}
            ]
        },
        "gameResult": {
            "teamResultHome": {"score": 1, "fame": 1, "playerResults": [{"playerId": "h1", "currentSpps": 4}]},
            "teamResultAway": {"score": 0, "fame": 0, "playerResults": [{"playerId": "a1", "currentSpps": 0}]}
        },
        "actingPlayer": {"playerId": "h1", "currentMove": 2}
    }"#;

    pub(crate) fn game() -> GameData {
        serde_json::from_str(SNAPSHOT).expect("valid snapshot")
    }

    #[test]
    fn rebuilds_both_sides() {
        let mut core = Core::new();
        let_assert!(Ok(()) = load(&mut core, &game()));

        let_assert!(Ok(home) = core.player("h1"));
        let_assert!(Ok(away) = core.player("a1"));
        check!(home.team().id() == "th");
        check!(home.team().is_home());
        check!(away.team().id() == "ta");
        check!(!away.team().is_home());
        let_assert!(Some(team) = core.get_team("th"));
        check!(team.name() == "Reikland Reavers");
        check!(team.fame() == 1);
        check!(core.classify_coach("Bob") == ffb_core::ChatSource::Away);
    }

    #[test]
    fn copies_player_details() {
        let mut core = Core::new();
        let_assert!(Ok(()) = load(&mut core, &game()));

        let_assert!(Ok(home) = core.player("h1"));
        check!(home.attributes().movement == 6);
        check!(home.has_skill("Block"));
        check!(home.gender() == Gender::Male);
        check!(home.spp() == 4);
        check!(home.coordinate() == Some(Coordinate::new(7, 7)));
        check!(home.state().status() == PlayerStatus::Standing);
        check!(home.state().is_active());
        check!(home.portrait() == Some("hl.png"));

        let_assert!(Ok(away) = core.player("a1"));
        check!(away.gender() == Gender::Female);
        check!(away.position().skills().is_empty());
        check!(!away.is_on_pitch());
    }

    #[test]
    fn copies_board_and_turn_state() {
        let mut core = Core::new();
        let_assert!(Ok(()) = load(&mut core, &game()));

        check!(core.ball().coordinate == Some(Coordinate::new(7, 7)));
        check!(core.ball().in_play);
        check!(core.turn().turn_home == 2);
        check!(core.turn().turn_mode == TurnMode::Regular);
        check!(core.score().home == 1);
        check!(core.home_playing());
        let_assert!(Ok(Some(acting)) = core.acting());
        check!(acting.id() == "h1");
        check!(core.acting_player().current_move == 2);
    }

    #[test]
    fn second_snapshot_replaces_first() {
        let mut core = Core::new();
        let_assert!(Ok(()) = load(&mut core, &game()));
        core.add_block_die(3);

        let mut next = game();
        next.team_away.player_array.clear();
        next.game_result.team_result_away.player_results.clear();
        let_assert!(Ok(()) = load(&mut core, &next));
        check!(core.player_count() == 1);
        check!(core.block_dice().is_empty());
        let_assert!(Err(Error::PlayerNotFound(_)) = core.player("a1"));
    }

    #[test]
    fn unknown_position_leaves_store_untouched() {
        let mut core = Core::new();
        let_assert!(Ok(()) = load(&mut core, &game()));

        let mut broken = game();
        broken.team_home.player_array[0].position_id = "blitzer".to_string();
        broken.half = 2;
        let_assert!(Err(Error::PositionNotFound { team_id, position_id }) = load(&mut core, &broken));
        check!(team_id == "th");
        check!(position_id == "blitzer");

        check!(core.turn().half == 1);
        assert!(core.player("h1").is_ok());
    }

    #[test]
    fn result_for_missing_player_is_lookup_error() {
        let mut broken = game();
        broken.game_result.team_result_away.player_results[0].player_id = "ghost".to_string();
        let mut core = Core::new();
        let_assert!(Err(Error::PlayerNotFound(id)) = load(&mut core, &broken));
        check!(id == "ghost");
        check!(core.player_count() == 0);
    }
}

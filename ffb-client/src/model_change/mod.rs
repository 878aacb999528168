//! Handlers for incremental model changes, one function per change kind.

use api::{DialogParameter, ModelChange};

use crate::dispatch::Dispatcher;

mod dialog;
mod field;
mod game;
mod player;

pub(crate) fn register(dispatcher: &mut Dispatcher<ModelChange>) {
    dispatcher
        .register(player::set_coordinate)
        .register(player::set_state)
        .register(player::set_current_spps)
        .register(field::set_ball_coordinate)
        .register(field::set_ball_in_play)
        .register(field::set_ball_moving)
        .register(field::add_pushback_square)
        .register(field::remove_pushback_square)
        .register(field::add_track_number)
        .register(field::remove_track_number)
        .register(game::set_acting_player_id)
        .register(game::set_current_move)
        .register(game::set_player_action)
        .register(game::set_going_for_it)
        .register(game::set_has_blocked)
        .register(game::set_half)
        .register(game::set_home_playing)
        .register(game::set_turn_mode)
        .register(game::set_turn_nr)
        .register(game::set_score)
        .register(dialog::set_dialog_parameter);
}

pub(crate) fn register_dialogs(dispatcher: &mut Dispatcher<DialogParameter>) {
    dispatcher.register(dialog::block_roll);
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use ffb_core::{Coach, Core, Player, Position, Team};

    /// A store with teams set up and players `h1` (home) and `a1` (away).
    pub fn core_with_players() -> Core {
        let home = Arc::new(Team::new("th", Arc::new(Coach::new("Alice", true)), "Home", 0, 3));
        let away = Arc::new(Team::new("ta", Arc::new(Coach::new("Bob", false)), "Away", 0, 3));
        let position = Arc::new(Position::new("l", "L", "Lineman", None, None, vec![]));
        let mut core = Core::new();
        core.set_teams(home.clone(), away.clone());
        core.add_player(Player::new("h1", "Home One", home, position.clone()));
        core.add_player(Player::new("a1", "Away One", away, position));
        core
    }
}

use std::{collections::HashMap, sync::Arc};

use getset::{Getters, MutGetters};
use tracing::warn;

use crate::{
    overlay::{BlockDie, BlockDieFace, OverlayRegistry, PushbackSquare, Shared, TrackNumber},
    ActingPlayer, Ball, ChatSource, Coach, Coordinate, Error, Player, Result, Score, Team,
    TurnState,
};

/// Holder of every entity of the game being watched.
///
/// One `Core` lives as long as the client does. A new game or a resync clears
/// and refills it rather than replacing it, so anything keyed on the store
/// keeps working across snapshots.
#[derive(Debug, Default, Getters, MutGetters)]
pub struct Core {
    players: HashMap<String, Player>,
    #[getset(get = "pub", get_mut = "pub")]
    acting_player: ActingPlayer,
    #[getset(get = "pub", get_mut = "pub")]
    ball: Ball,
    #[getset(get = "pub", get_mut = "pub")]
    turn: TurnState,
    #[getset(get = "pub", get_mut = "pub")]
    score: Score,
    team_home: Option<Arc<Team>>,
    team_away: Option<Arc<Team>>,
    home_playing: bool,
    #[getset(get = "pub")]
    pushback_squares: OverlayRegistry<PushbackSquare>,
    #[getset(get = "pub")]
    track_numbers: OverlayRegistry<TrackNumber>,
    #[getset(get = "pub")]
    block_dice: OverlayRegistry<BlockDie>,
}

impl Core {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops players, the acting player and all overlays. Teams, coaches and
    /// the ball stay until the next snapshot replaces them.
    pub fn clear(&mut self) {
        self.players.clear();
        self.acting_player.clear();
        self.pushback_squares.clear();
        self.track_numbers.clear();
        self.block_dice.clear();
    }

    /// Clears `self` and moves every entity of `staged` into it.
    pub fn install(&mut self, staged: Core) {
        self.clear();
        let Core {
            players,
            acting_player,
            ball,
            turn,
            score,
            team_home,
            team_away,
            home_playing,
            ..
        } = staged;
        self.players = players;
        self.acting_player = acting_player;
        self.ball = ball;
        self.turn = turn;
        self.score = score;
        self.team_home = team_home;
        self.team_away = team_away;
        self.home_playing = home_playing;
    }

    /// Inserts `player`, replacing any player with the same id.
    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.id().clone(), player);
    }

    /// `None` asks for no player and yields no player. A present id that is
    /// not in the store is a protocol violation.
    pub fn get_player(&self, player_id: Option<&str>) -> Result<Option<&Player>> {
        match player_id {
            None => Ok(None),
            Some(id) => self.player(id).map(Some),
        }
    }

    pub fn player(&self, player_id: &str) -> Result<&Player> {
        self.players
            .get(player_id)
            .ok_or_else(|| Error::PlayerNotFound(player_id.to_string()))
    }

    pub fn player_mut(&mut self, player_id: &str) -> Result<&mut Player> {
        self.players
            .get_mut(player_id)
            .ok_or_else(|| Error::PlayerNotFound(player_id.to_string()))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player the server is acting with, if any.
    pub fn acting(&self) -> Result<Option<&Player>> {
        self.get_player(self.acting_player.player_id.as_deref())
    }

    pub fn set_teams(&mut self, home: Arc<Team>, away: Arc<Team>) {
        self.team_home = Some(home);
        self.team_away = Some(away);
    }

    pub fn team_home(&self) -> Option<&Arc<Team>> {
        self.team_home.as_ref()
    }

    pub fn team_away(&self) -> Option<&Arc<Team>> {
        self.team_away.as_ref()
    }

    pub fn home_coach(&self) -> Option<&Arc<Coach>> {
        self.team_home.as_ref().map(|team| team.coach())
    }

    pub fn away_coach(&self) -> Option<&Arc<Coach>> {
        self.team_away.as_ref().map(|team| team.coach())
    }

    /// Looks a team up by id. Unknown ids fall back to the away team.
    pub fn get_team(&self, team_id: &str) -> Option<&Arc<Team>> {
        if let Some(home) = self.team_home.as_ref().filter(|home| home.id() == team_id) {
            return Some(home);
        }
        if !self.team_away.as_ref().is_some_and(|away| away.id() == team_id) {
            warn!("team id={team_id} matches neither side, falling back to away team");
        }
        self.team_away.as_ref()
    }

    pub fn home_playing(&self) -> bool {
        self.home_playing
    }

    pub fn set_home_playing(&mut self, home_playing: bool) {
        self.home_playing = home_playing;
    }

    pub fn classify_coach(&self, coach: &str) -> ChatSource {
        if self.home_coach().is_some_and(|c| c.name() == coach) {
            ChatSource::Home
        } else if self.away_coach().is_some_and(|c| c.name() == coach) {
            ChatSource::Away
        } else {
            ChatSource::Spectator
        }
    }

    pub fn add_pushback_square(&mut self, square: PushbackSquare) -> Shared<PushbackSquare> {
        self.pushback_squares.upsert(square)
    }

    pub fn remove_pushback_square(&mut self, coordinate: Coordinate) {
        self.pushback_squares.remove(coordinate.overlay_key());
    }

    pub fn add_track_number(&mut self, track_number: TrackNumber) -> Shared<TrackNumber> {
        self.track_numbers.upsert(track_number)
    }

    pub fn remove_track_number(&mut self, coordinate: Coordinate) {
        self.track_numbers.remove(coordinate.overlay_key());
    }

    /// Appends a die to the block dice sequence.
    ///
    /// A roll of zero or less closes the current run instead: a separator is
    /// appended unless the sequence already ends with one, then dice are
    /// deactivated from the back until an inactive one is reached.
    pub fn add_block_die(&mut self, roll: i32) {
        let len = self.block_dice.len() as i32;
        if roll > 0 {
            self.block_dice
                .upsert(BlockDie::new(len, BlockDieFace::from_roll(roll)));
            return;
        }

        let ends_with_separator = self
            .block_dice
            .last()
            .is_some_and(|die| die.read().roll.is_none());
        if !ends_with_separator {
            self.block_dice
                .upsert(BlockDie::new(-(len + 1), BlockDieFace::None));
        }
        for die in self.block_dice.iter().rev() {
            let mut die = die.write();
            if !die.active {
                break;
            }
            die.active = false;
        }
    }
}

use std::str::FromStr;

use strum::{Display, EnumString};

use crate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ball {
    pub coordinate: Option<Coordinate>,
    pub in_play: bool,
    pub moving: bool,
}

/// The player the server is currently resolving actions for. Holds the player
/// by id only; resolve it through [`crate::Core::get_player`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActingPlayer {
    pub player_id: Option<String>,
    pub current_move: i32,
    pub player_action: Option<String>,
    pub going_for_it: bool,
    pub has_blocked: bool,
}

impl ActingPlayer {
    pub fn clear(&mut self) {
        *self = ActingPlayer::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum TurnMode {
    #[default]
    Unknown,
    StartGame,
    Setup,
    Kickoff,
    Regular,
    Blitz,
    Touchback,
    HighKick,
    PerfectDefence,
    QuickSnap,
    Interception,
    DumpOff,
    PassBlock,
    Bomb,
    Wizard,
    KickoffReturn,
    Swarming,
    EndGame,
}

impl TurnMode {
    /// Parses the protocol tag, mapping unrecognised modes to [`TurnMode::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        TurnMode::from_str(tag).unwrap_or_else(|_| {
            tracing::debug!("unrecognised turn mode {tag:?}");
            TurnMode::Unknown
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnState {
    pub half: i32,
    pub turn_home: i32,
    pub turn_away: i32,
    pub turn_mode: TurnMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub home: i32,
    pub away: i32,
}

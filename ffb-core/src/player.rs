use std::sync::Arc;

use getset::{CopyGetters, Getters, Setters};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr};

use crate::{Coordinate, Position, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Neutral,
}

/// Base status stored in the low byte of a [`PlayerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, Display)]
#[repr(u8)]
pub enum PlayerStatus {
    Unknown = 0,
    Standing = 1,
    Moving = 2,
    Prone = 3,
    Stunned = 4,
    KnockedOut = 5,
    BadlyHurt = 6,
    SeriousInjury = 7,
    Rip = 8,
    Reserve = 9,
    Missing = 10,
    Falling = 11,
    Blocked = 12,
    Banned = 13,
    Exhausted = 14,
    BeingDragged = 15,
    PickedUp = 16,
    HitByFireball = 17,
    HitByLightning = 18,
    HitByBomb = 19,
}

/// Packed player state as sent by the server: base status in the low byte,
/// condition flags above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerState(i32);

impl PlayerState {
    pub const ACTIVE: i32 = 0x0100;
    pub const CONFUSED: i32 = 0x0200;
    pub const ROOTED: i32 = 0x0400;
    pub const HYPNOTIZED: i32 = 0x0800;
    pub const BLOODLUST: i32 = 0x1000;
    pub const USED_PRO: i32 = 0x2000;

    pub const fn from_code(code: i32) -> Self {
        Self(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    pub fn status(self) -> PlayerStatus {
        PlayerStatus::from_repr((self.0 & 0xff) as u8).unwrap_or(PlayerStatus::Unknown)
    }

    pub fn has(self, flag: i32) -> bool {
        self.0 & flag != 0
    }

    pub fn is_active(self) -> bool {
        self.has(Self::ACTIVE)
    }

    pub fn is_confused(self) -> bool {
        self.has(Self::CONFUSED)
    }

    pub fn is_rooted(self) -> bool {
        self.has(Self::ROOTED)
    }

    pub fn is_hypnotized(self) -> bool {
        self.has(Self::HYPNOTIZED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes {
    pub movement: i32,
    pub strength: i32,
    pub agility: i32,
    pub armour: i32,
}

#[derive(Debug, Clone, Getters, CopyGetters, Setters)]
pub struct Player {
    #[getset(get = "pub")]
    id: String,
    #[getset(get = "pub")]
    team: Arc<Team>,
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub", set = "pub")]
    gender: Gender,
    #[getset(get = "pub")]
    position: Arc<Position>,
    #[getset(get_copy = "pub", set = "pub")]
    attributes: Attributes,
    #[getset(get = "pub", set = "pub")]
    portrait_url: Option<String>,
    #[getset(get = "pub")]
    skills: Vec<String>,
    #[getset(get_copy = "pub", set = "pub")]
    coordinate: Option<Coordinate>,
    #[getset(get_copy = "pub", set = "pub")]
    state: PlayerState,
    #[getset(get_copy = "pub", set = "pub")]
    spp: i32,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        team: Arc<Team>,
        position: Arc<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            team,
            name: name.into(),
            gender: Gender::default(),
            position,
            attributes: Attributes::default(),
            portrait_url: None,
            skills: Vec::new(),
            coordinate: None,
            state: PlayerState::default(),
            spp: 0,
        }
    }

    pub fn add_skills(&mut self, skills: impl IntoIterator<Item = String>) {
        self.skills.extend(skills);
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn is_on_pitch(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Portrait of the player, or the portrait of its position when it has none.
    pub fn portrait(&self) -> Option<&str> {
        self.portrait_url
            .as_deref()
            .or_else(|| self.position.portrait_url().as_deref())
    }
}

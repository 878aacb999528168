//! Transient display state layered over the pitch.
//!
//! Overlays are not part of the authoritative game model. They mirror
//! confirmation signals from the server (pushback candidates, movement
//! tracks, block dice) and churn quickly during a turn. Renderers may keep a
//! [`Shared`] handle to an overlay; an upsert with an existing key refreshes
//! that same object instead of replacing it.

use std::{fmt::Debug, str::FromStr, sync::Arc};

use parking_lot::RwLock;
use strum::{Display, EnumString};

use crate::Coordinate;

pub type Shared<T> = Arc<RwLock<T>>;

pub trait Overlay {
    type Key: PartialEq + Copy + Debug;

    fn key(&self) -> Self::Key;
    /// Copies the displayed fields of `data` into `self`.
    fn refresh(&mut self, data: Self);
}

/// Keyed overlays in insertion order.
#[derive(Debug)]
pub struct OverlayRegistry<T: Overlay> {
    entries: Vec<Shared<T>>,
}

impl<T: Overlay> Default for OverlayRegistry<T> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<T: Overlay> OverlayRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `overlay`, or refreshes the existing entry with the same key in place.
    pub fn upsert(&mut self, overlay: T) -> Shared<T> {
        match self.get(overlay.key()) {
            Some(existing) => {
                existing.write().refresh(overlay);
                existing
            }
            None => self.push(overlay),
        }
    }

    pub fn remove(&mut self, key: T::Key) -> Option<Shared<T>> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, key: T::Key) -> Option<Shared<T>> {
        self.position(key).map(|index| self.entries[index].clone())
    }

    pub fn contains_key(&self, key: T::Key) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shared<T>> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Shared<T>> {
        self.entries.last()
    }

    pub(crate) fn push(&mut self, overlay: T) -> Shared<T> {
        let shared = Arc::new(RwLock::new(overlay));
        self.entries.push(shared.clone());
        shared
    }

    fn position(&self, key: T::Key) -> Option<usize> {
        self.entries.iter().position(|entry| entry.read().key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Direction::from_str(tag).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushbackSquare {
    pub coordinate: Coordinate,
    pub direction: Direction,
    pub selected: bool,
    pub locked: bool,
    pub home_choice: bool,
}

impl Overlay for PushbackSquare {
    type Key = i32;

    fn key(&self) -> i32 {
        self.coordinate.overlay_key()
    }

    fn refresh(&mut self, data: Self) {
        *self = data;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackNumber {
    pub coordinate: Coordinate,
    pub number: i32,
}

impl Overlay for TrackNumber {
    type Key = i32;

    fn key(&self) -> i32 {
        self.coordinate.overlay_key()
    }

    fn refresh(&mut self, data: Self) {
        *self = data;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum BlockDieFace {
    /// Separator between two block rolls.
    #[default]
    None,
    Skull,
    BothDown,
    Pushback,
    PowPushback,
    Pow,
}

impl BlockDieFace {
    pub fn from_roll(roll: i32) -> Self {
        use BlockDieFace::*;
        match roll {
            1 => Skull,
            2 => BothDown,
            3 | 4 => Pushback,
            5 => PowPushback,
            6 => Pow,
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == BlockDieFace::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDie {
    /// Position in the dice sequence; negative for separators.
    pub index: i32,
    pub roll: BlockDieFace,
    pub active: bool,
}

impl BlockDie {
    pub fn new(index: i32, roll: BlockDieFace) -> Self {
        Self {
            index,
            roll,
            active: true,
        }
    }
}

impl Overlay for BlockDie {
    type Key = i32;

    fn key(&self) -> i32 {
        self.index
    }

    fn refresh(&mut self, data: Self) {
        self.index = data.index;
        self.roll = data.roll;
    }
}

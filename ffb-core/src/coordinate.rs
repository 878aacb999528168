use serde::{Deserialize, Serialize};

/// A square on the pitch. The wire form is a two element array `[x, y]`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ZERO: Self = Coordinate { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Key used by square based overlays. Unique on the pitch; coordinates
    /// far off the pitch may share a key.
    pub const fn overlay_key(self) -> i32 {
        self.x.wrapping_mul(100).wrapping_add(self.y)
    }
}

impl From<[i32; 2]> for Coordinate {
    fn from([x, y]: [i32; 2]) -> Self {
        Coordinate { x, y }
    }
}

impl From<Coordinate> for [i32; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.x, coordinate.y]
    }
}

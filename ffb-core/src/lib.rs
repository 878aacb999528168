mod coordinate;
mod error;
mod game;
pub mod overlay;
mod player;
mod store;
mod team;

pub use coordinate::*;
pub use error::*;
pub use game::*;
pub use player::*;
pub use store::*;
pub use team::*;

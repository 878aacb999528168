use thiserror::Error;

/// Protocol consistency violations detected while mutating the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot find player id={0}")]
    PlayerNotFound(String),
    #[error("team id={team_id} has no roster position id={position_id}")]
    PositionNotFound { team_id: String, position_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

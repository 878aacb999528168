use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("cannot decode server message: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("cannot encode client message: {0}")]
    Encode(#[source] serde_json::Error),
}

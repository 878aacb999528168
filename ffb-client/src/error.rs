/// Failure while applying one inbound message or session operation.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Model(#[from] ffb_core::Error),
    #[error("listener failed: {0:#}")]
    Listener(anyhow::Error),
    #[error("transport failed: {0:#}")]
    Transport(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

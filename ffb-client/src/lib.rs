mod config;
pub mod dispatch;
mod error;
pub mod hub;
mod model_change;
mod queue;
mod session;
pub mod snapshot;
mod transport;

pub use config::ClientConfig;
pub use dispatch::ApplyChange;
pub use error::*;
pub use queue::{ActionQueue, Epoch, Executor, Task};
pub use session::{Session, SessionState};
pub use transport::{ChannelTransport, ServerEnd, Transport};

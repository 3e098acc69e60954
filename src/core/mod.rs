pub mod client;
pub mod discovery;
pub mod tasks;
pub mod transport;

pub use crate::domain::ports::Transport;
pub use crate::utils::error::Result;

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{BridgeSettings, SidecarSettings};

pub use crate::core::client::BridgeClient;
pub use crate::core::discovery::{discover_port, BRIDGE_HOST, BRIDGE_PORTS};
pub use crate::core::tasks::{AskThenRunOptions, TaskRunner};
pub use crate::core::transport::HttpTransport;
pub use crate::domain::model::{
    CopilotTask, CopilotTaskReport, DesktopType, Health, MessageLevel, PromptRequest,
    TerminalCommand, TerminalOutput, WorkspaceInfo,
};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::{BridgeError, Result};

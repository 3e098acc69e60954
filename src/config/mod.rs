#[cfg(feature = "cli")]
pub mod cli;
pub mod sidecar;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use sidecar::SidecarSettings;
pub use toml_config::BridgeSettings;

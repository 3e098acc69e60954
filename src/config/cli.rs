use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "agent-bridge")]
#[command(about = "Talk to the editor Agent Bridge over its local HTTP API")]
pub struct CliConfig {
    #[arg(long, help = "Bridge host (defaults to 127.0.0.1)")]
    pub host: Option<String>,

    #[arg(long, help = "Fixed bridge port (skips discovery)")]
    pub port: Option<u16>,

    #[arg(long, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Send a prompt and print the response")]
    pub prompt: Option<String>,

    #[arg(long, help = "Run a terminal command and print captured stdout")]
    pub run: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

use agent_bridge::utils::{logger, validation::Validate};
use agent_bridge::{BridgeClient, BridgeError, BridgeSettings, CliConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting agent-bridge CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut settings = match &cli.config {
        Some(path) => BridgeSettings::from_file(path)?,
        None => BridgeSettings::default(),
    };
    if let Some(host) = &cli.host {
        settings.host = host.clone();
    }
    if let Some(port) = cli.port {
        settings.port = Some(port);
    }

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &settings).await {
        tracing::error!("Bridge call failed: {}", e);
        eprintln!("❌ {}", e);
        if matches!(e, BridgeError::DiscoveryError { .. }) {
            eprintln!("💡 Make sure the editor is running with the Agent Bridge extension installed.");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &CliConfig, settings: &BridgeSettings) -> agent_bridge::Result<()> {
    println!("Connecting to the Agent Bridge...");
    let client = BridgeClient::connect_with(settings).await?;

    let health = client.health().await?;
    println!("✅ Connected! Port={} Version={}", health.port, health.version);
    println!("Models available: {}", health.models.len());
    println!("Workspace: {}", health.workspace.as_deref().unwrap_or("N/A"));

    if let Some(prompt) = &cli.prompt {
        println!("\nPrompting: {:?}", prompt);
        let answer = client.prompt_text(prompt).await?;
        println!("Response: {}", answer);
    }

    if let Some(command) = &cli.run {
        tracing::info!("Running command via bridge terminal: {}", command);
        let output = client
            .run_and_capture(command, None, settings.terminal_timeout_secs)
            .await?;
        println!("{}", output);
    }

    Ok(())
}

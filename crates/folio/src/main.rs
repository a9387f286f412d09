use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;
use folio::models::{AdapterMode, FolioConfig};
use folio::InvestmentPlugin;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Investment portfolio report agent")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/folio.toml")]
    config: String,

    /// Read the task description from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config: {}", cli.config))?;
    let config: FolioConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse config")?;

    if config.mode == AdapterMode::Direct {
        bail!("direct mode requires an embedded analysis service; use the library API");
    }

    let task = if let Some(input_path) = &cli.input {
        std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read input: {input_path}"))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    };

    let mut plugin = InvestmentPlugin::new(config);
    plugin
        .start()
        .await
        .context("Failed to start investment plugin")?;

    let result = plugin.execute_task(&task).await;

    // Tear the transport down before surfacing any report error.
    plugin
        .stop()
        .await
        .context("Failed to stop investment plugin")?;

    let report = result.map_err(|e| anyhow::anyhow!("Report generation failed: {e}"))?;
    println!("{report}");

    Ok(())
}

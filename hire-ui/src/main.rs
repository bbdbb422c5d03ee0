use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use hire_ui::config::AppConfig;
use hire_ui::{TerminalWizard, app, logging};

/// Book a skip: address, waste, skip size, permit, delivery date and
/// payment, one step at a time.
///
/// Runs offline on the bundled catalog unless a config file selects the
/// HTTP backends.
#[derive(Debug, Parser)]
#[command(name = "skip-hire", version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the catalog backend (`http` or `fixture`).
    #[arg(long)]
    catalog_backend: Option<String>,

    /// Override the catalog endpoint (URL or CSV path).
    #[arg(long)]
    catalog_endpoint: Option<String>,

    /// Log level or `EnvFilter` directive. `RUST_LOG` still wins.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// No log output on the terminal.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Number used for the order reference.
    #[arg(long, default_value_t = 1)]
    order_number: u32,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(backend) = &cli.catalog_backend {
        config.catalog.backend = backend.clone();
    }
    if let Some(endpoint) = &cli.catalog_endpoint {
        config.catalog.endpoint = endpoint.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }
    if cli.quiet {
        config.logging.console = false;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    logging::init_from_config(&config.logging).context("Failed to set up logging")?;

    debug!(
        address = %config.address.backend,
        catalog = %config.catalog.backend,
        "configuration loaded"
    );
    let mut session = app::start_session(&config)
        .await
        .context("Failed to start the checkout")?;

    let stdin = io::stdin();
    let mut wizard =
        TerminalWizard::new(stdin.lock(), io::stdout()).with_order_number(cli.order_number);

    match wizard.run(&mut session).await? {
        Some(confirmation) => info!(reference = %confirmation.reference, "order placed"),
        None => info!("no order placed"),
    }
    Ok(())
}

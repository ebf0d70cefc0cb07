// src/main.rs — taskdeck entry point

use clap::Parser;

use taskdeck::cli::Cli;
use taskdeck::infra::config::Config;
use taskdeck::infra::logger;
use taskdeck::web::{self, AppState};

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // CLI flags override file values
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    if cli.skip_auth {
        tracing::warn!("authentication checks disabled (--skip-auth)");
        config.auth.skip_auth = true;
    }
    config.validate()?;

    let state = AppState::new(config)?;
    web::start_server(state).await
}

// src/cli/mod.rs — CLI definition (clap derive)

use clap::Parser;

#[derive(Parser)]
#[command(name = "taskdeck", about = "Self-hosted web client for a remote task API", version)]
pub struct Cli {
    /// Bind address for the web UI (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Base URL of the remote task API (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Bypass all authentication checks (development only)
    #[arg(long)]
    pub skip_auth: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,
}

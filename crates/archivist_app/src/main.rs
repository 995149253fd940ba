mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod render;

use std::path::PathBuf;

use archivist_core::LocationQuery;
use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "archivist", about = "Terminal view of a video archive's download queue")]
struct Args {
    /// RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Server base URL, overrides the config file.
    #[arg(long)]
    server: Option<String>,
    #[arg(long, env = "ARCHIVIST_TOKEN")]
    token: Option<String>,
    /// Initial location query, e.g. `?channel=UC123&ignored=true`.
    location: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    if let Some(token) = args.token {
        config.server.api_token = Some(token);
    }

    logging::initialize(&config.log, config.log.level_filter()?);

    let location = LocationQuery::parse(args.location.as_deref().unwrap_or_default());
    app::run(config, location)
}

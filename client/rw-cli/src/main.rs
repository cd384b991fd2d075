//! roadwatch - RoadWatch account and session CLI
//!
//! # Examples
//!
//! ```bash
//! # Sign in; the session is stored for later invocations
//! roadwatch sign-in --email ada@example.com --password hunter22
//!
//! # Who am I, with the profile role applied
//! roadwatch whoami --pretty
//!
//! # Route guard check for worker-only screens
//! roadwatch can-access --role worker && echo allowed
//! ```

mod cli;
mod commands;
mod error;
mod handlers;
mod logger;
mod output;


use crate::{cli::Cli, error::Result as CliResult, handlers::Context};

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::debug;
use rw_config::Config;
use rw_hosted::{HostedAuthClient, HostedProfileStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    // .env is optional
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let config_dir = Config::config_dir()?;
    logger::initialize(
        &config.logging,
        logger::log_file_path(&config.logging, &config_dir),
    )?;
    debug!("Starting roadwatch v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let auth = Arc::new(HostedAuthClient::new(&config)?);
    let profiles = Arc::new(HostedProfileStore::new(&config)?.with_auth(Arc::clone(&auth)));
    let ctx = Context { auth, profiles };

    handlers::execute(cli.command, &ctx, cli.pretty).await
}

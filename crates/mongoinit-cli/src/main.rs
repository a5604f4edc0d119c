#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

use clap::Parser;

mod bootstrap;
mod cli;
mod config;
mod settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    bootstrap::init_tracing(cli.verbose)?;

    let settings = settings::Settings::load(&cli.overrides()).map_err(|err| {
        tracing::error!(event = "settings_invalid", error = %err);
        err
    })?;
    bootstrap::log_startup(&settings);
    let backend = bootstrap::build_backend(&settings);

    match cli.command() {
        cli::Command::Run => cli::run::run(&settings, &backend).await,
        cli::Command::Check => cli::check::run(&settings, &backend).await,
    }
}

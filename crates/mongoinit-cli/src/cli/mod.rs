use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use mongoinit_core::Role;

use crate::settings::Overrides;

pub mod check;
pub mod run;

#[derive(Parser)]
#[command(name = "mongoinit")]
#[command(about = "Create the application database user at container start")]
pub struct Cli {
    /// MongoDB connection string (credentials come from the root user variables)
    #[arg(long, env = "MONGOINIT_URI")]
    pub uri: Option<String>,
    /// YAML config file
    #[arg(long, env = "MONGOINIT_CONFIG_PATH")]
    pub config: Option<String>,
    /// Role granted on the target database
    #[arg(long, env = "MONGOINIT_ROLE")]
    pub role: Option<Role>,
    /// Succeed when the user already exists (`--skip-existing=false` to force off)
    #[arg(
        long,
        env = "MONGOINIT_SKIP_EXISTING",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub skip_existing: Option<bool>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Authenticate as root and create the application user (default)
    Run,
    /// Report whether the application user exists with the expected role
    Check,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            uri: self.uri.clone(),
            config_path: self.config.clone(),
            role: self.role,
            skip_existing: self.skip_existing,
        }
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

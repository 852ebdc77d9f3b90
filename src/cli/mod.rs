//! CLI module for Team Tracker
//!
//! Provides subcommands:
//! - `serve`: HTTP API server (default)
//! - `create-user`: register a user and its profile
//! - `backfill-profiles`: create profiles for users that lack one

pub mod serve;
pub mod users;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Team Tracker - teams, friends and friends' teams
#[derive(Parser)]
#[command(name = "team-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Register a user together with its profile
    CreateUser(users::CreateUserArgs),

    /// Create missing profiles for existing users
    BackfillProfiles,
}

/// Load `.env`, read configuration and install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["team-tracker"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_create_user() {
        let cli = Cli::try_parse_from(["team-tracker", "create-user", "--username", "ash"]).unwrap();

        match cli.command {
            Some(Command::CreateUser(args)) => assert_eq!(args.username, "ash"),
            _ => panic!("expected create-user"),
        }
    }

    #[test]
    fn test_parse_backfill() {
        let cli = Cli::try_parse_from(["team-tracker", "backfill-profiles"]).unwrap();
        assert!(matches!(cli.command, Some(Command::BackfillProfiles)));
    }
}

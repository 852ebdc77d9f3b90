use clap::Parser;
use team_tracker::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run().await,
        Command::CreateUser(args) => cli::users::create_user(args).await,
        Command::BackfillProfiles => cli::users::backfill_profiles().await,
    }
}

//! User administration commands

use clap::Args;
use tracing::info;

use crate::config::AppConfig;

/// Arguments for `create-user`
#[derive(Debug, Args)]
pub struct CreateUserArgs {
    /// Username of the new user
    #[arg(long)]
    pub username: String,
}

/// Register a user and its profile
pub async fn create_user(args: CreateUserArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    require_database(&config, "create-user")?;
    let state = crate::create_app_state(&config).await?;

    let user = state.user_service.register(&args.username).await?;
    info!(user_id = %user.id(), username = %user.username(), "User created");
    println!("Created user '{}' with id {}", user.username(), user.id());

    Ok(())
}

/// Create profiles for users that were stored without one
pub async fn backfill_profiles() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    require_database(&config, "backfill-profiles")?;
    let state = crate::create_app_state(&config).await?;

    let users = state.user_service.backfill_profiles().await?;

    for user in &users {
        println!("Created profile for '{}'", user.username());
    }
    println!("{} profile(s) created", users.len());

    Ok(())
}

/// Admin commands write persistent data and refuse to run on the in-memory store
fn require_database(config: &AppConfig, command: &str) -> anyhow::Result<()> {
    if config.database.postgres().is_none() {
        anyhow::bail!(
            "{} needs a database; set database.url or APP__DATABASE__URL \
             (use database.seed_users to add users to the in-memory store)",
            command
        );
    }

    Ok(())
}

mod cache;
mod clients;
mod cogs;
mod config;
mod constants;
mod errors;
mod state;
mod util;

use config::CONFIG;
use poise::{builtins, serenity_prelude as serenity, Framework, FrameworkOptions};
use state::Data;
use tracing::info;

// Common types
pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Commands = Vec<poise::Command<Data, Error>>;
pub type Result<T> = std::result::Result<T, Error>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().compact().init();

    if CONFIG.dev {
        info!("Starting bot in development configuration")
    } else {
        info!("Starting bot using main configuration")
    }

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: cogs::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(CONFIG.command_prefix.clone()),
                ..Default::default()
            },
            on_error: |e| Box::pin(errors::global_error_handler(e)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);
            Box::pin(async move {
                builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data::new())
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&CONFIG.secrets.bot_token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register ctrl-c handler");

        shard_manager.shutdown_all().await;
    });

    client.start().await?;
    Ok(())
}

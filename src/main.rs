mod commands;
mod config;
mod contribution;
mod error;
mod link_embed;
mod logging;
mod message;
mod presence;
mod preview;
mod project;
mod resolver;

use std::time::Duration;

use once_cell::sync::Lazy;
use poise::serenity_prelude as serenity;
use sea_orm::{Database, DatabaseConnection};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

use crate::config::{Config, CONFIG_FILE};
use crate::message::{SendMessage, SendableMessage};
use crate::presence::Presence;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type PoiseContext<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub config: Config,
    pub db: DatabaseConnection,
    pub presence: Presence,
}

pub static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
});

/// Registers slash commands in this guild or globally
#[poise::command(prefix_command, hide_in_help, owners_only)]
async fn register(ctx: PoiseContext<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx).await?;
    info!("Registering...");
    Ok(())
}

/// Show this help menu
#[poise::command(slash_command, prefix_command, track_edits)]
async fn help(
    ctx: PoiseContext<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> Result<(), Error> {
    poise::builtins::help(ctx, command.as_deref(), Default::default()).await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        poise::FrameworkError::Command { error, ctx } => {
            warn!("Error in command `{}`: {}", ctx.command().name, error);
            if let Err(e) = SendMessage::Error(error.to_string()).send_msg(ctx).await {
                error!("Error sending error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e)
            }
        }
    }
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &poise::Event<'_>,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        poise::Event::Message { new_message } => {
            if data.config.link_previews && !new_message.author.bot {
                link_embed::reply_link_previews(
                    ctx.http.clone(),
                    new_message,
                    data.config.verify_thumbnails,
                )
                .await;
            }
        }
        poise::Event::GuildCreate { guild, .. } => {
            for (user_id, p) in &guild.presences {
                data.presence.update(user_id.0, is_online(p.status)).await;
            }
        }
        poise::Event::PresenceUpdate { new_data } => {
            data.presence
                .update(new_data.user.id.0, is_online(new_data.status))
                .await;
        }
        _ => {}
    }
    Ok(())
}

fn is_online(status: serenity::OnlineStatus) -> bool {
    !matches!(
        status,
        serenity::OnlineStatus::Offline | serenity::OnlineStatus::Invisible
    )
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    let config = match Config::get_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Error reading {}: {:#}", CONFIG_FILE, e);
            std::process::exit(1);
        }
    };

    let db = match Database::connect(config.database_url.as_str()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = project::store::create_table(&db).await {
        error!("Error creating projects table: {}", e);
        std::process::exit(1);
    }

    // Add bot commands
    let commands = vec![
        register(),
        help(),
        project::commands::project(),
        project::commands::profile(),
        commands::preview(),
        commands::contributions(),
        commands::online(),
    ];

    // Configure Poise options
    let options = poise::FrameworkOptions {
        commands,
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(config.prefix.clone()),
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!(
                    "command {} called by {}#{:04}",
                    ctx.command().qualified_name,
                    ctx.author().name,
                    ctx.author().discriminator
                );
            })
        },
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    };

    let token = config.discord_token.clone();
    let framework = poise::Framework::builder()
        .options(options)
        .token(token)
        .intents(
            serenity::GatewayIntents::non_privileged()
                | serenity::GatewayIntents::MESSAGE_CONTENT
                | serenity::GatewayIntents::GUILD_PRESENCES,
        )
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move {
                Ok(Data {
                    config,
                    db,
                    presence: Presence::default(),
                })
            })
        })
        .build()
        .await;
    let framework = match framework {
        Ok(f) => f,
        Err(e) => {
            error!("Error building client: {:?}", e);
            std::process::exit(1);
        }
    };

    // Register signal handlers
    for (kind, name) in [
        (SignalKind::terminate(), "SIGTERM"),
        (SignalKind::interrupt(), "SIGINT"),
    ] {
        let mut stream = match signal(kind) {
            Ok(s) => s,
            Err(e) => {
                error!("Error creating {} handler: {}", name, e);
                std::process::exit(1);
            }
        };
        let shard_manager = framework.shard_manager().clone();
        tokio::spawn(async move {
            stream.recv().await;
            info!("Received {}, exiting", name);
            shard_manager.lock().await.shutdown_all().await;
        });
    }

    if let Err(why) = framework.start().await {
        error!("Client ended: {:?}", why);
    }
}

mod commands;
mod constants;
mod database;
mod gateway;
mod handlers;
mod import;
mod models;
mod schedule;
mod services;
#[cfg(test)]
mod testing;
mod utils;

use chrono::NaiveTime;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use poise::serenity_prelude as serenity;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    commands::{add_birthday, all, month, next, remove_birthday, show_birthday, update_birthday},
    constants::{DEFAULT_IMPORT_PATH, DEFAULT_TIMEZONE, DEFAULT_TRIGGER_TIME, LOG_DIRECTIVE},
    database::Database,
    gateway::SerenityGateway,
    handlers::{handle_inbound_message, respond_to_structured},
    models::{Data, Error},
    schedule::{DailyScheduler, start_schedule_manager},
    services::birthday_service::BirthdayService,
    utils::clock::{Clock, SystemClock},
    utils::message_formatter::SentinelRule,
    utils::timezone::{parse_time_string, parse_timezone},
};

#[derive(Parser)]
#[command(name = "birthday_bot", about = "Discord bot that announces birthdays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Connect to Discord and run the daily announcer (default)
    Run,
    /// Load a legacy JSON roster into the database
    Import {
        /// Path to the roster file
        #[arg(long, default_value = DEFAULT_IMPORT_PATH)]
        json: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_bot().await,
        Command::Import { json } => run_import(&json).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
#[derive(Debug)]
struct Config {
    discord_token: String,
    channel_id: serenity::ChannelId,
    database_path: PathBuf,
    trigger_time: NaiveTime,
    timezone: Tz,
    dev_guild_id: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_channel_id(value: &str) -> Result<serenity::ChannelId, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(serenity::ChannelId::new(id)),
        _ => Err(ConfigError::Invalid {
            name: "BIRTHDAY_CHANNEL_ID",
            reason: format!("'{}' is not a channel id", value),
        }),
    }
}

fn database_path_from(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    required(lookup, "DATABASE_PATH").map(PathBuf::from)
}

/// Build the configuration from a variable lookup
fn load_configuration_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let discord_token = required(&lookup, "DISCORD_TOKEN")?;
    let channel_id = parse_channel_id(&required(&lookup, "BIRTHDAY_CHANNEL_ID")?)?;
    let database_path = database_path_from(&lookup)?;

    let trigger_time = lookup("TRIGGER_TIME").unwrap_or_else(|| DEFAULT_TRIGGER_TIME.to_string());
    let trigger_time = parse_time_string(&trigger_time).map_err(|e| ConfigError::Invalid {
        name: "TRIGGER_TIME",
        reason: e.to_string(),
    })?;

    let timezone = lookup("BOT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
    let timezone = parse_timezone(&timezone).map_err(|e| ConfigError::Invalid {
        name: "BOT_TIMEZONE",
        reason: e.to_string(),
    })?;

    // Optional: development guild ID for faster command registration
    let dev_guild_id = lookup("DEV_GUILD_ID").and_then(|id| id.parse::<u64>().ok());

    Ok(Config {
        discord_token,
        channel_id,
        database_path,
        trigger_time,
        timezone,
        dev_guild_id,
    })
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, ConfigError> {
    let config = load_configuration_from(env_lookup)?;

    if config.dev_guild_id.is_some() {
        info!("Development mode: Commands will be registered to guild only");
    }

    Ok(config)
}

fn birthday_service(db: Database, clock: Arc<dyn Clock>) -> BirthdayService {
    BirthdayService::new(Arc::new(db), clock, SentinelRule::default())
}

/// `import` subcommand: only the database location is needed
async fn run_import(json: &Path) -> Result<(), Error> {
    let database_path = database_path_from(&env_lookup)?;
    let db = Database::open(&database_path).await?;

    let timezone = parse_timezone(DEFAULT_TIMEZONE)?;
    let birthdays = birthday_service(db, Arc::new(SystemClock::new(timezone)));

    import::run_import(&birthdays, json).await?;
    Ok(())
}

async fn run_bot() -> Result<(), Error> {
    let config = load_configuration()?;

    let db = Database::open(&config.database_path).await?;
    info!("Opened birthday database at {}", config.database_path.display());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.timezone));
    let data = Data {
        birthdays: birthday_service(db, clock.clone()),
        channel_id: config.channel_id,
    };

    let today = data.birthdays.today_announcement().await;
    if today.is_empty() {
        info!("No birthdays today ({})", clock.now().format("%B %-d"));
    } else {
        info!("Birthdays today: {}", today.trim_end());
    }

    start_bot(config, data, clock).await
}

/// Route framework errors; unknown slash commands get a plain reply
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::UnknownInteraction {
            ctx,
            framework,
            interaction,
            ..
        } => {
            let reply =
                respond_to_structured(&framework.user_data.birthdays, &interaction.data.name).await;
            let response = serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new().content(reply),
            );
            if let Err(e) = interaction.create_response(ctx, response).await {
                error!("Failed to answer unknown command {}: {}", interaction.data.name, e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Create and start the Discord bot
async fn start_bot(config: Config, data: Data, clock: Arc<dyn Clock>) -> Result<(), Error> {
    let dev_guild_id = config.dev_guild_id;
    let birthdays = data.birthdays.clone();
    let channel_id = data.channel_id;

    // Create framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                month(),
                all(),
                next(),
                add_birthday(),
                update_birthday(),
                remove_birthday(),
                show_birthday(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::Message { new_message } = event {
                        let gateway = SerenityGateway::new(ctx.http.clone());
                        handle_inbound_message(
                            &data.birthdays,
                            &gateway,
                            framework.bot_id,
                            new_message.author.id,
                            new_message.channel_id,
                            &new_message.content,
                        )
                        .await;
                    }
                    Ok(())
                })
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                // Register commands based on dev_guild_id
                if let Some(guild_id) = dev_guild_id {
                    let guild = serenity::GuildId::new(guild_id);
                    info!("Registering commands in development guild: {}", guild_id);
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild)
                        .await?;
                    info!(
                        "Commands registered in guild {} (instant updates)",
                        guild_id
                    );
                } else {
                    info!("Registering commands globally (may take up to 1 hour)");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Commands registered globally");
                }

                info!("Bot is ready!");
                Ok(data)
            })
        })
        .build();

    // Create client with required intents
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    // Start schedule manager
    let gateway = Arc::new(SerenityGateway::new(client.http.clone()));
    let scheduler = start_schedule_manager(DailyScheduler::new(
        birthdays,
        gateway,
        clock,
        channel_id,
        config.trigger_time,
    ));
    info!(
        "Schedule manager task started ({} {})",
        config.trigger_time.format("%H:%M"),
        config.timezone
    );

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        info!("Received Ctrl-C, shutting down");
        shard_manager.shutdown_all().await;
    });

    // Start the bot
    info!("Starting bot...");
    let result = client.start().await;
    scheduler.stop().await;
    result?;

    info!("Bot stopped");
    Ok(())
}

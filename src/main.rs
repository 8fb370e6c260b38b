use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;
use teloxide::update_listeners::{Polling, webhooks};

use dashbot::cli::{Cli, Commands};
use dashbot::core::{AdminList, Settings, init_logger};
use dashbot::storage::{self, DbPool};
use dashbot::telegram::webhook::webhook_options;
use dashbot::telegram::{HandlerDeps, ViewStore, create_bot, schema, setup_bot_commands, wait_for_bot_api};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    // The logger comes first so configuration warnings are visible
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    init_logger(&log_level)?;

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {}", panic_info);
    }));

    let settings = Settings::from_env()?;
    log::info!("Configuration loaded: {}", settings.summary());

    match cli.command {
        Some(Commands::Run { webhook }) => {
            log::info!("Running bot (webhook: {})", webhook);
            run_bot(settings, webhook).await
        }
        Some(Commands::CheckConfig) => {
            println!("{}", settings.summary());
            Ok(())
        }
        None => {
            log::info!("No command specified, running bot in long polling mode");
            run_bot(settings, false).await
        }
    }
}

/// Opens the database pool when persistence is enabled
async fn setup_database(settings: &Settings) -> Result<Option<DbPool>> {
    if !settings.db.enabled {
        log::info!("User persistence disabled (DB_ENABLED=false)");
        return Ok(None);
    }

    let pool = storage::init_pool(settings.db.connect_options())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize database {}@{}: {}", settings.db.name, settings.db.host, e))?;
    log::info!("Connected to database {} on {}", settings.db.name, settings.db.host);
    Ok(Some(pool))
}

async fn run_bot(settings: Settings, use_webhook: bool) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    let bot = create_bot(&settings)?;

    let me = wait_for_bot_api(&bot).await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.user.username, me.user.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let db_pool = setup_database(&settings).await?;

    let admins = AdminList::new(settings.admin_ids.iter().copied());
    if admins.is_empty() {
        log::warn!("ADMIN_IDS is empty; /admin will deny everyone");
    }

    let handler_deps = HandlerDeps::new(ViewStore::new(), admins, db_pool);

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema(handler_deps))
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build();

    let listener_error_handler = LoggingErrorHandler::with_custom_text("An error from the update listener");

    if use_webhook {
        let options = webhook_options(&settings.webhook).await?;
        log::info!(
            "Starting bot in webhook mode at {} (listening on {}{})",
            options.url,
            options.address,
            options.path
        );
        let listener = webhooks::axum(bot, options).await?;

        log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());
        dispatcher.dispatch_with_listener(listener, listener_error_handler).await;
    } else {
        log::info!("Starting bot in long polling mode");
        let listener = Polling::builder(bot).drop_pending_updates().build();

        log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());
        dispatcher.dispatch_with_listener(listener, listener_error_handler).await;
    }

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

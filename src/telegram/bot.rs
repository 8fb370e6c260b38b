//! Bot initialization utilities
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Startup handshake with the Bot API

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;
use tokio::time::sleep;

use crate::core::config::{self, Settings};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "check that the bot is running")]
    Start,
    #[command(description = "show your numeric Telegram ID")]
    Myid,
    #[command(description = "check admin privileges")]
    Admin,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Invalid `BOT_API_URL` or HTTP client setup failure
pub fn create_bot(settings: &Settings) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(settings.bot_token.expose_secret(), client);

    let bot = match &settings.bot_api_url {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// True for errors worth waiting out while the Bot API comes up
pub fn is_retryable_startup_error(err: &teloxide::RequestError) -> bool {
    match err {
        teloxide::RequestError::Network(_) | teloxide::RequestError::RetryAfter(_) => true,
        other => {
            let err_str = other.to_string();
            err_str.contains("restart") || err_str.contains("timed out") || err_str.contains("Connection refused")
        }
    }
}

/// Calls `get_me` until the Bot API answers.
///
/// Retries only transient failures, up to `STARTUP_MAX_RETRIES` times.
pub async fn wait_for_bot_api(bot: &Bot) -> anyhow::Result<Me> {
    let max_retries = config::retry::STARTUP_MAX_RETRIES;
    let mut attempt = 0;

    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                attempt += 1;
                if attempt >= max_retries || !is_retryable_startup_error(&e) {
                    return Err(anyhow::anyhow!(
                        "Failed to connect to Bot API after {} attempt(s): {}",
                        attempt,
                        e
                    ));
                }

                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {}s...",
                    attempt,
                    max_retries,
                    e,
                    config::retry::STARTUP_RETRY_DELAY_SECS
                );
                sleep(config::retry::startup_delay()).await;
            }
        }
    }
}

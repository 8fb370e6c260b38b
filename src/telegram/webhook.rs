//! Webhook listener options

use std::net::{IpAddr, SocketAddr};

use secrecy::ExposeSecret;
use teloxide::update_listeners::webhooks::Options;
use tokio::net::lookup_host;
use url::Url;

use crate::core::config::WebhookConfig;
use crate::core::error::{AppResult, ConfigError};

/// Telegram only accepts `A-Z`, `a-z`, `0-9`, `_` and `-` in a secret token, 1 to 256 characters.
pub fn is_valid_secret_token(token: &str) -> bool {
    (1..=256).contains(&token.len())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Address the embedded axum server binds to.
///
/// IP literals are used as is; host names such as `localhost` are resolved
/// and the first address wins.
pub async fn bind_address(config: &WebhookConfig) -> AppResult<SocketAddr> {
    if let Ok(ip) = config.host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, config.port));
    }

    lookup_host((config.host.as_str(), config.port))
        .await?
        .next()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("WEBHOOK_HOST {:?} resolved to no address", config.host),
            )
            .into()
        })
}

/// Builds the teloxide webhook options from the configuration.
///
/// Pending updates are dropped when the webhook is registered.
pub async fn webhook_options(config: &WebhookConfig) -> AppResult<Options> {
    let url = config.url.as_deref().ok_or(ConfigError::MissingWebhookUrl)?;
    let url = Url::parse(url)?;

    let mut options = Options::new(bind_address(config).await?, url)
        .path(config.path.clone())
        .drop_pending_updates();

    if let Some(secret) = &config.secret {
        let secret = secret.expose_secret();
        if is_valid_secret_token(secret) {
            options = options.secret_token(secret.to_string());
        } else {
            log::warn!("WEBHOOK_SECRET contains characters Telegram rejects; ignoring it");
        }
    }

    Ok(options)
}

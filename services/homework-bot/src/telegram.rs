//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::Notifier;
use crate::BotError;

/// Subset of the Bot API response envelope
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single chat through a Telegram bot
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            config.telegram.api_url.trim_end_matches('/'),
            config.credentials.telegram_token
        );

        tracing::debug!(
            "Created TelegramNotifier for chat {}",
            config.credentials.telegram_chat_id
        );

        Self {
            send_message_url,
            chat_id: config.credentials.telegram_chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(BotError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        // A 200 with "ok": false is still a failure; an unparsable 200 body is not
        if let Ok(TelegramResponse {
            ok: false,
            description,
        }) = serde_json::from_str::<TelegramResponse>(&response.body)
        {
            return Err(BotError::Delivery(format!(
                "Telegram API rejected message: {}",
                description.unwrap_or_default()
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}

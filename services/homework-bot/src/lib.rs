//! Homework bot - review status notifier
//!
//! Polls the Practicum homework status API, detects status changes, and relays
//! them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod state;
pub mod telegram;
pub mod verdict;

pub use config::{load_config, Config};
pub use error::{BotError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::state::PollState;
use crate::telegram::TelegramNotifier;

/// Run the bot with the given configuration until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    let http = Arc::new(ReqwestHttpClient::new(config.polling.request_timeout)?);
    run_with(config, http).await
}

/// Run the bot over the given HTTP client until Ctrl-C.
///
/// Credentials are checked before anything is fetched or sent.
pub async fn run_with(config: Config, http: Arc<dyn HttpClient>) -> Result<()> {
    config.validate()?;

    let client = PracticumClient::new(&config, Arc::clone(&http));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config, http));

    let mut engine = Engine::new(client, notifier, &config, PollState::starting_now());

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Homework bot started");
    engine.run(cancel).await;
    tracing::info!("Homework bot stopped");

    Ok(())
}

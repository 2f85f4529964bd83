//! Notifier trait for delivering chat messages

use async_trait::async_trait;

/// Trait for sending notifications to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a text message.
    ///
    /// Failures are returned as [`crate::BotError::Delivery`]; the caller decides
    /// whether they matter.
    async fn notify(&self, message: &str) -> crate::Result<()>;
}

//! User-facing notifications with an optional action button.

use async_trait::async_trait;
use serde::Serialize;

pub const SHOW_DETAILS: &str = "Show Details";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows `message` and resolves with the action the user picked, or
    /// `None` when the notification was dismissed.
    async fn notify(
        &self,
        level: NotificationLevel,
        message: &str,
        actions: &[&str],
    ) -> Option<String>;
}

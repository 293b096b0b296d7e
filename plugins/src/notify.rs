use std::io::{BufRead, IsTerminal, Write};

use async_trait::async_trait;

use precommit_core::api::{NotificationLevel, Notifier};

/// Prints notifications to stderr. Actions are offered as a y/N prompt
/// when stdin is a terminal, or picked outright with `auto_accept`.
pub struct ConsoleNotifier {
    auto_accept: bool,
}

impl ConsoleNotifier {
    pub fn new(auto_accept: bool) -> Self {
        Self { auto_accept }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(
        &self,
        level: NotificationLevel,
        message: &str,
        actions: &[&str],
    ) -> Option<String> {
        eprintln!("{}", format_notification(level, message));

        let action = actions.first()?.to_string();
        if self.auto_accept {
            return Some(action);
        }
        if !std::io::stdin().is_terminal() {
            return None;
        }

        let prompt = action.clone();
        let accepted = tokio::task::spawn_blocking(move || ask(&prompt))
            .await
            .unwrap_or(false);
        accepted.then_some(action)
    }
}

pub fn format_notification(level: NotificationLevel, message: &str) -> String {
    match level {
        NotificationLevel::Info => format!("info: {message}"),
        NotificationLevel::Error => format!("error: {message}"),
    }
}

fn ask(action: &str) -> bool {
    let mut stderr = std::io::stderr();
    if write!(stderr, "{action}? [y/N] ").and_then(|_| stderr.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

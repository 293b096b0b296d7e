use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

use crate::config::EventsOutConfig;

const STDOUT_TARGET: &str = "stdout:";

enum Msg {
    Line(String),
    Flush(oneshot::Sender<()>),
}

/// Sending half of the run-event stream. Cheap to clone.
#[derive(Clone)]
pub struct EventsOutTx {
    tx: mpsc::Sender<Msg>,
    dropped: Arc<AtomicU64>,
    drop_when_full: bool,
}

impl EventsOutTx {
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub async fn send_line(&self, line: String) {
        if self.drop_when_full {
            if self.tx.try_send(Msg::Line(line)).is_err() {
                let count = self.dropped.fetch_add(1, Ordering::Relaxed);
                // Log every 100 dropped events to avoid log spam
                if count % 100 == 0 {
                    tracing::warn!(
                        target: "precommit.events_out",
                        dropped_total = count + 1,
                        "events_out channel full, run events are being dropped"
                    );
                }
            }
        } else if self.tx.send(Msg::Line(line)).await.is_err() {
            tracing::debug!(
                target: "precommit.events_out",
                "events_out writer closed, send failed"
            );
        }
    }

    /// Resolves once every line sent before this call has been written.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Msg::Flush(done_tx)).await.is_ok() {
            let _ = done_rx.await;
        }
    }
}

/// Spawns the writer task. `Ok(None)` when the stream is disabled.
pub async fn start_events_out(cfg: &EventsOutConfig) -> Result<Option<EventsOutTx>, String> {
    if !cfg.enabled {
        tracing::debug!(target: "precommit.events_out", "events_out disabled");
        return Ok(None);
    }
    if cfg.path.trim().is_empty() {
        tracing::warn!(
            target: "precommit.events_out",
            "events_out path is empty in config, no run events will be written"
        );
        return Ok(None);
    }
    if cfg.channel_capacity == 0 {
        return Err("events_out.channel_capacity must be greater than zero".to_string());
    }

    let mut writer: Box<dyn tokio::io::AsyncWrite + Unpin + Send> = if cfg.path == STDOUT_TARGET {
        Box::new(tokio::io::stdout())
    } else {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cfg.path)
            .await
            .map_err(|e| format!("failed to open events_out file {}: {e}", cfg.path))?;
        Box::new(file)
    };

    tracing::info!(
        target: "precommit.events_out",
        path = %cfg.path,
        channel_capacity = cfg.channel_capacity,
        drop_when_full = cfg.drop_when_full,
        "events_out writer started"
    );

    let (tx, mut rx) = mpsc::channel::<Msg>(cfg.channel_capacity);

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let mut line = match msg {
                Msg::Line(line) => line,
                Msg::Flush(done) => {
                    let _ = done.send(());
                    continue;
                }
            };
            if !line.ends_with('\n') {
                line.push('\n');
            }
            if writer.write_all(line.as_bytes()).await.is_err() {
                tracing::error!(
                    target: "precommit.events_out",
                    "failed to write run event, writer task exiting"
                );
                return;
            }
            // each event is a whole run boundary; flush so a crash loses nothing
            if writer.flush().await.is_err() {
                tracing::error!(target: "precommit.events_out", "failed to flush run events");
                return;
            }
        }
        let _ = writer.flush().await;
    });

    Ok(Some(EventsOutTx {
        tx,
        dropped: Arc::new(AtomicU64::new(0)),
        drop_when_full: cfg.drop_when_full,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_config_yields_none() {
        let cfg = EventsOutConfig::default();
        assert!(start_events_out(&cfg).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let cfg = EventsOutConfig {
            enabled: true,
            path: path.to_string_lossy().into_owned(),
            channel_capacity: 8,
            drop_when_full: false,
        };

        let tx = start_events_out(&cfg).await.unwrap().unwrap();
        tx.send_line("{\"a\":1}".to_string()).await;
        tx.send_line("{\"b\":2}\n".to_string()).await;
        tx.flush().await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(tx.dropped_count(), 0);
    }
}

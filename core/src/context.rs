use crate::config::AppConfig;
use crate::events_out::{start_events_out, EventsOutTx};

/// Per-activation state shared by everything the host wires up.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    events_out: Option<EventsOutTx>,
}

impl AppContext {
    pub async fn new(cfg: AppConfig) -> Result<Self, String> {
        let events_out = start_events_out(&cfg.events_out).await?;
        Ok(Self { cfg, events_out })
    }

    /// A context with no run-event stream, whatever the config says.
    pub fn without_events(cfg: AppConfig) -> Self {
        Self {
            cfg,
            events_out: None,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn events_out(&self) -> Option<EventsOutTx> {
        self.events_out.clone()
    }

    /// Waits for queued run events to reach their target.
    pub async fn flush_events(&self) {
        if let Some(out) = &self.events_out {
            out.flush().await;
        }
    }
}

use serde::Serialize;

use super::writer::EventsOutTx;

/// One JSONL record describing a run's lifecycle.
#[derive(Debug, Clone, Serialize)]
pub struct RunEvent {
    pub v: u32,
    #[serde(rename = "type")]
    pub event_type: String,
    pub ts: String,
    pub run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RunEvent {
    pub fn new(event_type: &str, run_id: &str) -> Self {
        Self {
            v: 1,
            event_type: event_type.to_string(),
            ts: chrono::Utc::now().to_rfc3339(),
            run_id: run_id.to_string(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

pub async fn write_run_event(events_out: Option<&EventsOutTx>, ev: &RunEvent) {
    let Some(out) = events_out else {
        return;
    };
    match serde_json::to_string(ev) {
        Ok(line) => out.send_line(line).await,
        Err(e) => tracing::debug!(
            target: "precommit.events_out",
            error = %e,
            "failed to serialize run event"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_type_and_skips_empty_data() {
        let ev = RunEvent::new("run.start", "run-1");
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "run.start");
        assert_eq!(json["run_id"], "run-1");
        assert_eq!(json["v"], 1);
        assert!(json.get("data").is_none());
    }
}

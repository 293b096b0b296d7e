pub mod helpers;
pub mod writer;

pub use crate::config::EventsOutConfig;
pub use helpers::{write_run_event, RunEvent};
pub use writer::{start_events_out, EventsOutTx};

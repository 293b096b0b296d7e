//! Runs `pre-commit` on behalf of an editor, classifies what it printed and
//! reports the outcome through host-provided log and notification surfaces.

pub mod api;
pub mod classify;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod events_out;
pub mod log;
pub mod notify;
pub mod report;
pub mod runner;
pub mod scope;
pub mod services;
pub mod vcs;

pub use context::AppContext;

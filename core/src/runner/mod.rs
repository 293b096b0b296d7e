mod commit;
mod direct;
pub mod exit;
mod process;
pub mod template;
mod terminal;
pub mod types;

pub use commit::CommitAction;
pub use direct::DirectCapture;
pub use exit::normalize_exit;
pub use process::ProcessRunner;
pub use template::CommandTemplate;
pub use terminal::{Terminal, TerminalRelay};
pub use types::{CommandSpec, RawOutput, Transcript};

pub mod commit;
pub mod factory;
pub mod git;
pub mod log;
pub mod notify;
pub mod process;
pub mod services;
pub mod terminal;

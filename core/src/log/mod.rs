//! The user-facing output log.
//!
//! One log per host session, constructed by the host and handed to the
//! dispatcher and reporter. Writers that need several lines to stay together
//! use [`OutputLog::rewrite`] or [`OutputLog::append_block`], which
//! implementations perform under a single lock.

mod memory;

pub use memory::MemoryLog;

pub trait OutputLog: Send + Sync {
    fn clear(&self);

    fn append_line(&self, line: &str);

    /// Brings the log in front of the user.
    fn show(&self);

    fn append_block(&self, lines: &[String]) {
        for line in lines {
            self.append_line(line);
        }
    }

    /// Replaces the whole log with `lines`.
    fn rewrite(&self, lines: &[String]) {
        self.clear();
        self.append_block(lines);
    }
}

use std::sync::Mutex;

use super::OutputLog;

#[derive(Default)]
struct MemoryLogState {
    lines: Vec<String>,
    shown: usize,
}

/// Process-lifetime log kept in memory.
#[derive(Default)]
pub struct MemoryLog {
    inner: Mutex<MemoryLogState>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.with_state(|s| s.lines.clone())
    }

    pub fn contents(&self) -> String {
        self.with_state(|s| s.lines.join("\n"))
    }

    /// How many times the log was brought to front.
    pub fn shown_count(&self) -> usize {
        self.with_state(|s| s.shown)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryLogState) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl OutputLog for MemoryLog {
    fn clear(&self) {
        self.with_state(|s| s.lines.clear());
    }

    fn append_line(&self, line: &str) {
        self.with_state(|s| s.lines.push(line.to_string()));
    }

    fn show(&self) {
        self.with_state(|s| s.shown += 1);
    }

    fn append_block(&self, lines: &[String]) {
        self.with_state(|s| s.lines.extend(lines.iter().cloned()));
    }

    fn rewrite(&self, lines: &[String]) {
        self.with_state(|s| {
            s.lines.clear();
            s.lines.extend(lines.iter().cloned());
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn append_clear_show() {
        let log = MemoryLog::new();
        log.append_line("one");
        log.append_line("two");
        assert_eq!(log.contents(), "one\ntwo");

        log.clear();
        assert!(log.lines().is_empty());

        log.show();
        log.show();
        assert_eq!(log.shown_count(), 2);
    }

    #[test]
    fn concurrent_blocks_never_interleave() {
        let log = Arc::new(MemoryLog::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    let block: Vec<String> = (0..50).map(|n| format!("{i}:{n}")).collect();
                    log.append_block(&block);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let lines = log.lines();
        assert_eq!(lines.len(), 400);
        for chunk in lines.chunks(50) {
            let owner = chunk[0].split(':').next().unwrap();
            assert!(chunk.iter().all(|l| l.starts_with(&format!("{owner}:"))));
        }
    }
}

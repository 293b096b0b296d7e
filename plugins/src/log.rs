//! Output log kept in a file so that separate invocations share it.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use precommit_core::api::OutputLog;

pub struct FileLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLog {
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current log text; empty when nothing was written yet.
    pub fn contents(&self) -> String {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        fs::read_to_string(&self.path).unwrap_or_default()
    }

    fn append(&self, text: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let res = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(text.as_bytes()));
        if let Err(e) = res {
            self.warn("append", &e);
        }
    }

    /// Writes `text` to a uniquely named sibling, then renames it over the log.
    fn replace_with(&self, text: &str) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn warn(&self, op: &str, e: &std::io::Error) {
        tracing::warn!(
            target: "precommit.log",
            path = %self.path.display(),
            op,
            error = %e,
            "output log write failed"
        );
    }
}

fn joined(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

impl OutputLog for FileLog {
    fn clear(&self) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = fs::write(&self.path, "") {
            self.warn("clear", &e);
        }
    }

    fn append_line(&self, line: &str) {
        self.append(&format!("{line}\n"));
    }

    fn show(&self) {
        let text = self.contents();
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
            self.warn("show", &e);
        }
    }

    fn append_block(&self, lines: &[String]) {
        self.append(&joined(lines));
    }

    fn rewrite(&self, lines: &[String]) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = self.replace_with(&joined(lines)) {
            self.warn("rewrite", &e);
        }
    }
}

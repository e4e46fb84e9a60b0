//! Human-readable configuration log
//!
//! Every check writes a progress line (`Checking curl-config --prefix ....`)
//! followed by its result on the same line, both to an optional append-only
//! log file and to `tracing`. Failing to write the file never fails a probe.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Default)]
struct Inner {
    file: Option<File>,
    pending: Option<String>,
    lines: Vec<String>,
}

pub struct ConfigLog {
    path: Option<PathBuf>,
    inner: Mutex<Inner>,
}

impl ConfigLog {
    /// Log to tracing only
    pub fn disabled() -> Self {
        Self {
            path: None,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Append to `path`, creating it and its parent directory as needed.
    /// Falls back to tracing only if the file cannot be opened.
    pub fn open(path: &Path) -> Self {
        let file = open_append(path)
            .map_err(|e| warn!(path = %path.display(), error = %e, "Cannot open configuration log"))
            .ok();

        let log = Self {
            path: file.as_ref().map(|_| path.to_path_buf()),
            inner: Mutex::new(Inner {
                file,
                ..Default::default()
            }),
        };
        log.write_raw(&format!(
            "confprobe {} started {}\n",
            crate::VERSION,
            chrono::Utc::now().to_rfc3339()
        ));
        log
    }

    pub fn from_config(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::open(p),
            None => Self::disabled(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Start a check line. A previous unfinished line is closed first.
    pub fn message(&self, text: &str) {
        info!("{}", text);
        let unfinished = {
            let Ok(mut inner) = self.inner.lock() else {
                return;
            };
            inner.pending.replace(text.to_string())
        };
        if let Some(prev) = unfinished {
            self.finish(prev, "(no result)");
        }
        self.write_raw(text);
    }

    /// Finish the current check line with `text`
    pub fn result(&self, text: &str) {
        let pending = self
            .inner
            .lock()
            .ok()
            .and_then(|mut inner| inner.pending.take())
            .unwrap_or_default();
        info!("{} {}", pending, text);
        self.write_raw(&format!(" {}\n", text));
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.push(format!("{} {}", pending, text).trim().to_string());
        }
    }

    /// Completed check lines of this log instance
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.lines.clone())
            .unwrap_or_default()
    }

    fn finish(&self, pending: String, text: &str) {
        self.write_raw(&format!(" {}\n", text));
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.push(format!("{} {}", pending, text));
        }
    }

    fn write_raw(&self, text: &str) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if let Some(file) = inner.file.as_mut() {
            if let Err(e) = file.write_all(text.as_bytes()).and_then(|_| file.flush()) {
                warn!(error = %e, "Failed to write configuration log");
            }
        }
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

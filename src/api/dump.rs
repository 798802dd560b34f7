//! Raw response dumps for troubleshooting.
//!
//! When enabled, every response body is written verbatim to a directory
//! before it is decoded. Failing to write a dump never fails the request.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

/// Writes response bodies to `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct ResponseDump {
    dir: PathBuf,
}

impl ResponseDump {
    /// Dump into `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the dump file for `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(name)))
    }

    /// Write `body` under `name`, logging instead of failing.
    pub fn record(&self, name: &str, body: &[u8]) {
        match self.write(name, body) {
            Ok(path) => debug!(path = %path.display(), bytes = body.len(), "Dumped response"),
            Err(e) => warn!(name, error = %e, "Failed to dump response"),
        }
    }

    fn write(&self, name: &str, body: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        fs::write(&path, body)?;
        Ok(path)
    }
}

/// Keep file names to a safe character set.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

//! Persistence of captured message bodies

use crate::smtp::error::StubError;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use uuid::Uuid;

/// Line terminator used inside persisted message files.
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";
/// Line terminator used inside persisted message files.
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

/// Writes captured body lines to uniquely named files in a storage directory
#[derive(Debug, Clone)]
pub struct MessageStore {
    dir: PathBuf,
}

impl MessageStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist the captured lines to a new file, in capture order
    ///
    /// The directory is created if absent. The filename combines a
    /// second-resolution local timestamp with a v4 UUID, and the file is
    /// opened with `create_new` so an existing file is never overwritten.
    pub fn persist(&self, lines: &[String]) -> Result<PathBuf, StubError> {
        fs::create_dir_all(&self.dir)?;

        let name = format!(
            "{}_{}.txt",
            Local::now().format("%Y-%m-%d_%H-%M-%S"),
            Uuid::new_v4()
        );
        let path = self.dir.join(name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        for line in lines {
            write!(file, "{line}{LINE_TERMINATOR}")?;
        }

        Ok(path)
    }

    /// The configured storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

use crate::error::{Error, Result};
use crate::models::MentionRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read access to the durable mention log
pub trait MentionStore: Send + Sync {
    /// Load every stored mention, in storage order
    ///
    /// An empty or missing store yields an empty vector.
    fn load_entries(&self) -> Result<Vec<MentionRecord>>;
}

/// Mention log stored as JSON lines, one record per line
pub struct JsonlMentionStore {
    path: PathBuf,
}

impl JsonlMentionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MentionStore for JsonlMentionStore {
    fn load_entries(&self) -> Result<Vec<MentionRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Mention log not found, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::Io(format!(
                    "Failed to read mention log {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let mut entries = Vec::new();
        let mut malformed = 0usize;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim().trim_start_matches('\u{feff}');
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<MentionRecord>(line) {
                Ok(record) => entries.push(record),
                Err(e) => {
                    malformed += 1;
                    if malformed <= 3 {
                        warn!(line = line_no + 1, error = %e, "Skipping malformed mention line");
                    }
                }
            }
        }

        info!(
            path = %self.path.display(),
            entries = entries.len(),
            malformed,
            "Loaded mention log"
        );

        Ok(entries)
    }
}

/// Vector-backed store
#[derive(Debug, Clone, Default)]
pub struct InMemoryMentionStore {
    entries: Vec<MentionRecord>,
}

impl InMemoryMentionStore {
    pub fn new(entries: Vec<MentionRecord>) -> Self {
        Self { entries }
    }
}

impl MentionStore for InMemoryMentionStore {
    fn load_entries(&self) -> Result<Vec<MentionRecord>> {
        Ok(self.entries.clone())
    }
}

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::models::record::OutputRecord;

/// Destination for finished records.
pub trait OutputSink {
    fn push(&mut self, record: &OutputRecord) -> std::io::Result<()>;
}

/// Collects records in memory.
impl OutputSink for Vec<OutputRecord> {
    fn push(&mut self, record: &OutputRecord) -> std::io::Result<()> {
        Vec::push(self, record.clone());
        Ok(())
    }
}

/// Appends one JSON object per line to a dataset file.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default dataset location, respecting XDG_DATA_HOME.
    pub fn default_path() -> PathBuf {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir().unwrap_or_else(|| {
                    dirs::home_dir()
                        .unwrap_or_else(|| PathBuf::from("~"))
                        .join(".local")
                        .join("share")
                })
            });
        data_dir.join("blogsmith").join("dataset.jsonl")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for JsonlSink {
    fn push(&mut self, record: &OutputRecord) -> std::io::Result<()> {
        // Serialize first so a failure leaves the file untouched.
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

//! File-backed dataset source.

use crate::domain::error::TrackerError;
use crate::ports::source_port::SourcePort;
use std::fs;
use std::path::PathBuf;

pub struct FileSourceAdapter {
    path: PathBuf,
}

impl FileSourceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SourcePort for FileSourceAdapter {
    fn load_raw(&self) -> Result<Vec<u8>, TrackerError> {
        let content = fs::read(&self.path).map_err(|e| TrackerError::Source {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::debug!("read {} bytes from {}", content.len(), self.path.display());
        Ok(content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

//! Download sinks.
//!
//! In the storefront a download is a browser save-as. Outside a browser the
//! same boundary is a [`DownloadSink`]: something that accepts finished export
//! content under a file name and MIME type.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::{StoreError, StoreResult};

/// Receives finished exports.
pub trait DownloadSink: Send + Sync {
    /// Deliver `content` as `file_name`. The name is already sanitized.
    fn save(&self, content: &str, file_name: &str, mime_type: &str) -> StoreResult<()>;
}

/// Reduce `name` to a single safe path component.
///
/// Keeps ASCII letters, digits, `-`, `_` and `.`; every other character
/// becomes `_`. Leading dots are stripped. Falls back to `export`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "export".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Hand `content` to `sink` under a sanitized `file_name`.
pub fn trigger_download(
    sink: &dyn DownloadSink,
    content: &str,
    file_name: &str,
    mime_type: &str,
) -> StoreResult<String> {
    let name = sanitize_file_name(file_name);
    sink.save(content, &name, mime_type)?;
    info!(file = %name, mime_type, bytes = content.len(), "export delivered");
    Ok(name)
}

/// Writes each export as a file in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir` (created on first save).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, content: &str, file_name: &str, _mime_type: &str) -> StoreResult<()> {
        if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(StoreError::backend(format!(
                "refusing to write outside the export directory: {file_name}"
            )));
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(file_name), content)?;
        Ok(())
    }
}

/// A delivered export captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Sanitized file name.
    pub file_name: String,
    /// MIME type passed by the exporter.
    pub mime_type: String,
    /// Export body.
    pub content: String,
}

/// Keeps exports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<SavedFile>>,
}

impl MemorySink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far, oldest first.
    #[must_use]
    pub fn files(&self) -> Vec<SavedFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DownloadSink for MemorySink {
    fn save(&self, content: &str, file_name: &str, mime_type: &str) -> StoreResult<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SavedFile {
                file_name: file_name.to_string(),
                mime_type: mime_type.to_string(),
                content: content.to_string(),
            });
        Ok(())
    }
}

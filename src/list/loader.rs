use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{ListErrorKind, PslError, Result};
use crate::parser::normalize_rule;

#[cfg(feature = "async")]
use async_trait::async_trait;

/// Canonical location of the public suffix list
pub const PUBLIC_SUFFIX_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Default file name of a cached list
pub const DEFAULT_LIST_FILENAME: &str = "public_suffix_list.dat";

/// Default update interval: 7 days
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Trait for obtaining raw public suffix list text
pub trait ListSource: Send + Sync {
    /// Load the list text
    fn load_list(&self) -> Result<String>;
}

/// Async list source interface.
#[cfg(feature = "async")]
#[async_trait]
pub trait AsyncListSource: Send + Sync {
    /// Load the list text asynchronously
    async fn load_list(&self) -> Result<String>;
}

/// In-memory list source
#[derive(Debug, Clone, Default)]
pub struct MemoryListSource {
    text: String,
}

impl MemoryListSource {
    /// Create a source holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ListSource for MemoryListSource {
    fn load_list(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(feature = "async")]
#[async_trait]
impl AsyncListSource for MemoryListSource {
    async fn load_list(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// File-based list source
#[derive(Debug, Clone)]
pub struct FileListSource {
    path: PathBuf,
}

impl FileListSource {
    /// Create a source reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_error(&self, e: std::io::Error) -> PslError {
        PslError::list(
            ListErrorKind::FileError,
            format!("Failed to read {}: {}", self.path.display(), e),
        )
    }
}

impl ListSource for FileListSource {
    fn load_list(&self) -> Result<String> {
        debug!(path = %self.path.display(), "reading public suffix list");
        fs::read_to_string(&self.path).map_err(|e| self.file_error(e))
    }
}

#[cfg(feature = "async")]
#[async_trait]
impl AsyncListSource for FileListSource {
    async fn load_list(&self) -> Result<String> {
        debug!(path = %self.path.display(), "reading public suffix list");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.file_error(e))
    }
}

/// Nil list source: yields an empty list, leaving only the implicit `*` rule
#[derive(Debug, Clone, Copy, Default)]
pub struct NilListSource;

impl ListSource for NilListSource {
    fn load_list(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// Download the public suffix list text from `url`.
pub fn download_public_suffix_list(url: &str) -> Result<String> {
    info!(url, "downloading public suffix list");

    let response = ureq::get(url).call().map_err(|e| {
        PslError::list(
            ListErrorKind::DownloadFailed,
            format!("Download failed: {}", e),
        )
    })?;

    let (_, body) = response.into_parts();
    let mut text = String::new();
    body.into_reader().read_to_string(&mut text).map_err(|e| {
        PslError::list(
            ListErrorKind::DownloadFailed,
            format!("Failed to read response body: {}", e),
        )
    })?;

    debug!(bytes = text.len(), "downloaded public suffix list");
    Ok(text)
}

/// Download the public suffix list without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn download_public_suffix_list_async(url: impl Into<String>) -> Result<String> {
    let url = url.into();
    tokio::task::spawn_blocking(move || download_public_suffix_list(&url))
        .await
        .map_err(|e| {
            PslError::list(
                ListErrorKind::DownloadFailed,
                format!("Download task failed: {}", e),
            )
        })?
}

/// Check that list text holds at least one rule.
pub fn verify_list_text(text: &str) -> Result<()> {
    if text.lines().any(|line| normalize_rule(line).is_some()) {
        Ok(())
    } else {
        Err(PslError::list(
            ListErrorKind::InvalidData,
            "List contains no rules",
        ))
    }
}

/// Check that a list file is readable and holds at least one rule.
pub fn verify_list_file(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|e| {
        PslError::list(
            ListErrorKind::FileError,
            format!("Failed to read {}: {}", path.display(), e),
        )
    })?;
    verify_list_text(&text)
}

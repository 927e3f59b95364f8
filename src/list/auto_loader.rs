use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{ListErrorKind, PslError, Result};

use super::loader::{
    download_public_suffix_list, verify_list_file, ListSource, DEFAULT_LIST_FILENAME,
    DEFAULT_UPDATE_INTERVAL, PUBLIC_SUFFIX_LIST_URL,
};

/// Logger callback type for logging list updates
type LoggerCallback = Box<dyn Fn(&str) + Send + Sync>;

/// List source backed by an on-disk cache that is refreshed by download
pub struct AutoListSource {
    pub path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub url: String,
    pub update_interval: Duration,
    pub logger: Option<LoggerCallback>,
    download_lock: Mutex<()>,
}

impl AutoListSource {
    /// Create a new AutoListSource pointing at the canonical list URL
    pub fn new() -> Self {
        Self {
            path: None,
            data_dir: None,
            url: PUBLIC_SUFFIX_LIST_URL.to_string(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            logger: None,
            download_lock: Mutex::new(()),
        }
    }

    /// Set data directory for the cached list
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an explicit cache file path (overrides the data directory)
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set custom download URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set how old the cached list may get before it is refreshed
    /// (default [`DEFAULT_UPDATE_INTERVAL`])
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Set a callback receiving refresh progress messages
    pub fn with_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.logger = Some(Box::new(logger));
        self
    }

    fn notify(&self, msg: &str) {
        if let Some(logger) = self.logger.as_deref() {
            logger(msg);
        }
    }

    /// Get the cache file path
    pub fn list_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }

        match self.data_dir {
            Some(ref dir) => dir.join(DEFAULT_LIST_FILENAME),
            None => PathBuf::from(DEFAULT_LIST_FILENAME),
        }
    }

    /// Whether the cached list is missing, empty or older than the update interval
    fn is_stale(&self, path: &Path) -> bool {
        let Ok(meta) = fs::metadata(path) else {
            return true;
        };
        if meta.len() == 0 {
            return true;
        }
        meta.modified()
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok())
            .map_or(true, |age| age > self.update_interval)
    }

    /// Download the list into `path`
    fn download(&self, path: &Path) -> Result<()> {
        let _lock = self.download_lock.lock();

        // Another caller may have refreshed the file while we waited
        if !self.is_stale(path) {
            return Ok(());
        }

        self.notify(&format!("Downloading {} from {}", path.display(), self.url));

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let text = download_public_suffix_list(&self.url)?;

        // Write to a temporary file, verify it, then move into place
        let tmp_path = temp_path(path);
        let mut file = fs::File::create(&tmp_path)?;
        if let Err(e) = file.write_all(text.as_bytes()).and_then(|_| file.flush()) {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        drop(file);

        if let Err(e) = verify_list_file(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PslError::list(
                ListErrorKind::DownloadFailed,
                format!("Verification failed: {}", e),
            ));
        }

        fs::rename(&tmp_path, path)?;

        self.notify(&format!("Saved list to {}", path.display()));
        info!(path = %path.display(), "public suffix list updated");
        Ok(())
    }

    /// Ensure the list file is downloaded and available
    pub fn ensure_downloaded(&self) -> Result<PathBuf> {
        let path = self.list_path();

        if self.url.is_empty() {
            if path.exists() {
                return Ok(path);
            }
            return Err(PslError::list(
                ListErrorKind::NotConfigured,
                "No list file and no download URL configured",
            ));
        }

        if self.is_stale(&path) {
            self.notify(&format!("Cached list {} is stale", path.display()));
            if let Err(e) = self.download(&path) {
                if !path.exists() {
                    return Err(e);
                }
                self.notify(&format!("Refresh failed, keeping cached list: {}", e));
                warn!(path = %path.display(), error = %e, "using stale public suffix list");
            }
        }

        Ok(path)
    }
}

/// `<path>.tmp`, next to the cache file
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

impl Default for AutoListSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSource for AutoListSource {
    fn load_list(&self) -> Result<String> {
        let path = self.ensure_downloaded()?;
        fs::read_to_string(&path).map_err(|e| {
            PslError::list(
                ListErrorKind::FileError,
                format!("Failed to read {}: {}", path.display(), e),
            )
        })
    }
}

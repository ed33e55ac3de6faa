use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const APP_DIR: &str = "peek";
const SCREENSHOTS_SUBDIR: &str = "screenshots";
const SCREENSHOT_PREFIX: &str = "screenshot_";
const TEMP_CAPTURE_PREFIX: &str = "grab_";
const DEFAULT_FALLBACK_TEMP_DIR: &str = "/tmp/peek";
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("capture id is empty")]
    MissingCaptureId,
    #[error("no free screenshot file name for timestamp {timestamp}")]
    NameExhausted { timestamp: u64 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Where finished screenshots and transient full-screen grabs live.
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    temp_dir: PathBuf,
    screenshots_dir: PathBuf,
}

impl ScreenshotStore {
    pub const fn with_paths(temp_dir: PathBuf, screenshots_dir: PathBuf) -> Self {
        Self {
            temp_dir,
            screenshots_dir,
        }
    }

    /// Uses `screenshots_dir` when configured, otherwise the app data directory.
    pub fn with_default_paths(screenshots_dir: Option<PathBuf>) -> StorageResult<Self> {
        let screenshots_dir = match screenshots_dir {
            Some(dir) => dir,
            None => {
                let xdg_data_home = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from);
                let home = std::env::var_os("HOME").map(PathBuf::from);
                default_screenshots_dir(xdg_data_home.as_deref(), home.as_deref())?
            }
        };
        Ok(Self::with_paths(default_runtime_temp_dir(), screenshots_dir))
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn screenshots_dir(&self) -> &Path {
        &self.screenshots_dir
    }

    pub fn ensure_dirs(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.temp_dir)?;
        fs::create_dir_all(&self.screenshots_dir)?;
        Ok(())
    }

    pub fn temp_path_for_capture(&self, capture_id: &str) -> StorageResult<PathBuf> {
        if capture_id.is_empty() {
            return Err(StorageError::MissingCaptureId);
        }
        Ok(self
            .temp_dir
            .join(format!("{TEMP_CAPTURE_PREFIX}{capture_id}.png")))
    }

    /// Claims `screenshot_<timestamp>.png`, or `screenshot_<timestamp>_<n>.png`
    /// when a capture in the same second already holds the name. The file is
    /// created exclusively so concurrent captures never share a path.
    pub fn create_screenshot_file(&self, timestamp: u64) -> StorageResult<(PathBuf, File)> {
        for suffix in 0..MAX_NAME_ATTEMPTS {
            let name = if suffix == 0 {
                format!("{SCREENSHOT_PREFIX}{timestamp}.png")
            } else {
                format!("{SCREENSHOT_PREFIX}{timestamp}_{suffix}.png")
            };
            let path = self.screenshots_dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(StorageError::Io(err)),
            }
        }
        Err(StorageError::NameExhausted { timestamp })
    }

    pub fn discard_temp_capture(&self, capture_id: &str) -> StorageResult<()> {
        let path = self.temp_path_for_capture(capture_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

pub(crate) fn default_screenshots_dir(
    xdg_data_home: Option<&Path>,
    home: Option<&Path>,
) -> StorageResult<PathBuf> {
    let mut path = data_root(xdg_data_home, home)?;
    path.push(APP_DIR);
    path.push(SCREENSHOTS_SUBDIR);
    Ok(path)
}

fn data_root(xdg_data_home: Option<&Path>, home: Option<&Path>) -> StorageResult<PathBuf> {
    if let Some(xdg) = xdg_data_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(StorageError::MissingHomeDirectory)?;
    Ok(home.join(".local").join("share"))
}

fn default_runtime_temp_dir() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|dir| !dir.is_empty())
        .map(|dir| PathBuf::from(dir).join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FALLBACK_TEMP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(root: &Path) -> ScreenshotStore {
        ScreenshotStore::with_paths(root.join("tmp"), root.join("shots"))
    }

    #[test]
    fn default_screenshots_dir_prefers_xdg_data_home() {
        let path = default_screenshots_dir(
            Some(Path::new("/tmp/data-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");
        assert_eq!(path, PathBuf::from("/tmp/data-root/peek/screenshots"));
    }

    #[test]
    fn default_screenshots_dir_falls_back_to_local_share() {
        let path = default_screenshots_dir(Some(Path::new("")), Some(Path::new("/tmp/home")))
            .expect("path should resolve");
        assert_eq!(path, PathBuf::from("/tmp/home/.local/share/peek/screenshots"));
    }

    #[test]
    fn default_screenshots_dir_errors_without_home() {
        let err = default_screenshots_dir(None, None).unwrap_err();
        assert!(matches!(err, StorageError::MissingHomeDirectory));
    }

    #[test]
    fn create_screenshot_file_uses_timestamp_name() {
        let root = tempfile::tempdir().expect("tempdir");
        let store = store_in(root.path());
        store.ensure_dirs().expect("dirs should be created");

        let (path, _file) = store.create_screenshot_file(1_700_000_000).unwrap();
        assert_eq!(
            path,
            root.path().join("shots").join("screenshot_1700000000.png")
        );
        assert!(path.exists());
    }

    #[test]
    fn create_screenshot_file_appends_suffix_on_collision() {
        let root = tempfile::tempdir().expect("tempdir");
        let store = store_in(root.path());
        store.ensure_dirs().expect("dirs should be created");

        let (first, _) = store.create_screenshot_file(42).unwrap();
        let (second, _) = store.create_screenshot_file(42).unwrap();
        let (third, _) = store.create_screenshot_file(42).unwrap();

        assert!(first.ends_with("screenshot_42.png"));
        assert!(second.ends_with("screenshot_42_1.png"));
        assert!(third.ends_with("screenshot_42_2.png"));
    }

    #[test]
    fn create_screenshot_file_fails_when_directory_missing() {
        let root = tempfile::tempdir().expect("tempdir");
        let store = store_in(root.path());
        let err = store.create_screenshot_file(7).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn temp_capture_lifecycle_tolerates_missing_file() {
        let root = tempfile::tempdir().expect("tempdir");
        let store = store_in(root.path());
        store.ensure_dirs().expect("dirs should be created");

        let temp = store.temp_path_for_capture("abc").unwrap();
        assert!(temp.ends_with("grab_abc.png"));
        fs::write(&temp, b"png").unwrap();

        store.discard_temp_capture("abc").unwrap();
        assert!(!temp.exists());
        store.discard_temp_capture("abc").unwrap();
    }

    #[test]
    fn temp_path_rejects_empty_capture_id() {
        let store = ScreenshotStore::with_paths(PathBuf::from("/tmp"), PathBuf::from("/tmp"));
        assert!(matches!(
            store.temp_path_for_capture(""),
            Err(StorageError::MissingCaptureId)
        ));
    }
}

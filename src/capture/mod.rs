use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::geometry::Rect;
use crate::storage::{ScreenshotStore, StorageError};
use image::DynamicImage;
use thiserror::Error;

mod dispatcher;

pub use dispatcher::{
    capture_notice, CaptureDispatcher, CaptureResult, PendingCapture, CAPTURE_FAILED_MESSAGE,
    DEFAULT_MIN_DIMENSION,
};

/// Region handed to the native capture command, in the same coordinate space
/// as the pointer events that produced it.
pub type CaptureRequest = Rect;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("command failed: {command}")]
    CommandFailed { command: String, message: String },
    #[error("command io error: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read captured image: {message}")]
    ImageReadFailed { message: String },
    #[error("failed to write screenshot: {message}")]
    ImageWriteFailed { message: String },
    #[error("selection {request:?} lies outside the captured {width}x{height} screen")]
    EmptyCrop {
        request: CaptureRequest,
        width: u32,
        height: u32,
    },
    #[error("invalid capture artifact: {message}")]
    InvalidCaptureArtifact { message: String },
    #[error("capture worker stopped before reporting a result")]
    WorkerLost,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The native side of the capture boundary: grabs the region and returns the
/// stored file path. Called off the UI thread.
pub trait CaptureCommand: Send + Sync {
    fn capture_region(&self, request: CaptureRequest) -> Result<PathBuf, CaptureError>;
}

/// Source of full-screen pixels.
pub trait ScreenBackend: Send + Sync {
    fn grab_screen(&self, output: &Path) -> Result<(), CaptureError>;
}

/// Grabs every output with `grim` into a PNG.
#[derive(Debug, Default)]
pub struct GrimBackend;

impl ScreenBackend for GrimBackend {
    fn grab_screen(&self, output: &Path) -> Result<(), CaptureError> {
        run_command_status("grim", &[], output)
    }
}

/// Full-screen grab, crop to the request, save into the screenshots directory.
#[derive(Debug)]
pub struct ScreenCapture<B> {
    backend: B,
    store: ScreenshotStore,
}

impl ScreenCapture<GrimBackend> {
    pub fn system(store: ScreenshotStore) -> Self {
        Self::new(GrimBackend, store)
    }
}

impl<B: ScreenBackend> ScreenCapture<B> {
    pub const fn new(backend: B, store: ScreenshotStore) -> Self {
        Self { backend, store }
    }

    fn grab(&self, capture_id: &str) -> Result<DynamicImage, CaptureError> {
        let temp_path = self.store.temp_path_for_capture(capture_id)?;
        let grabbed = self
            .backend
            .grab_screen(&temp_path)
            .and_then(|()| load_image(&temp_path));
        cleanup_temp_capture_file(&self.store, capture_id);
        grabbed
    }
}

impl<B: ScreenBackend> CaptureCommand for ScreenCapture<B> {
    fn capture_region(&self, request: CaptureRequest) -> Result<PathBuf, CaptureError> {
        tracing::info!(
            x = request.x,
            y = request.y,
            width = request.width,
            height = request.height,
            "capturing screen region"
        );
        self.store.ensure_dirs()?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| CaptureError::InvalidCaptureArtifact {
                message: format!("system time before unix epoch: {err}"),
            })?;

        let screen = self.grab(&next_capture_id(now.as_nanos()))?;
        tracing::debug!(
            width = screen.width(),
            height = screen.height(),
            "screen grabbed"
        );
        let crop = crop_bounds(screen.width(), screen.height(), request).ok_or(
            CaptureError::EmptyCrop {
                request,
                width: screen.width(),
                height: screen.height(),
            },
        )?;
        tracing::debug!(
            x = crop.x,
            y = crop.y,
            width = crop.width,
            height = crop.height,
            "cropping to bounds"
        );
        let cropped = screen.crop_imm(crop.x, crop.y, crop.width, crop.height);

        let (path, file) = self.store.create_screenshot_file(now.as_secs())?;
        if let Err(err) = write_png(&cropped, file) {
            let _ = std::fs::remove_file(&path);
            return Err(err);
        }
        tracing::info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Clamps a request to the grabbed image. Negative origins snap to zero while
/// the requested extent is kept, then the extent is cut at the image edge.
/// `None` when nothing of the request overlaps the image.
pub fn crop_bounds(
    image_width: u32,
    image_height: u32,
    request: CaptureRequest,
) -> Option<CropBounds> {
    let x = u32::try_from(request.x.max(0)).unwrap_or(0);
    let y = u32::try_from(request.y.max(0)).unwrap_or(0);
    let width = request.width.min(image_width.saturating_sub(x));
    let height = request.height.min(image_height.saturating_sub(y));
    if width == 0 || height == 0 {
        return None;
    }
    Some(CropBounds {
        x,
        y,
        width,
        height,
    })
}

fn next_capture_id(nanos: u128) -> String {
    static NEXT_CAPTURE: AtomicU64 = AtomicU64::new(0);
    let sequence = NEXT_CAPTURE.fetch_add(1, Ordering::Relaxed);
    format!("{nanos}-{sequence}")
}

fn load_image(path: &Path) -> Result<DynamicImage, CaptureError> {
    image::open(path).map_err(|err| CaptureError::ImageReadFailed {
        message: err.to_string(),
    })
}

fn write_png(image: &DynamicImage, file: std::fs::File) -> Result<(), CaptureError> {
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, image::ImageFormat::Png)
        .map_err(|err| CaptureError::ImageWriteFailed {
            message: err.to_string(),
        })?;
    writer.flush().map_err(|err| CaptureError::ImageWriteFailed {
        message: err.to_string(),
    })
}

fn cleanup_temp_capture_file(store: &ScreenshotStore, capture_id: &str) {
    if let Err(err) = store.discard_temp_capture(capture_id) {
        tracing::warn!(capture_id, ?err, "failed to cleanup temporary screen grab");
    }
}

fn run_command_status(command: &str, args: &[&str], output: &Path) -> Result<(), CaptureError> {
    let status = Command::new(command)
        .args(args)
        .arg(output)
        .status()
        .map_err(|err| CaptureError::CommandIo {
            command: command.to_string(),
            source: err,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(CaptureError::CommandFailed {
            command: command.to_string(),
            message: format!("command exited with status: {status}"),
        })
    }
}

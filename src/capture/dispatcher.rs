use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use super::{CaptureCommand, CaptureError, CaptureRequest};
use crate::geometry::Rect;
use crate::notification::Notifier;

pub const DEFAULT_MIN_DIMENSION: u32 = 10;
pub const CAPTURE_FAILED_MESSAGE: &str = "Failed to capture screenshot";

pub type CaptureResult = Result<PathBuf, CaptureError>;

/// Text shown to the user for a finished capture. Failures never expose the
/// underlying error.
pub fn capture_notice(result: &CaptureResult) -> String {
    match result {
        Ok(path) => format!("Screenshot saved to:\n{}", path.display()),
        Err(_) => CAPTURE_FAILED_MESSAGE.to_string(),
    }
}

/// Handle on a capture running in the background. Dropping it does not cancel
/// the capture; the result is then simply discarded.
#[derive(Debug)]
pub struct PendingCapture {
    receiver: mpsc::Receiver<CaptureResult>,
}

impl PendingCapture {
    /// `None` while the capture is still running.
    pub fn try_result(&self) -> Option<CaptureResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(CaptureError::WorkerLost)),
        }
    }

    pub fn wait(self) -> CaptureResult {
        self.receiver
            .recv()
            .unwrap_or(Err(CaptureError::WorkerLost))
    }
}

/// Gate between a finished selection and the capture command.
#[derive(Clone)]
pub struct CaptureDispatcher {
    command: Arc<dyn CaptureCommand>,
    notifier: Arc<dyn Notifier>,
    min_dimension: u32,
}

impl CaptureDispatcher {
    pub fn new(command: Arc<dyn CaptureCommand>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            command,
            notifier,
            min_dimension: DEFAULT_MIN_DIMENSION,
        }
    }

    pub fn with_min_dimension(mut self, min_dimension: u32) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    pub fn min_dimension(&self) -> u32 {
        self.min_dimension
    }

    /// Fires the capture on a worker thread without waiting for it. Selections
    /// not larger than the minimum dimension on both axes are dropped silently.
    pub fn submit(&self, rect: Rect) -> Option<PendingCapture> {
        if !rect.exceeds(self.min_dimension) {
            tracing::debug!(
                width = rect.width,
                height = rect.height,
                min_dimension = self.min_dimension,
                "selection too small; discarded"
            );
            return None;
        }

        let (tx, receiver) = mpsc::channel::<CaptureResult>();
        let fallback_tx = tx.clone();
        let command = self.command.clone();
        let notifier = self.notifier.clone();
        let spawned = std::thread::Builder::new()
            .name("peek-capture".to_string())
            .spawn(move || {
                let result = run_capture(command.as_ref(), rect);
                report(&result, notifier.as_ref());
                let _ = tx.send(result);
            });

        if let Err(err) = spawned {
            tracing::error!(?err, "failed to spawn capture worker");
            let result = Err(CaptureError::WorkerLost);
            report(&result, self.notifier.as_ref());
            let _ = fallback_tx.send(result);
        }

        Some(PendingCapture { receiver })
    }
}

impl std::fmt::Debug for CaptureDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureDispatcher")
            .field("min_dimension", &self.min_dimension)
            .finish_non_exhaustive()
    }
}

fn run_capture(command: &dyn CaptureCommand, request: CaptureRequest) -> CaptureResult {
    panic::catch_unwind(AssertUnwindSafe(|| command.capture_region(request))).unwrap_or_else(
        |_| {
            tracing::error!("capture command panicked");
            Err(CaptureError::WorkerLost)
        },
    )
}

fn report(result: &CaptureResult, notifier: &dyn Notifier) {
    match result {
        Ok(path) => tracing::info!(path = %path.display(), "screenshot captured"),
        Err(err) => tracing::error!(?err, "failed to capture screenshot"),
    }
    notifier.notify(&capture_notice(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Condvar, Mutex};

    #[derive(Default)]
    struct FakeCommand {
        requests: Mutex<Vec<CaptureRequest>>,
        fail_with: Option<String>,
    }

    impl FakeCommand {
        fn saving() -> Self {
            Self::default()
        }

        fn failing(message: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }

        fn requests(&self) -> Vec<CaptureRequest> {
            self.requests.lock().expect("requests lock").clone()
        }
    }

    impl CaptureCommand for FakeCommand {
        fn capture_region(&self, request: CaptureRequest) -> CaptureResult {
            self.requests.lock().expect("requests lock").push(request);
            match &self.fail_with {
                Some(message) => Err(CaptureError::CommandFailed {
                    command: "grim".to_string(),
                    message: message.clone(),
                }),
                None => Ok(PathBuf::from("/tmp/shot1.png")),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().expect("messages lock").clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, body: &str) {
            self.messages
                .lock()
                .expect("messages lock")
                .push(body.to_string());
        }
    }

    type Harness = (CaptureDispatcher, Arc<FakeCommand>, Arc<RecordingNotifier>);

    fn dispatcher(command: FakeCommand) -> Harness {
        let command = Arc::new(command);
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = CaptureDispatcher::new(command.clone(), notifier.clone());
        (dispatcher, command, notifier)
    }

    #[test]
    fn successful_capture_reports_saved_path() {
        let (dispatcher, command, notifier) = dispatcher(FakeCommand::saving());

        let pending = dispatcher
            .submit(Rect::new(100, 100, 150, 200))
            .expect("large selection should dispatch");

        let path = pending.wait().expect("capture should succeed");
        assert_eq!(path, PathBuf::from("/tmp/shot1.png"));
        assert_eq!(command.requests(), vec![Rect::new(100, 100, 150, 200)]);
        assert_eq!(
            notifier.messages(),
            vec!["Screenshot saved to:\n/tmp/shot1.png".to_string()]
        );
    }

    #[test]
    fn failed_capture_reports_generic_message_only() {
        let (dispatcher, _command, notifier) =
            dispatcher(FakeCommand::failing("wl_display connection refused"));

        let err = dispatcher
            .submit(Rect::new(0, 0, 50, 50))
            .expect("large selection should dispatch")
            .wait()
            .expect_err("capture should fail");
        assert!(matches!(err, CaptureError::CommandFailed { .. }));

        let messages = notifier.messages();
        assert_eq!(messages, vec![CAPTURE_FAILED_MESSAGE.to_string()]);
        assert!(!messages[0].contains("wl_display"));
    }

    #[test]
    fn selections_at_or_below_threshold_never_reach_command() {
        let (dispatcher, command, notifier) = dispatcher(FakeCommand::saving());
        let small = [
            Rect::new(100, 100, 5, 3),
            Rect::new(0, 0, 10, 200),
            Rect::new(0, 0, 200, 10),
            Rect::new(0, 0, 0, 0),
        ];
        for rect in small {
            assert!(dispatcher.submit(rect).is_none(), "{rect:?}");
        }
        assert!(command.requests().is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn min_dimension_is_configurable() {
        let (dispatcher, command, _notifier) = dispatcher(FakeCommand::saving());
        let dispatcher = dispatcher.with_min_dimension(2);
        assert_eq!(dispatcher.min_dimension(), 2);

        let pending = dispatcher
            .submit(Rect::new(100, 100, 5, 3))
            .expect("5x3 exceeds a threshold of 2");
        pending.wait().expect("capture should succeed");
        assert_eq!(command.requests().len(), 1);
    }

    #[test]
    fn dropped_handle_still_completes_and_notifies() {
        let (dispatcher, command, notifier) = dispatcher(FakeCommand::saving());
        drop(dispatcher.submit(Rect::new(0, 0, 40, 40)));

        for _ in 0..200 {
            if !notifier.messages().is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(command.requests().len(), 1);
    }

    struct GatedCommand {
        open: Mutex<bool>,
        signal: Condvar,
    }

    impl CaptureCommand for GatedCommand {
        fn capture_region(&self, _request: CaptureRequest) -> CaptureResult {
            let mut open = self.open.lock().expect("gate lock");
            while !*open {
                open = self.signal.wait(open).expect("gate wait");
            }
            Ok(PathBuf::from("/tmp/gated.png"))
        }
    }

    #[test]
    fn submit_returns_before_capture_completes() {
        let command = Arc::new(GatedCommand {
            open: Mutex::new(false),
            signal: Condvar::new(),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = CaptureDispatcher::new(command.clone(), notifier.clone());

        let pending = dispatcher
            .submit(Rect::new(0, 0, 40, 40))
            .expect("should dispatch");
        assert!(pending.try_result().is_none());

        *command.open.lock().expect("gate lock") = true;
        command.signal.notify_all();
        assert_eq!(
            pending.wait().expect("capture should succeed"),
            PathBuf::from("/tmp/gated.png")
        );
        assert_eq!(notifier.messages().len(), 1);
    }

    struct PanickingCommand;

    impl CaptureCommand for PanickingCommand {
        fn capture_region(&self, _request: CaptureRequest) -> CaptureResult {
            panic!("native capture crashed");
        }
    }

    #[test]
    fn panicking_command_is_reported_as_failure() {
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = CaptureDispatcher::new(Arc::new(PanickingCommand), notifier.clone());

        let err = dispatcher
            .submit(Rect::new(0, 0, 40, 40))
            .expect("should dispatch")
            .wait()
            .expect_err("panic should surface as failure");
        assert!(matches!(err, CaptureError::WorkerLost));
        assert_eq!(notifier.messages(), vec![CAPTURE_FAILED_MESSAGE.to_string()]);
    }

    #[test]
    fn capture_notice_formats_both_outcomes() {
        assert_eq!(
            capture_notice(&Ok(PathBuf::from("/tmp/a.png"))),
            "Screenshot saved to:\n/tmp/a.png"
        );
        assert_eq!(
            capture_notice(&Err(CaptureError::WorkerLost)),
            CAPTURE_FAILED_MESSAGE
        );
    }
}

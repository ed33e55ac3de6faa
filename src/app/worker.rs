use std::time::Duration;

use crate::capture::{CaptureResult, PendingCapture};

pub(super) const CAPTURE_RESULT_POLL_INTERVAL: Duration = Duration::from_millis(24);

/// Polls a background capture from the GTK main loop and hands its result to
/// `on_result` on the UI thread.
pub(super) fn watch_pending_capture<H>(pending: PendingCapture, mut on_result: H)
where
    H: FnMut(CaptureResult) + 'static,
{
    gtk4::glib::timeout_add_local(CAPTURE_RESULT_POLL_INTERVAL, move || {
        match pending.try_result() {
            Some(result) => {
                on_result(result);
                gtk4::glib::ControlFlow::Break
            }
            None => gtk4::glib::ControlFlow::Continue,
        }
    });
}

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub(super) struct ShutdownSignal {
    closing: AtomicBool,
}

impl ShutdownSignal {
    /// Marks the app as shutting down. Returns `true` only for the first call.
    pub(super) fn begin(&self) -> bool {
        !self.closing.swap(true, Ordering::SeqCst)
    }

    pub(super) fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }
}

/// GTK only sees argv[0]; app-specific flags would fail its option parsing.
pub(super) fn gtk_launch_args() -> Vec<String> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "peek".to_string());
    vec![program]
}

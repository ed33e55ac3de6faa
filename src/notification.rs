/// User-facing notice sink. Implementations must tolerate being called from
/// capture worker threads.
pub trait Notifier: Send + Sync {
    fn notify(&self, body: &str);
}

/// Desktop notifications through the session notification daemon.
#[derive(Debug, Clone, Copy)]
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, body: &str) {
        if !self.enabled {
            tracing::debug!(body, "desktop notifications disabled; skipping");
            return;
        }
        send(body);
    }
}

pub fn send(body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname("Peek")
        .summary("Peek")
        .body(&body)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}

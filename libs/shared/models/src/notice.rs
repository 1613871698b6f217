use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing outcome of a dispatched action. The engine emits these where
/// a UI would raise a toast; whoever owns the receiver decides presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Option<UnboundedSender<Notice>>,
}

impl Notifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Notifier that discards everything. Handy for tests and headless runs.
    pub fn sink() -> Self {
        Self { tx: None }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Info, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, message.into());
    }

    fn emit(&self, level: NoticeLevel, message: String) {
        debug!(?level, %message, "notice");
        if let Some(tx) = &self.tx {
            // A dropped receiver just means nobody is listening anymore.
            let _ = tx.send(Notice { level, message });
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::sink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emitted_notices_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("created");
        notifier.error("boom");
        assert_eq!(
            rx.recv().await,
            Some(Notice { level: NoticeLevel::Success, message: "created".to_string() })
        );
        assert_eq!(rx.recv().await.unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn sink_swallows_without_panicking() {
        Notifier::sink().warning("nobody home");
    }
}

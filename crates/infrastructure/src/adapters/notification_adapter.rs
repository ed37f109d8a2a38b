//! Notification adapters
//!
//! [`ChannelNotifier`] forwards notices to the presentation shell over a
//! channel. [`LogNotifier`] writes them to the log, for headless hosts.

use application::ports::{Notice, NoticeLevel, NotificationPort};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Forwards notices to a receiver owned by the presentation shell
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end the shell reads from
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationPort for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.sender.send(notice) {
            debug!(message = %e.0.message, "Notice dropped, shell is gone");
        }
    }
}

/// Writes notices to the log at a level matching their severity
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationPort for LogNotifier {
    fn notify(&self, notice: Notice) {
        let field = notice.field;
        match notice.level {
            NoticeLevel::Info => info!(?field, "{}", notice.message),
            NoticeLevel::Warning => warn!(?field, "{}", notice.message),
            NoticeLevel::Error => error!(?field, "{}", notice.message),
        }
    }
}

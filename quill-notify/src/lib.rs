//! Fire-and-forget email notifications.
//!
//! Handlers hold an `Arc<dyn Notifier>` and call [`Notifier::enqueue`], which
//! never waits on the network. A [`MailQueue`] hands notifications over a
//! bounded channel to a single background worker that sends each one exactly
//! once through a [`Mailer`] and logs failures. There is no retry and no
//! dead-letter store.
//!
//! ```ignore
//! let (queue, worker) = MailQueue::start(Arc::new(LogMailer), 64);
//! queue.enqueue(Notification::new("Visitor comment", text, from, to))?;
//! // ... on shutdown, deliver what is still queued:
//! worker.shutdown().await;
//! ```

mod error;
mod mailer;
mod queue;

pub use error::DispatchError;
pub use mailer::{build_message, mailer_from_settings, LogMailer, Mailer, MemoryMailer, SmtpMailer};
pub use queue::{MailInbox, MailQueue, MailWorker};

/// One email to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

impl Notification {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        to: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to,
        }
    }
}

/// Schedules a notification for delivery without waiting for it.
///
/// An `Ok` only means the notification was accepted; delivery problems
/// surface in the log, never to the caller.
pub trait Notifier: Send + Sync {
    fn enqueue(&self, notification: Notification) -> Result<(), DispatchError>;
}

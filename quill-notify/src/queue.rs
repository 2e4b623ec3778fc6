use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::DispatchError;
use crate::mailer::Mailer;
use crate::{Notification, Notifier};

/// Sending half of the mail queue. Cheap to clone; every clone feeds the
/// same worker.
#[derive(Clone)]
pub struct MailQueue {
    tx: mpsc::Sender<Notification>,
}

/// Receiving half, turned into a running worker by [`MailInbox::spawn`].
pub struct MailInbox {
    rx: mpsc::Receiver<Notification>,
}

impl MailQueue {
    /// A queue holding at most `capacity` undelivered notifications.
    pub fn new(capacity: usize) -> (MailQueue, MailInbox) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (MailQueue { tx }, MailInbox { rx })
    }

    /// Create a queue and start its worker in one step.
    pub fn start(mailer: Arc<dyn Mailer>, capacity: usize) -> (MailQueue, MailWorker) {
        let (queue, inbox) = Self::new(capacity);
        (queue, inbox.spawn(mailer))
    }
}

impl Notifier for MailQueue {
    fn enqueue(&self, notification: Notification) -> Result<(), DispatchError> {
        self.tx.try_send(notification).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => DispatchError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })?;
        tracing::debug!("notification queued");
        Ok(())
    }
}

impl MailInbox {
    /// Start delivering on a background task.
    pub fn spawn(self, mailer: Arc<dyn Mailer>) -> MailWorker {
        let token = CancellationToken::new();
        let handle = tokio::spawn(run(self.rx, mailer, token.clone()));
        MailWorker { token, handle }
    }
}

/// Handle to the delivery task.
pub struct MailWorker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl MailWorker {
    /// Stop accepting notifications, deliver everything already queued,
    /// then wait for the worker to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(err) = self.handle.await {
            tracing::error!(error = %err, "mail worker panicked");
        }
    }
}

async fn run(
    mut rx: mpsc::Receiver<Notification>,
    mailer: Arc<dyn Mailer>,
    token: CancellationToken,
) {
    tracing::debug!("mail worker started");
    loop {
        tokio::select! {
            next = rx.recv() => match next {
                Some(notification) => deliver(mailer.as_ref(), notification).await,
                None => break,
            },
            _ = token.cancelled() => {
                rx.close();
                let mut drained = 0usize;
                while let Some(notification) = rx.recv().await {
                    deliver(mailer.as_ref(), notification).await;
                    drained += 1;
                }
                tracing::info!(drained, "mail worker draining on shutdown");
                break;
            }
        }
    }
    tracing::debug!("mail worker stopped");
}

/// One attempt; failures are logged and the notification is dropped.
async fn deliver(mailer: &dyn Mailer, notification: Notification) {
    match mailer.send(&notification).await {
        Ok(()) => tracing::info!(
            subject = %notification.subject,
            recipients = notification.to.len(),
            "mail sent"
        ),
        Err(err) => tracing::error!(
            error = %err,
            subject = %notification.subject,
            "mail delivery failed"
        ),
    }
}

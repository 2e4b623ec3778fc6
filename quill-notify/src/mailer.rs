use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use quill_core::{MailSettings, MailTransport, SmtpSettings};
use tokio::sync::Mutex;

use crate::error::DispatchError;
use crate::Notification;

/// Delivers one notification. Called only from the queue worker.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, notification: &Notification) -> Result<(), DispatchError>;
}

/// Build the transport selected by `quill.mail.transport`.
pub fn mailer_from_settings(settings: &MailSettings) -> Result<Arc<dyn Mailer>, DispatchError> {
    match (settings.transport, &settings.smtp) {
        (MailTransport::Smtp, Some(smtp)) => Ok(Arc::new(SmtpMailer::new(smtp)?)),
        (MailTransport::Smtp, None) => Err(DispatchError::Transport(
            "smtp transport selected without quill.mail.smtp settings".into(),
        )),
        (MailTransport::Log, _) => Ok(Arc::new(LogMailer)),
    }
}

/// Sends plain-text mail through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, DispatchError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?.port(settings.port);
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

/// Assemble the plain-text message for a notification.
pub fn build_message(notification: &Notification) -> Result<Message, DispatchError> {
    let from: Mailbox = notification.from.parse()?;
    let mut builder = Message::builder()
        .from(from)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN);
    for to in &notification.to {
        let to: Mailbox = to.parse()?;
        builder = builder.to(to);
    }
    Ok(builder.body(notification.body.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), DispatchError> {
        let message = build_message(notification)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Writes each notification to the log instead of sending it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, notification: &Notification) -> Result<(), DispatchError> {
        tracing::info!(
            from = %notification.from,
            to = ?notification.to,
            subject = %notification.subject,
            body = %notification.body,
            "mail (log transport)"
        );
        Ok(())
    }
}

/// Keeps delivered notifications in memory.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in delivery order.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, notification: &Notification) -> Result<(), DispatchError> {
        self.sent.lock().await.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(from: &str, to: &[&str]) -> Notification {
        Notification::new(
            "Visitor comment",
            "More posts about SQLite please",
            from,
            to.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn message_carries_subject_and_recipients() {
        let message =
            build_message(&notification("blog@example.com", &["a@example.com", "b@example.com"]))
                .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Visitor comment"));
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("More posts about SQLite please"));
    }

    #[test]
    fn bad_sender_is_rejected() {
        let err = build_message(&notification("not an address", &["a@example.com"])).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidAddress(_)));
    }

    #[test]
    fn smtp_without_settings_is_an_error() {
        let settings = MailSettings {
            transport: MailTransport::Smtp,
            from: "blog@example.com".into(),
            to: vec!["admin@example.com".into()],
            queue_capacity: 8,
            smtp: None,
        };
        assert!(mailer_from_settings(&settings).is_err());
    }
}

use crate::domain::{AdminRecipients, EmailAddress, Notification};
use crate::email::Email;
use crate::notifications::{error_chain_fmt, ContentBuilder, EmailContent};
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum NotificationError {
    #[error(transparent)]
    TransportFailure(#[from] anyhow::Error),
}

impl std::fmt::Debug for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A message the transport accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub recipient: EmailAddress,
    pub subject: String,
}

/// Best-effort delivery of admin notifications.
///
/// No operation panics or bubbles up a transport failure on its own: every
/// failure is logged once and handed back as a value the caller may ignore.
pub struct NotificationDispatcher {
    email_client: Arc<dyn Email>,
    admins: AdminRecipients,
    content: ContentBuilder,
}

impl NotificationDispatcher {
    pub fn new(
        email_client: Arc<dyn Email>,
        admins: AdminRecipients,
        content: ContentBuilder,
    ) -> Self {
        Self {
            email_client,
            admins,
            content,
        }
    }

    /// Sends `notification` to every admin, in list order, one at a time.
    ///
    /// A failed send does not stop the remaining ones. The result holds one
    /// entry per admin, in the same order.
    #[tracing::instrument(
        name = "Notifying admins",
        skip(self, notification),
        fields(
            notification_id = %Uuid::new_v4(),
            notification_kind = %notification.kind(),
            recipients = self.admins.len()
        )
    )]
    pub async fn notify_admins(
        &self,
        notification: &Notification,
    ) -> Vec<Result<Sent, NotificationError>> {
        let content = self.content.render(notification, Utc::now());
        let mut outcomes = Vec::with_capacity(self.admins.len());
        for admin in self.admins.iter() {
            outcomes.push(self.deliver(admin, &content, "notify_admins").await);
        }
        outcomes
    }

    #[tracing::instrument(
        name = "Sending admin welcome email",
        skip(self, admin_email, admin_name, temp_password),
        fields(notification_id = %Uuid::new_v4(), admin_email = %admin_email)
    )]
    pub async fn send_admin_welcome(
        &self,
        admin_email: &EmailAddress,
        admin_name: &str,
        temp_password: &str,
    ) -> Result<Sent, NotificationError> {
        let content = self
            .content
            .admin_welcome(admin_email.as_ref(), admin_name, temp_password);
        self.deliver(admin_email, &content, "send_admin_welcome")
            .await
    }

    /// The one hour expiry stated in the email is enforced by whatever
    /// validates the token, not here.
    #[tracing::instrument(
        name = "Sending admin password reset email",
        skip(self, admin_email, reset_token),
        fields(notification_id = %Uuid::new_v4(), admin_email = %admin_email)
    )]
    pub async fn send_password_reset(
        &self,
        admin_email: &EmailAddress,
        reset_token: &str,
    ) -> Result<Sent, NotificationError> {
        let content = self.content.password_reset(reset_token);
        self.deliver(admin_email, &content, "send_password_reset")
            .await
    }

    async fn deliver(
        &self,
        recipient: &EmailAddress,
        content: &EmailContent,
        operation: &'static str,
    ) -> Result<Sent, NotificationError> {
        let outcome = self
            .email_client
            .send_email(recipient, &content.subject, &content.html)
            .await
            .with_context(|| format!("Failed to send '{}' to {}", content.subject, recipient));

        match outcome {
            Ok(()) => Ok(Sent {
                recipient: recipient.clone(),
                subject: content.subject.clone(),
            }),
            Err(e) => {
                let error = NotificationError::from(e);
                tracing::error!(
                    error.cause_chain = ?error,
                    error.message = %error,
                    operation,
                    "Failed to send a notification email"
                );
                Err(error)
            }
        }
    }
}

use crate::configuration::EmailClientSettings;
use crate::domain::EmailAddress;
use crate::email::Email;
use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP transport authenticated as the sender account.
///
/// Building the client opens no connection; the first `send_email` does.
pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: EmailAddress,
}

impl SmtpEmailClient {
    pub fn new(transport: AsyncSmtpTransport<Tokio1Executor>, sender: EmailAddress) -> Self {
        Self { transport, sender }
    }

    pub fn from_settings(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender = settings.sender().map_err(anyhow::Error::msg)?;
        let credentials = Credentials::new(
            sender.as_ref().to_string(),
            settings.sender_secret.expose_secret().clone(),
        );

        let builder = if !settings.require_tls {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.smtp_host)
        } else if settings.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
                .context("Failed to create SMTP relay")?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
                .context("Failed to create STARTTLS relay")?
        };
        let transport = builder
            .port(settings.smtp_port)
            .credentials(credentials)
            .timeout(Some(settings.timeout()))
            .build();

        Ok(Self::new(transport, sender))
    }

    fn build_message(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> Result<Message, anyhow::Error> {
        let from: Mailbox = self
            .sender
            .as_ref()
            .parse()
            .context("Invalid sender address")?;
        let to: Mailbox = recipient
            .as_ref()
            .parse()
            .context("Invalid recipient address")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_content.to_string())
            .context("Failed to build email message")
    }
}

#[async_trait]
impl Email for SmtpEmailClient {
    #[tracing::instrument(name = "Sending email via SMTP", skip(self, html_content))]
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> anyhow::Result<()> {
        let message = self.build_message(recipient, subject, html_content)?;
        let response = self
            .transport
            .send(message)
            .await
            .context("SMTP server refused the message")?;
        tracing::debug!(code = %response.code(), "SMTP server accepted the message");
        Ok(())
    }
}

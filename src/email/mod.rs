mod ses_email_client;
mod smtp_email_client;

use crate::domain::EmailAddress;
use async_trait::async_trait;
pub use ses_email_client::SesEmailClient;
pub use smtp_email_client::SmtpEmailClient;

/// Delivers one HTML email from the client's configured sender.
#[async_trait]
pub trait Email: Send + Sync {
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> Result<(), anyhow::Error>;
}

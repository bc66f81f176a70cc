use crate::configuration::{EmailProvider, Settings};
use crate::email::{Email, SesEmailClient, SmtpEmailClient};
use crate::notifications::{ContentBuilder, NotificationDispatcher};
use std::sync::Arc;

/// Builds a dispatcher around the transport selected in `configuration`.
///
/// Nothing here touches the network; bad credentials only show up as
/// failed sends later on.
pub async fn build_dispatcher(
    configuration: &Settings,
) -> Result<NotificationDispatcher, anyhow::Error> {
    let email_client: Arc<dyn Email> = match configuration.email_client.provider {
        EmailProvider::Smtp => Arc::new(SmtpEmailClient::from_settings(
            &configuration.email_client,
        )?),
        EmailProvider::Ses => {
            Arc::new(SesEmailClient::from_settings(&configuration.email_client).await?)
        }
    };
    let admins = configuration
        .notifications
        .admin_recipients()
        .map_err(anyhow::Error::msg)?;
    let content = ContentBuilder::new(
        configuration.application.base_url.clone(),
        configuration.notifications.currency_symbol.clone(),
    );
    Ok(NotificationDispatcher::new(email_client, admins, content))
}

use crate::domain::EmailAddress;

/// The fixed, ordered set of administrators that receive `notify_admins` mail.
///
/// Built once from settings; there is no way to change it afterwards.
#[derive(Debug, Clone)]
pub struct AdminRecipients(Vec<EmailAddress>);

impl AdminRecipients {
    pub fn parse(addresses: Vec<String>) -> Result<AdminRecipients, String> {
        if addresses.is_empty() {
            return Err("At least one admin recipient must be configured.".into());
        }
        let recipients = addresses
            .into_iter()
            .map(EmailAddress::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(recipients))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

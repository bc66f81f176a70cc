mod admin_recipients;
mod email_address;
mod notification;

pub use admin_recipients::AdminRecipients;
pub use email_address::EmailAddress;
pub use notification::{Notification, NotificationKind, PayloadError};

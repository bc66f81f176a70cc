use crate::domain::Notification;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// Renders notification emails. Every interpolated value is HTML-escaped.
#[derive(Debug, Clone)]
pub struct ContentBuilder {
    base_url: String,
    currency_symbol: String,
}

impl ContentBuilder {
    pub fn new(base_url: String, currency_symbol: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            currency_symbol,
        }
    }

    pub fn login_link(&self) -> String {
        format!("{}/pages/admin-login.html", self.base_url)
    }

    pub fn password_reset_link(&self, reset_token: &str) -> String {
        format!(
            "{}/pages/admin-reset-password.html?token={}",
            self.base_url,
            urlencoding::encode(reset_token)
        )
    }

    /// Never fails: `Notification::Other` is rendered as a dump of its data.
    pub fn render(&self, notification: &Notification, now: DateTime<Utc>) -> EmailContent {
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        match notification {
            Notification::NewUserRegistration { name, email } => EmailContent {
                subject: format!("New User Registration - {}", name),
                html: format!(
                    "<h2>New User Registration</h2>\
                     <p><strong>Name:</strong> {}</p>\
                     <p><strong>Email:</strong> {}</p>\
                     <p><strong>Registered at:</strong> {}</p>",
                    encode_text(name),
                    encode_text(email),
                    timestamp
                ),
            },
            Notification::MentorApplication {
                name,
                email,
                qualification,
                experience,
            } => EmailContent {
                subject: format!("New Mentor Application - {}", name),
                html: format!(
                    "<h2>New Mentor Application</h2>\
                     <p><strong>Name:</strong> {}</p>\
                     <p><strong>Email:</strong> {}</p>\
                     <p><strong>Qualification:</strong> {}</p>\
                     <p><strong>Experience:</strong> {}</p>\
                     <p><strong>Applied at:</strong> {}</p>\
                     <p>Please review the application in the admin panel.</p>",
                    encode_text(name),
                    encode_text(email),
                    encode_text(qualification),
                    encode_text(experience),
                    timestamp
                ),
            },
            Notification::PaymentReceived {
                amount,
                user_name,
                service,
                payment_id,
            } => {
                let amount = self.money(*amount);
                EmailContent {
                    subject: format!("Payment Received - {}", amount),
                    html: format!(
                        "<h2>Payment Received</h2>\
                         <p><strong>Amount:</strong> {}</p>\
                         <p><strong>User:</strong> {}</p>\
                         <p><strong>Service:</strong> {}</p>\
                         <p><strong>Payment ID:</strong> {}</p>\
                         <p><strong>Time:</strong> {}</p>",
                        encode_text(&amount),
                        encode_text(user_name),
                        encode_text(service),
                        encode_text(payment_id),
                        timestamp
                    ),
                }
            }
            Notification::SystemError { error, location } => EmailContent {
                subject: format!("System Error Alert - {}", location),
                html: format!(
                    "<h2 style=\"color: #c0392b;\">System Error Alert</h2>\
                     <p><strong>Error:</strong> {}</p>\
                     <p><strong>Location:</strong> {}</p>\
                     <p><strong>Time:</strong> {}</p>",
                    encode_text(error),
                    encode_text(location),
                    timestamp
                ),
            },
            Notification::DailyReport {
                new_users,
                new_mentors,
                revenue,
                active_sessions,
            } => {
                let date = now.format(DATE_FORMAT).to_string();
                EmailContent {
                    subject: format!("Daily Report - {}", date),
                    html: format!(
                        "<h2>Daily Report - {}</h2>\
                         <ul>\
                         <li><strong>New users:</strong> {}</li>\
                         <li><strong>New mentors:</strong> {}</li>\
                         <li><strong>Revenue:</strong> {}</li>\
                         <li><strong>Active sessions:</strong> {}</li>\
                         </ul>",
                        date,
                        new_users,
                        new_mentors,
                        encode_text(&self.money(*revenue)),
                        active_sessions
                    ),
                }
            }
            Notification::Other { data, .. } => EmailContent {
                subject: "Notification".to_string(),
                html: format!("<pre>{}</pre>", encode_text(&data.to_string())),
            },
        }
    }

    pub fn admin_welcome(
        &self,
        admin_email: &str,
        admin_name: &str,
        temp_password: &str,
    ) -> EmailContent {
        let login_link = self.login_link();
        EmailContent {
            subject: "Welcome to the Admin Panel".to_string(),
            html: format!(
                "<h2>Welcome, {}!</h2>\
                 <p>An administrator account has been created for you.</p>\
                 <p><strong>Email:</strong> {}</p>\
                 <p><strong>Temporary password:</strong> {}</p>\
                 <p>Sign in <a href=\"{}\">here</a> and change your password after your first login.</p>",
                encode_text(admin_name),
                encode_text(admin_email),
                encode_text(temp_password),
                encode_double_quoted_attribute(&login_link)
            ),
        }
    }

    pub fn password_reset(&self, reset_token: &str) -> EmailContent {
        let reset_link = self.password_reset_link(reset_token);
        EmailContent {
            subject: "Admin Password Reset Request".to_string(),
            html: format!(
                "<h2>Password Reset</h2>\
                 <p>We received a request to reset your admin password.</p>\
                 <p>Click <a href=\"{}\">here</a> to choose a new password.</p>\
                 <p>This link will expire in 1 hour. If you did not request a reset, ignore this email.</p>",
                encode_double_quoted_attribute(&reset_link)
            ),
        }
    }

    /// Two decimals unless that would round the amount away.
    fn money(&self, amount: f64) -> String {
        let cents = format!("{:.2}", amount);
        if cents.parse::<f64>() == Ok(amount) {
            format!("{}{}", self.currency_symbol, cents)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

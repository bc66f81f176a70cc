use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    NewUserRegistration,
    MentorApplication,
    PaymentReceived,
    SystemError,
    DailyReport,
    Other,
}

impl NotificationKind {
    /// Unrecognized tags map to `Other` rather than failing.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "new_user_registration" => Self::NewUserRegistration,
            "mentor_application" => Self::MentorApplication,
            "payment_received" => Self::PaymentReceived,
            "system_error" => Self::SystemError,
            "daily_report" => Self::DailyReport,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewUserRegistration => "new_user_registration",
            Self::MentorApplication => "mentor_application",
            Self::PaymentReceived => "payment_received",
            Self::SystemError => "system_error",
            Self::DailyReport => "daily_report",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin notification together with the data its template needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    NewUserRegistration {
        name: String,
        email: String,
    },
    MentorApplication {
        name: String,
        email: String,
        qualification: String,
        experience: String,
    },
    PaymentReceived {
        amount: f64,
        user_name: String,
        service: String,
        payment_id: String,
    },
    SystemError {
        error: String,
        location: String,
    },
    DailyReport {
        new_users: u64,
        new_mentors: u64,
        revenue: f64,
        active_sessions: u64,
    },
    Other {
        tag: String,
        data: Value,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid payload for a '{tag}' notification")]
pub struct PayloadError {
    tag: String,
    #[source]
    source: serde_json::Error,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::NewUserRegistration { .. } => NotificationKind::NewUserRegistration,
            Self::MentorApplication { .. } => NotificationKind::MentorApplication,
            Self::PaymentReceived { .. } => NotificationKind::PaymentReceived,
            Self::SystemError { .. } => NotificationKind::SystemError,
            Self::DailyReport { .. } => NotificationKind::DailyReport,
            Self::Other { .. } => NotificationKind::Other,
        }
    }

    /// Builds a notification from a type tag and an untyped JSON record.
    ///
    /// Records use camelCase keys (`userName`, `paymentId`, `newUsers`, ...).
    /// An unknown tag is never an error: the record is kept as-is and
    /// rendered as a plain dump. A known tag whose record lacks a field, or
    /// carries one with the wrong type, is rejected here instead of producing
    /// a half-empty email later.
    pub fn from_tagged(tag: &str, data: Value) -> Result<Notification, PayloadError> {
        let notification = match NotificationKind::from_tag(tag) {
            NotificationKind::NewUserRegistration => {
                let r: Registration = parse(tag, data)?;
                Self::NewUserRegistration {
                    name: r.name,
                    email: r.email,
                }
            }
            NotificationKind::MentorApplication => {
                let r: MentorApplication = parse(tag, data)?;
                Self::MentorApplication {
                    name: r.name,
                    email: r.email,
                    qualification: r.qualification,
                    experience: r.experience,
                }
            }
            NotificationKind::PaymentReceived => {
                let r: Payment = parse(tag, data)?;
                Self::PaymentReceived {
                    amount: r.amount,
                    user_name: r.user_name,
                    service: r.service,
                    payment_id: r.payment_id,
                }
            }
            NotificationKind::SystemError => {
                let r: SystemError = parse(tag, data)?;
                Self::SystemError {
                    error: r.error,
                    location: r.location,
                }
            }
            NotificationKind::DailyReport => {
                let r: DailyReport = parse(tag, data)?;
                Self::DailyReport {
                    new_users: r.new_users,
                    new_mentors: r.new_mentors,
                    revenue: r.revenue,
                    active_sessions: r.active_sessions,
                }
            }
            NotificationKind::Other => Self::Other {
                tag: tag.to_string(),
                data,
            },
        };
        Ok(notification)
    }
}

fn parse<T: DeserializeOwned>(tag: &str, data: Value) -> Result<T, PayloadError> {
    serde_json::from_value(data).map_err(|source| PayloadError {
        tag: tag.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct Registration {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct MentorApplication {
    name: String,
    email: String,
    qualification: String,
    experience: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payment {
    amount: f64,
    user_name: String,
    service: String,
    payment_id: String,
}

#[derive(Deserialize)]
struct SystemError {
    error: String,
    location: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyReport {
    new_users: u64,
    new_mentors: u64,
    revenue: f64,
    active_sessions: u64,
}

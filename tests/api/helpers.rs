use anyhow::anyhow;
use async_trait::async_trait;
use notifier::configuration::get_configuration;
use notifier::domain::{AdminRecipients, EmailAddress};
use notifier::email::Email;
use notifier::notifications::{ContentBuilder, NotificationDispatcher};
use notifier::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to install the test subscriber.");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to install the test subscriber.");
    }
});

pub const ADMINS: [&str; 3] = [
    "first.admin@example.com",
    "second.admin@example.com",
    "third.admin@example.com",
];

pub const BASE_URL: &str = "https://mentorhub.test";

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html: String,
}

/// Records every attempted send; recipients in `failing` are rejected.
#[derive(Default)]
pub struct MockEmailClient {
    pub sent_emails: Mutex<Vec<SentEmail>>,
    pub attempts: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl MockEmailClient {
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            failing: recipients.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Email for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
    ) -> Result<(), anyhow::Error> {
        self.attempts
            .lock()
            .unwrap()
            .push(recipient.as_ref().to_string());
        if self.failing.contains(recipient.as_ref()) {
            return Err(anyhow!("550 mailbox unavailable"));
        }
        self.sent_emails.lock().unwrap().push(SentEmail {
            recipient: recipient.as_ref().to_string(),
            subject: subject.to_string(),
            html: html_content.to_string(),
        });
        Ok(())
    }
}

/// Counts ERROR events seen on the current thread.
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub struct TestApp {
    pub dispatcher: NotificationDispatcher,
    pub email_client: Arc<MockEmailClient>,
}

pub struct Links {
    pub html: Vec<String>,
}

impl TestApp {
    /// Returns the guard that keeps `counter` installed for this thread.
    pub fn count_errors(&self) -> (ErrorCounter, tracing::subscriber::DefaultGuard) {
        let counter = ErrorCounter::default();
        let subscriber = Registry::default().with(counter.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (counter, guard)
    }

    pub fn get_links(&self, email: &SentEmail) -> Links {
        let html = linkify::LinkFinder::new()
            .links(&email.html)
            .filter(|l| *l.kind() == linkify::LinkKind::Url)
            .map(|l| l.as_str().to_owned())
            .collect();
        Links { html }
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(MockEmailClient::default())
}

pub fn spawn_app_with(email_client: MockEmailClient) -> TestApp {
    Lazy::force(&TRACING);

    let email_client = Arc::new(email_client);
    let admins = AdminRecipients::parse(ADMINS.iter().map(|a| a.to_string()).collect())
        .expect("Invalid admin recipients.");
    let content = ContentBuilder::new(BASE_URL.into(), "$".into());
    let dispatcher = NotificationDispatcher::new(email_client.clone(), admins, content);
    TestApp {
        dispatcher,
        email_client,
    }
}

pub fn email(address: &str) -> EmailAddress {
    EmailAddress::parse(address.to_string()).expect("Invalid email address.")
}

pub fn shipped_configuration() -> notifier::configuration::Settings {
    get_configuration().expect("Failed to read configuration.")
}

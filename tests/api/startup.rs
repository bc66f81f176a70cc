use crate::helpers::shipped_configuration;
use claim::assert_ok;
use notifier::configuration::EmailProvider;
use notifier::startup::build_dispatcher;
use std::time::Duration;

#[tokio::test]
async fn the_shipped_configuration_builds_an_smtp_dispatcher() {
    // arrange
    let configuration = shipped_configuration();
    assert_eq!(configuration.email_client.provider, EmailProvider::Smtp);

    // act
    let dispatcher = build_dispatcher(&configuration).await;

    // assert
    assert_ok!(dispatcher);
}

#[tokio::test]
async fn an_invalid_admin_address_fails_startup() {
    // arrange
    let mut configuration = shipped_configuration();
    configuration.notifications.admin_recipients = vec!["not-an-email".into()];

    // act
    let dispatcher = build_dispatcher(&configuration).await;

    // assert
    assert!(dispatcher.is_err());
}

#[tokio::test]
async fn an_ses_dispatcher_is_built_without_contacting_aws() {
    // arrange
    std::env::set_var("AWS_REGION", "eu-west-1");
    std::env::set_var("AWS_ACCESS_KEY_ID", "test-access-key-id");
    std::env::set_var("AWS_SECRET_ACCESS_KEY", "test-secret-access-key");
    let mut configuration = shipped_configuration();
    configuration.email_client.provider = EmailProvider::Ses;

    // act
    let dispatcher =
        tokio::time::timeout(Duration::from_secs(5), build_dispatcher(&configuration)).await;

    // assert
    let dispatcher = assert_ok!(dispatcher);
    assert_ok!(dispatcher);
}

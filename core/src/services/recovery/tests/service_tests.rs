//! Recovery service behavior tests

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::account::Account;
use crate::domain::value_objects::identifier::{Channel, Identifier};
use crate::errors::{AuthError, DomainError};
use crate::repositories::MockAccountRepository;
use crate::services::password;
use crate::services::recovery::{ChallengePurpose, RecoveryConfig, RecoveryService};

use super::mocks::{MockMailGateway, MockSmsGateway, SentMail};

type TestService = RecoveryService<MockAccountRepository, MockSmsGateway, MockMailGateway>;

struct Fixture {
    service: TestService,
    accounts: Arc<MockAccountRepository>,
    sms: Arc<MockSmsGateway>,
    mail: Arc<MockMailGateway>,
}

fn fixture() -> Fixture {
    let accounts = Arc::new(MockAccountRepository::new());
    let sms = MockSmsGateway::new();
    let mail = MockMailGateway::new();
    let service = RecoveryService::new(
        accounts.clone(),
        sms.clone(),
        mail.clone(),
        RecoveryConfig::default(),
    );
    Fixture {
        service,
        accounts,
        sms,
        mail,
    }
}

async fn seed_account(fixture: &Fixture, email: &str, phone: Option<&str>) -> Account {
    let account = Account::new(
        "Ada".to_string(),
        "Lovelace".to_string(),
        email.to_string(),
        phone.map(String::from),
        password::hash_password("OldPass1!").unwrap(),
    );
    fixture.accounts.insert(account.clone()).await;
    account
}

fn email_id(email: &str) -> Identifier {
    Identifier::Email(email.to_string())
}

fn phone_id(phone: &str) -> Identifier {
    Identifier::Phone(phone.to_string())
}

#[tokio::test]
async fn request_recovery_stores_code_with_configured_ttl() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    let before = Utc::now();
    let issued = fx
        .service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();

    assert_eq!(issued.channel, Channel::Phone);
    assert!(issued.expires_at > before + Duration::minutes(14));
    assert!(issued.expires_at <= Utc::now() + Duration::minutes(15));

    let stored = fx.accounts.get(account.id).await.unwrap();
    assert!(stored.recovery_code.is_some());
    assert_eq!(stored.recovery_expires_at, Some(issued.expires_at));
    assert_eq!(fx.sms.sent_count(), 1);
    assert_eq!(stored.recovery_code, fx.sms.last_code());
}

#[tokio::test]
async fn request_recovery_unknown_identifier_sends_nothing() {
    let fx = fixture();

    let err = fx
        .service
        .request_recovery(
            &email_id("unknown@example.com"),
            ChallengePurpose::PasswordReset,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
    assert_eq!(fx.mail.sent_count(), 0);
    assert_eq!(fx.sms.sent_count(), 0);
}

#[tokio::test]
async fn email_channel_issues_opaque_token_as_reset_link() {
    let fx = fixture();
    seed_account(&fx, "a@example.com", None).await;

    fx.service
        .request_recovery(&email_id("a@example.com"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();

    let sent = fx.mail.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        SentMail::ResetLink { email, token } => {
            assert_eq!(email, "a@example.com");
            assert!(uuid::Uuid::parse_str(token).is_ok());
        }
        other => panic!("unexpected mail: {:?}", other),
    }
}

#[tokio::test]
async fn completed_recovery_changes_password_and_clears_code() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();

    fx.service
        .complete_recovery(
            &phone_id("+14155552671"),
            &code,
            "NewPass1!",
            Some("NewPass1!"),
        )
        .await
        .unwrap();

    let stored = fx.accounts.get(account.id).await.unwrap();
    assert!(stored.recovery_code.is_none());
    assert!(stored.recovery_expires_at.is_none());
    assert!(password::verify_password("NewPass1!", &stored.password_hash).unwrap());
    assert!(!password::verify_password("OldPass1!", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn consumed_code_is_never_accepted_twice() {
    let fx = fixture();
    seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();

    fx.service
        .complete_recovery(&phone_id("+14155552671"), &code, "NewPass1!", None)
        .await
        .unwrap();

    let err = fx
        .service
        .complete_recovery(&phone_id("+14155552671"), &code, "OtherPass1!", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::NoActiveRequest)));
}

#[tokio::test]
async fn expired_code_is_rejected_even_when_it_matches() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();

    // Sixteen minutes pass
    fx.accounts
        .force_expiry(account.id, Utc::now() - Duration::minutes(1))
        .await;

    let err = fx
        .service
        .complete_recovery(&phone_id("+14155552671"), &code, "NewPass1!", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::CodeExpired)));
}

#[tokio::test]
async fn second_request_invalidates_first_code() {
    let fx = fixture();
    seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let first_code = fx.sms.last_code().unwrap();

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let second_code = fx.sms.last_code().unwrap();
    assert_ne!(first_code, second_code);

    let err = fx
        .service
        .complete_recovery(&phone_id("+14155552671"), &first_code, "NewPass1!", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCode)));

    // The replacement code still works
    fx.service
        .complete_recovery(&phone_id("+14155552671"), &second_code, "NewPass1!", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn wrong_code_leaves_challenge_active() {
    let fx = fixture();
    seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let err = fx
        .service
        .complete_recovery(&phone_id("+14155552671"), wrong, "NewPass1!", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCode)));

    fx.service
        .complete_recovery(&phone_id("+14155552671"), &code, "NewPass1!", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn mismatched_confirmation_fails_after_code_validation() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();

    let err = fx
        .service
        .complete_recovery(
            &phone_id("+14155552671"),
            &code,
            "NewPass1!",
            Some("Different1!"),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::ConfirmationMismatch)
    ));

    // The code is not consumed by the failed attempt
    let stored = fx.accounts.get(account.id).await.unwrap();
    assert!(stored.recovery_code.is_some());
}

#[tokio::test]
async fn missing_challenge_is_reported_before_code_comparison() {
    let fx = fixture();
    seed_account(&fx, "a@example.com", None).await;

    let err = fx
        .service
        .complete_recovery(&email_id("a@example.com"), "123456", "NewPass1!", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::NoActiveRequest)));
}

#[tokio::test]
async fn dispatch_failure_keeps_stored_challenge() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;
    fx.sms.set_fail(true);

    let err = fx
        .service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::PasswordReset)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::NotificationFailure)
    ));

    // Best effort: the persisted challenge survives the failed dispatch
    let stored = fx.accounts.get(account.id).await.unwrap();
    assert!(stored.recovery_code.is_some());
    assert!(stored.recovery_expires_at.is_some());
}

#[tokio::test]
async fn verify_channel_sets_flag_and_consumes_code() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::ChannelVerification)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();

    let confirmation = fx
        .service
        .verify_channel(&phone_id("+14155552671"), &code)
        .await
        .unwrap();

    assert_eq!(confirmation.channel, Channel::Phone);
    assert!(!confirmation.fully_verified);
    assert!(confirmation.investor_id.is_none());

    let stored = fx.accounts.get(account.id).await.unwrap();
    assert!(stored.phone_verified);
    assert!(!stored.email_verified);
    assert!(stored.recovery_code.is_none());

    let err = fx
        .service
        .verify_channel(&phone_id("+14155552671"), &code)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::NoActiveRequest)));
}

#[tokio::test]
async fn final_verification_assigns_investor_id_and_sends_welcome() {
    let fx = fixture();
    let account = seed_account(&fx, "a@example.com", Some("+14155552671")).await;

    // Verify the phone channel first
    fx.service
        .request_recovery(&phone_id("+14155552671"), ChallengePurpose::ChannelVerification)
        .await
        .unwrap();
    let code = fx.sms.last_code().unwrap();
    fx.service
        .verify_channel(&phone_id("+14155552671"), &code)
        .await
        .unwrap();
    assert_eq!(fx.mail.welcome_count(), 0);

    // Email verification completes onboarding
    fx.service
        .request_recovery(&email_id("a@example.com"), ChallengePurpose::ChannelVerification)
        .await
        .unwrap();
    let token = fx.mail.last_token().unwrap();
    let confirmation = fx
        .service
        .verify_channel(&email_id("a@example.com"), &token)
        .await
        .unwrap();

    assert!(confirmation.fully_verified);
    let investor_id = confirmation.investor_id.unwrap();
    assert!(investor_id.starts_with("RO-"));
    assert_eq!(fx.mail.welcome_count(), 1);

    let stored = fx.accounts.get(account.id).await.unwrap();
    assert_eq!(stored.investor_id, Some(investor_id));
}

#[tokio::test]
async fn email_only_account_completes_onboarding_in_one_step() {
    let fx = fixture();
    seed_account(&fx, "solo@example.com", None).await;

    fx.service
        .request_recovery(&email_id("solo@example.com"), ChallengePurpose::ChannelVerification)
        .await
        .unwrap();
    let token = fx.mail.last_token().unwrap();

    let confirmation = fx
        .service
        .verify_channel(&email_id("solo@example.com"), &token)
        .await
        .unwrap();
    assert!(confirmation.fully_verified);
    assert!(confirmation.investor_id.is_some());
}

//! End-to-end handler tests over the mock repository and gateways.
//!
//! The signup/verify/login and forgot/reset flows are driven through the
//! actix service exactly as a client would, with issued codes read back from
//! the in-memory store.

use actix_web::{http::StatusCode, test, web, App};
use std::sync::Arc;
use uuid::Uuid;

use ro_api::routes;
use ro_api::state::AppState;
use ro_core::repositories::{AccountRepository, MockAccountRepository};
use ro_core::services::auth::AuthService;
use ro_core::services::recovery::{RecoveryConfig, RecoveryService};
use ro_core::services::token::{TokenConfig, TokenService};
use ro_infra::mail::MockMailClient;
use ro_infra::sms::MockSmsClient;

type TestState = AppState<MockAccountRepository, MockSmsClient, MockMailClient>;

fn build_state() -> (web::Data<TestState>, Arc<MockAccountRepository>) {
    let accounts = Arc::new(MockAccountRepository::new());
    let sms = Arc::new(MockSmsClient::new());
    let mail = Arc::new(MockMailClient::new());

    let recovery_service = Arc::new(RecoveryService::new(
        accounts.clone(),
        sms,
        mail,
        RecoveryConfig::default(),
    ));
    let token_service = Arc::new(TokenService::new(TokenConfig {
        jwt_secret: "test-secret".to_string(),
        ..TokenConfig::default()
    }));
    let auth_service = Arc::new(AuthService::new(
        accounts.clone(),
        recovery_service.clone(),
        token_service,
    ));

    (
        web::Data::new(AppState::new(auth_service, recovery_service)),
        accounts,
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new().app_data($state.clone()).configure(
                routes::auth::configure::<MockAccountRepository, MockSmsClient, MockMailClient>,
            ),
        )
        .await
    };
}

fn signup_body(email: &str, phone: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "phone_number": phone,
        "password": "StrongPass1!",
        "confirm_password": "StrongPass1!"
    })
}

async fn stored_code(accounts: &MockAccountRepository, account_id: Uuid) -> String {
    accounts
        .get(account_id)
        .await
        .expect("account exists")
        .recovery_code
        .expect("challenge stored")
}

#[actix_web::test]
async fn signup_verify_login_flow() {
    let (state, accounts) = build_state();
    let app = test_app!(state);

    // Signup
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("ada@example.com", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let account_id: Uuid = serde_json::from_value(body["account_id"].clone()).unwrap();

    // Login before verification is forbidden
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "identifier": "ada@example.com",
            "password": "StrongPass1!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Verify the email channel with the stored token
    let token = stored_code(&accounts, account_id).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify")
        .set_json(serde_json::json!({
            "identifier": "ada@example.com",
            "code": token
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["investor_id"].as_str().unwrap().starts_with("RO-"));

    // Login now succeeds and returns a bearer grant
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "identifier": "ada@example.com",
            "password": "StrongPass1!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].as_str().unwrap().contains('.'));

    // Wrong password is unauthorized
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "identifier": "ada@example.com",
            "password": "WrongPass1!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn forgot_and_reset_password_flow() {
    let (state, accounts) = build_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("ada@example.com", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let account_id: Uuid = serde_json::from_value(body["account_id"].clone()).unwrap();

    // Request recovery, replacing the signup verification challenge
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(serde_json::json!({ "identifier": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Complete recovery with the stored token
    let token = stored_code(&accounts, account_id).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "identifier": "ada@example.com",
            "code": token,
            "new_password": "FreshPass1!",
            "confirm_password": "FreshPass1!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The consumed token is rejected on replay
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "identifier": "ada@example.com",
            "code": token,
            "new_password": "OtherPass1!",
            "confirm_password": "OtherPass1!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn recovery_for_unknown_identifier_is_not_found() {
    let (state, _accounts) = build_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(serde_json::json!({ "identifier": "unknown@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "account_not_found");
}

#[actix_web::test]
async fn signup_with_mismatched_passwords_is_rejected() {
    let (state, accounts) = build_state();
    let app = test_app!(state);

    let mut body = signup_body("ada@example.com", None);
    body["confirm_password"] = serde_json::json!("Different1!");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!accounts.email_taken("ada@example.com").await.unwrap());
}

#[actix_web::test]
async fn duplicate_signup_conflicts() {
    let (state, _accounts) = build_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("ada@example.com", None))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("ada@example.com", None))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );
}

use std::sync::atomic::Ordering;

use chrono::Duration;

use autopm_login::domain::presentation::LoginView;
use autopm_login::error::LinkServiceError;
use autopm_login::usecase::login::{LoginInput, LoginUseCase};
use autopm_login::usecase::otc::{IssueOtcUseCase, RandomCodeGenerator};

use crate::helpers::{FixedCodeGenerator, MockAuthenticator, MockOtcRepo, test_identity};

fn input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_show_link_instruction_for_valid_credentials() {
    let user = test_identity();
    let repo = MockOtcRepo::empty();
    let codes_handle = repo.codes_handle();

    let uc = LoginUseCase {
        authenticator: MockAuthenticator::new(vec![("a@b.com", "pw1", user.clone())]),
        issuer: IssueOtcUseCase {
            otc_codes: repo,
            codes: FixedCodeGenerator("A1B2C3"),
        },
    };

    let view = uc.execute(input("a@b.com", "pw1")).await.unwrap();

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "expected exactly one binding persisted");
    let binding = &codes[0];
    assert_eq!(binding.code, "A1B2C3");
    assert_eq!(binding.user_id, user.user_id);
    assert_eq!(binding.expires_at - binding.created_at, Duration::seconds(600));

    match view {
        LoginView::ShowingCode {
            code,
            instruction,
            expires_at,
            ..
        } => {
            assert_eq!(code, "A1B2C3");
            assert_eq!(instruction, "/link A1B2C3");
            assert_eq!(expires_at, binding.expires_at);
        }
        LoginView::AwaitingLogin => panic!("expected ShowingCode"),
    }
}

#[tokio::test]
async fn should_trim_email_before_sign_in() {
    let uc = LoginUseCase {
        authenticator: MockAuthenticator::new(vec![("a@b.com", "pw1", test_identity())]),
        issuer: IssueOtcUseCase {
            otc_codes: MockOtcRepo::empty(),
            codes: RandomCodeGenerator,
        },
    };

    let view = uc.execute(input("  a@b.com ", "pw1")).await.unwrap();
    assert!(view.code().is_some());
}

#[tokio::test]
async fn should_not_write_binding_for_invalid_credentials() {
    let repo = MockOtcRepo::empty();
    let codes_handle = repo.codes_handle();

    let uc = LoginUseCase {
        authenticator: MockAuthenticator::new(vec![("a@b.com", "pw1", test_identity())]),
        issuer: IssueOtcUseCase {
            otc_codes: repo,
            codes: RandomCodeGenerator,
        },
    };

    let result = uc.execute(input("a@b.com", "wrong")).await;

    match result {
        Err(LinkServiceError::InvalidCredentials(message)) => {
            assert_eq!(message, "Invalid login credentials");
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    assert!(
        codes_handle.lock().unwrap().is_empty(),
        "no binding may exist for a failed login"
    );
}

#[tokio::test]
async fn should_not_write_binding_when_provider_unavailable() {
    let repo = MockOtcRepo::empty();
    let codes_handle = repo.codes_handle();
    let authenticator = MockAuthenticator::unavailable();
    let calls = std::sync::Arc::clone(&authenticator.sign_in_calls);

    let uc = LoginUseCase {
        authenticator,
        issuer: IssueOtcUseCase {
            otc_codes: repo,
            codes: RandomCodeGenerator,
        },
    };

    let result = uc.execute(input("a@b.com", "pw1")).await;

    assert!(
        matches!(result, Err(LinkServiceError::AuthenticatorUnavailable(_))),
        "expected AuthenticatorUnavailable, got {result:?}"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1, "no retry on failure");
    assert!(codes_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_persistence_error_and_show_no_code_on_store_outage() {
    let uc = LoginUseCase {
        authenticator: MockAuthenticator::new(vec![("a@b.com", "pw1", test_identity())]),
        issuer: IssueOtcUseCase {
            otc_codes: MockOtcRepo::failing(),
            codes: FixedCodeGenerator("A1B2C3"),
        },
    };

    let result = uc.execute(input("a@b.com", "pw1")).await;

    assert!(
        matches!(result, Err(LinkServiceError::OtcPersistenceFailed(_))),
        "expected OtcPersistenceFailed, got {result:?}"
    );
}

#[tokio::test]
async fn should_issue_new_binding_per_login() {
    let repo = MockOtcRepo::empty();
    let codes_handle = repo.codes_handle();
    let user = test_identity();

    let uc = LoginUseCase {
        authenticator: MockAuthenticator::new(vec![("a@b.com", "pw1", user.clone())]),
        issuer: IssueOtcUseCase {
            otc_codes: repo,
            codes: RandomCodeGenerator,
        },
    };

    uc.execute(input("a@b.com", "pw1")).await.unwrap();
    uc.execute(input("a@b.com", "pw1")).await.unwrap();

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 2, "an identity may hold several outstanding codes");
    assert!(codes.iter().all(|b| b.user_id == user.user_id));
}

use std::collections::HashSet;

use autopm_login::domain::types::{OTC_LEN, otc_ttl};
use autopm_login::error::LinkServiceError;
use autopm_login::usecase::otc::{IssueOtcUseCase, RandomCodeGenerator};

use crate::helpers::{FixedCodeGenerator, MockOtcRepo, test_identity};

#[tokio::test]
async fn should_persist_binding_before_returning_it() {
    let repo = MockOtcRepo::empty();
    let codes_handle = repo.codes_handle();
    let uc = IssueOtcUseCase {
        otc_codes: repo,
        codes: RandomCodeGenerator,
    };

    let user = test_identity();
    let binding = uc.execute(user.user_id).await.unwrap();

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "expected exactly one binding persisted");
    assert_eq!(codes[0], binding);
    assert_eq!(binding.user_id, user.user_id);
    assert!(binding.used_at.is_none(), "new code should not be used");
}

#[tokio::test]
async fn should_expire_exactly_ten_minutes_after_issuance() {
    let uc = IssueOtcUseCase {
        otc_codes: MockOtcRepo::empty(),
        codes: RandomCodeGenerator,
    };

    let binding = uc.execute(test_identity().user_id).await.unwrap();

    assert_eq!(binding.expires_at - binding.created_at, otc_ttl());
    assert_eq!(otc_ttl().num_seconds(), 600);
}

#[tokio::test]
async fn should_issue_six_char_uppercase_code() {
    let uc = IssueOtcUseCase {
        otc_codes: MockOtcRepo::empty(),
        codes: RandomCodeGenerator,
    };

    let binding = uc.execute(test_identity().user_id).await.unwrap();

    assert_eq!(binding.code.len(), OTC_LEN);
    assert_eq!(binding.code.len(), 6);
    assert_eq!(binding.code, binding.code.to_uppercase());
    assert!(binding.code.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn should_issue_distinct_codes_for_different_identities() {
    let repo = MockOtcRepo::empty();
    let codes_handle = repo.codes_handle();
    let uc = IssueOtcUseCase {
        otc_codes: repo,
        codes: RandomCodeGenerator,
    };

    let n = 2_000;
    for _ in 0..n {
        uc.execute(uuid::Uuid::new_v4().into()).await.unwrap();
    }

    let codes = codes_handle.lock().unwrap();
    let unique: HashSet<&str> = codes.iter().map(|b| b.code.as_str()).collect();
    // 2k draws from 32^6 collide with probability ~0.2%; allow one.
    assert!(
        unique.len() >= n - 1,
        "too many collisions: {} unique of {n}",
        unique.len()
    );
}

#[tokio::test]
async fn should_fail_with_persistence_error_when_store_down() {
    let repo = MockOtcRepo::failing();
    let codes_handle = repo.codes_handle();
    let uc = IssueOtcUseCase {
        otc_codes: repo,
        codes: FixedCodeGenerator("A1B2C3"),
    };

    let result = uc.execute(test_identity().user_id).await;

    assert!(
        matches!(result, Err(LinkServiceError::OtcPersistenceFailed(_))),
        "expected OtcPersistenceFailed, got {result:?}"
    );
    assert!(codes_handle.lock().unwrap().is_empty());
}

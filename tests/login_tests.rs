mod common;

use gatehouse::services;
use gatehouse::store::AccountStore;
use gatehouse::utils::errors::ErrorCode;
use crate::common::{set_time, start_gatehouse, test_config, STRONG_PWD};

const BAD_PWD: &str = "Wr0ng!Guess9";

#[tokio::test]
async fn test_a_successful_login_issues_a_session_token() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    let session = services::login(&test.ctx, "alice", STRONG_PWD).await.unwrap();

    assert!(services::is_authenticated(&test.ctx, &session));
    assert!(!services::is_authenticated(&test.ctx, "made-up-token"));

    assert!(services::logout(&test.ctx, &session));
    assert!(!services::is_authenticated(&test.ctx, &session));
}

#[tokio::test]
async fn test_unknown_usernames_fail_exactly_like_wrong_passwords() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    let wrong_password = services::login(&test.ctx, "alice", BAD_PWD).await.unwrap_err();
    let unknown_user = services::login(&test.ctx, "mallory", STRONG_PWD).await.unwrap_err();

    assert_eq!(wrong_password.error_code(), ErrorCode::PasswordNotMatch);
    assert_eq!(unknown_user.error_code(), ErrorCode::PasswordNotMatch);
    assert_eq!(wrong_password.public_message(), unknown_user.public_message());
}

#[tokio::test]
async fn test_max_failures_lock_the_account_until_the_window_elapses() {
    let test = start_gatehouse(test_config()); // max_login_attempts = 3, lockout = 15 minutes
    let account = services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    set_time(&test.ctx, "2021-08-23T09:30:00Z");

    // Three wrong guesses are each reported as a mismatch.
    for _ in 0..3 {
        let error = services::login(&test.ctx, "alice", BAD_PWD).await.unwrap_err();
        assert_eq!(error.error_code(), ErrorCode::PasswordNotMatch);
    }

    // The fourth attempt is refused before verification - even with the correct password.
    let error = services::login(&test.ctx, "alice", STRONG_PWD).await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::TooManyFailedAttempts);

    // One second before the window closes we are still locked.
    set_time(&test.ctx, "2021-08-23T09:44:59Z");
    let error = services::login(&test.ctx, "alice", STRONG_PWD).await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::TooManyFailedAttempts);

    // Once the window elapses the correct password is accepted and the counter resets.
    set_time(&test.ctx, "2021-08-23T09:45:00Z");
    services::login(&test.ctx, "alice", STRONG_PWD).await.unwrap();

    let account = test.store.account_by_username(&account.username).await.unwrap().unwrap();
    assert_eq!(account.failure_count, None);
    assert_eq!(account.last_failure, None);
}

#[tokio::test]
async fn test_a_success_resets_the_counter_mid_streak() {
    let test = start_gatehouse(test_config());
    let account = services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    // Two failures - one short of the limit.
    for _ in 0..2 {
        services::login(&test.ctx, "alice", BAD_PWD).await.unwrap_err();
    }

    services::login(&test.ctx, "alice", STRONG_PWD).await.unwrap();

    // The slate is clean: three fresh failures are needed to lock again.
    let account = test.store.account_by_username(&account.username).await.unwrap().unwrap();
    assert_eq!(account.failure_count, None);

    for _ in 0..2 {
        services::login(&test.ctx, "alice", BAD_PWD).await.unwrap_err();
    }

    services::login(&test.ctx, "alice", STRONG_PWD).await.unwrap();
}

mod common;

use gatehouse::services;
use gatehouse::utils::errors::{ErrorCode, ErrorKind};
use crate::common::{set_time, start_gatehouse, test_config, STRONG_PWD};

#[tokio::test]
async fn test_the_full_reset_exchange_end_to_end() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    // Phase one - a code is issued and delivered out-of-band only.
    services::start_reset(&test.ctx, "alice@x.com").await.unwrap();
    let code = test.notifier.last_code_for("alice@x.com").expect("the code should have been sent");

    // Phase two - a wrong guess leaves the code in place, the right one mints a token.
    let error = services::redeem_code(&test.ctx, "alice@x.com", "WrongGues").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::ResetCodeMismatch);

    let token = services::redeem_code(&test.ctx, "alice@x.com", &code).await.unwrap();

    // The code was spent by the successful redemption.
    let error = services::redeem_code(&test.ctx, "alice@x.com", &code).await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::NoResetCode);

    // Phase three - the current password is refused by the history ledger.
    let error = services::complete_reset(&test.ctx, &token, STRONG_PWD, STRONG_PWD).await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::PasswordUsedBefore);

    // Mismatched confirmation and policy failures are reported before anything mutates.
    let error = services::complete_reset(&test.ctx, &token, "N3w!Secret01", "N3w!Secret02").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::PasswordsDoNotMatch);

    let error = services::complete_reset(&test.ctx, &token, "weak", "weak").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::PasswordTooShort);

    // A genuinely new compliant password is accepted.
    services::complete_reset(&test.ctx, &token, "N3w!Secret01", "N3w!Secret01").await.unwrap();
    services::login(&test.ctx, "alice", "N3w!Secret01").await.unwrap();

    // The token was single-use.
    let error = services::complete_reset(&test.ctx, &token, "An0ther!Pwd1", "An0ther!Pwd1").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::ResetTokenNotFound);
}

#[tokio::test]
async fn test_a_code_expires_after_its_window() {
    let test = start_gatehouse(test_config()); // reset_timeout_seconds = 300

    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    set_time(&test.ctx, "2021-08-23T09:30:00Z");
    services::start_reset(&test.ctx, "alice@x.com").await.unwrap();
    let code = test.notifier.last_code_for("alice@x.com").unwrap();

    // Just inside the window it would still redeem - travel just past it instead.
    set_time(&test.ctx, "2021-08-23T09:35:01Z");
    let error = services::redeem_code(&test.ctx, "alice@x.com", &code).await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::ResetWindowExpired);
}

#[tokio::test]
async fn test_a_new_request_invalidates_the_previous_code() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    services::start_reset(&test.ctx, "alice@x.com").await.unwrap();
    let first = test.notifier.last_code_for("alice@x.com").unwrap();

    services::start_reset(&test.ctx, "alice@x.com").await.unwrap();
    let second = test.notifier.last_code_for("alice@x.com").unwrap();
    assert_ne!(first, second);

    let error = services::redeem_code(&test.ctx, "alice@x.com", &first).await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::ResetCodeMismatch);

    services::redeem_code(&test.ctx, "alice@x.com", &second).await.unwrap();
}

#[tokio::test]
async fn test_an_unregistered_email_gets_the_same_acknowledgment_and_no_code() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    // Indistinguishable from the registered case to the caller.
    services::start_reset(&test.ctx, "nobody@x.com").await.unwrap();

    assert_eq!(test.notifier.sent_count(), 0);
    let error = services::redeem_code(&test.ctx, "nobody@x.com", "AnyCode1").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::NoResetCode);
}

#[tokio::test]
async fn test_a_delivery_failure_is_a_distinct_outcome() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    test.notifier.set_failing(true);
    let error = services::start_reset(&test.ctx, "alice@x.com").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::NotificationFailed);
    assert_eq!(error.kind(), ErrorKind::Notification);

    // The undelivered code was discarded, not left redeemable.
    test.notifier.set_failing(false);
    let error = services::redeem_code(&test.ctx, "alice@x.com", "AnyCode1").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::NoResetCode);
}

#[tokio::test]
async fn test_a_locked_account_cannot_sidestep_the_lockout_via_reset() {
    let test = start_gatehouse(test_config());
    services::register(&test.ctx, "alice", "alice@x.com", STRONG_PWD).await.unwrap();

    set_time(&test.ctx, "2021-08-23T09:30:00Z");
    for _ in 0..3 {
        services::login(&test.ctx, "alice", "Wr0ng!Guess9").await.unwrap_err();
    }

    let error = services::start_reset(&test.ctx, "alice@x.com").await.unwrap_err();
    assert_eq!(error.error_code(), ErrorCode::TooManyFailedAttempts);

    // Once the window elapses the reset flow opens up again.
    set_time(&test.ctx, "2021-08-23T09:45:00Z");
    services::start_reset(&test.ctx, "alice@x.com").await.unwrap();
}

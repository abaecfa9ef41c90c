use chrono::Duration;
use tracing::instrument;
use crate::model::account::Account;
use crate::model::algorithm;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// Authenticate the username and password and issue a session token.
///
/// The lockout check runs before any verification, so a locked account is refused
/// even when the password is correct. Unknown usernames verify against a decoy
/// hash and return the same error as a wrong password, to avoid user enumeration.
///
#[instrument(skip(ctx, plain_text_password))]
pub async fn login(ctx: &ServiceContext, username: &str, plain_text_password: &str)
    -> Result<String, GatehouseError> {

    let account = match ctx.store().account_by_username(username).await? {
        Some(account) => account,
        None => {
            // Burn the same CPU as a real verification before failing, and fail with
            // the same error code a wrong password produces.
            verify_blocking(plain_text_password, ctx.decoy_phc()).await?;

            tracing::info!("Login attempt for unknown username");
            return Err(ErrorCode::PasswordNotMatch.with_msg("The passwords did not match"))
        },
    };

    // If we've failed too many times recently, reject the request before we even
    // look at the password.
    if locked_out(ctx, &account) {
        return Err(ErrorCode::TooManyFailedAttempts
            .with_msg("The request has failed too many times, please wait and try again"))
    }

    if !account.is_active {
        return Err(ErrorCode::AccountInactive
            .with_msg(&format!("account {} is deactivated", account.account_id)))
    }

    let valid = verify_blocking(plain_text_password, &account.phc).await?;

    if !valid {
        ctx.store().record_failure(&account.account_id, ctx.now()).await?;

        // Are we at the failure limit? Log it - the next attempt will be refused.
        if account.failure_count.unwrap_or(0) + 1 >= ctx.config().max_login_attempts {
            tracing::warn!("Account {} has reached the failure threshold", account.account_id);
        }

        return Err(ErrorCode::PasswordNotMatch.with_msg("The passwords did not match"))
    }

    // Clear any failure details on the account and stamp the last successful use.
    ctx.store().record_success(&account.account_id, ctx.now()).await?;

    Ok(ctx.sessions().issue())
}

///
/// Validate a bearer token presented on a subsequent request.
///
pub fn is_authenticated(ctx: &ServiceContext, session_token: &str) -> bool {
    ctx.sessions().is_valid(session_token)
}

///
/// End the session. Returns false if the token was not a live session.
///
pub fn logout(ctx: &ServiceContext, session_token: &str) -> bool {
    ctx.sessions().revoke(session_token)
}

///
/// If previous attempts have failed more often than the policy allows, return true
/// if the last failure was within the lockout window.
///
/// i.e. after x failures, prohibit any more attempts for y seconds.
///
/// The counter is only cleared by a successful login - once the window elapses the
/// account is implicitly unblocked even though the counter still stands.
///
pub(crate) fn locked_out(ctx: &ServiceContext, account: &Account) -> bool {

    // Has the account failed a previous attempt?
    if let Some(last_failure) = account.last_failure {
        if account.failure_count.unwrap_or(0) >= ctx.config().max_login_attempts {
            // How long since the last failed attempt?
            let duration: Duration = ctx.now() - last_failure;

            return duration.num_seconds() < ctx.config().lockout_seconds as i64
        }
    }

    false
}

///
/// Validate the password against the stored hash. This is a highly CPU-bound
/// activity and is performed on the blocking worker thread pool.
///
pub(crate) async fn verify_blocking(plain_text_password: &str, phc: &str) -> Result<bool, GatehouseError> {
    let plain_text_password = plain_text_password.to_string();
    let phc = phc.to_string();

    tokio::task::spawn_blocking(move || algorithm::verify(&plain_text_password, &phc))
        .await
        .map_err(GatehouseError::from)?
}

use tracing::instrument;
use crate::services::change_password::hash_unless_recently_used;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// Finish the reset exchange: set a new password against a valid reset token.
///
/// All validation and the (slow) hash happen while the token is still live; the
/// commit then consumes the token atomically before the store write, so two
/// concurrent submissions of the same token cannot both succeed. If the store
/// write fails the token is restored - nothing is left half-applied.
///
#[instrument(skip(ctx, reset_token, new_password, confirm_password))]
pub async fn complete_reset(ctx: &ServiceContext, reset_token: &str, new_password: &str, confirm_password: &str)
    -> Result<(), GatehouseError> {

    let email = match ctx.resets().token_email(reset_token) {
        Some(email) => email,
        None => return Err(ErrorCode::ResetTokenNotFound
            .with_msg("the reset token is unknown or already used")),
    };

    if new_password != confirm_password {
        return Err(ErrorCode::PasswordsDoNotMatch.with_msg("the passwords do not match"))
    }

    ctx.policy().validate_pattern(new_password)?;

    let account = match ctx.store().account_by_email(&email).await? {
        Some(account) => account,
        None => return Err(ErrorCode::AccountNotFound
            .with_msg(&format!("no account for the email held by token (email {})", email))),
    };

    let phc = hash_unless_recently_used(ctx, &account.account_id, new_password).await?;

    // Commit point: take the token out of play first - if another request consumed
    // it while we were hashing, this one loses the race and fails cleanly.
    let email = match ctx.resets().consume_token(reset_token) {
        Some(email) => email,
        None => return Err(ErrorCode::ResetTokenNotFound
            .with_msg("the reset token was consumed by a concurrent request")),
    };

    match ctx.store()
        .update_credential(&account.account_id, &phc, ctx.config().history_size, ctx.now())
        .await {

        Ok(()) => {
            // The exchange is finished - nothing derived from it may linger.
            ctx.resets().clear_code(&email);
            tracing::info!("Password reset completed for account {}", account.account_id);
            Ok(())
        },
        Err(error) => {
            // The credential was not updated, so the token is still good to retry.
            ctx.resets().restore_token(reset_token, &email);
            Err(error)
        },
    }
}

use tracing::instrument;
use crate::model::history;
use crate::services::login::verify_blocking;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// Change the password of an authenticated account holder.
///
/// The caller must prove knowledge of the current password; the replacement then
/// runs through the format policy and the history ledger before the credential is
/// swapped in one atomic store commit.
///
#[instrument(skip(ctx, current_password, new_password))]
pub async fn change_password(ctx: &ServiceContext, username: &str, current_password: &str, new_password: &str)
    -> Result<(), GatehouseError> {

    let account = match ctx.store().account_by_username(username).await? {
        Some(account) => account,
        None => return Err(ErrorCode::AccountNotFound
            .with_msg(&format!("no account with username {}", username))),
    };

    if !verify_blocking(current_password, &account.phc).await? {
        return Err(ErrorCode::PasswordNotMatch.with_msg("The current password is incorrect"))
    }

    ctx.policy().validate_pattern(new_password)?;

    let phc = hash_unless_recently_used(ctx, &account.account_id, new_password).await?;

    ctx.store()
        .update_credential(&account.account_id, &phc, ctx.config().history_size, ctx.now())
        .await?;

    tracing::info!("Password changed for account {}", account.account_id);
    Ok(())
}

///
/// Run the history check and, if it passes, hash the new password - both on the
/// blocking pool, since each history entry costs a full verification.
///
/// No lock is held while this runs; the store commit afterwards is the atomic step.
///
pub(crate) async fn hash_unless_recently_used(ctx: &ServiceContext, account_id: &str, new_password: &str)
    -> Result<String, GatehouseError> {

    let entries = ctx.store().history(account_id).await?;
    let limit = ctx.config().history_size as usize;

    let hasher = ctx.hasher().clone();
    let new_password = new_password.to_string();

    tokio::task::spawn_blocking(move || {
            if history::recently_used(&new_password, &entries, limit)? {
                return Err(ErrorCode::PasswordUsedBefore
                    .with_msg(&format!("a password may not match any of the previous {}", limit)))
            }

            hasher.hash_into_phc(&new_password)
        })
        .await
        .map_err(GatehouseError::from)?
}

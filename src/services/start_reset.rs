use chrono::Duration;
use tracing::instrument;
use crate::services::login::locked_out;
use crate::utils;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// Begin the forgotten-password exchange: issue a one-time code and hand it to the
/// notifier for out-of-band delivery.
///
/// An unknown email returns Ok just like a known one, so the response does not
/// reveal which addresses are registered. A locked account is refused here too -
/// otherwise the reset flow would be a lockout bypass. The code never appears in
/// any response; the caller only ever sees a generic acknowledgment.
///
#[instrument(skip(ctx))]
pub async fn start_reset(ctx: &ServiceContext, email: &str) -> Result<(), GatehouseError> {

    let account = match ctx.store().account_by_email(email).await? {
        Some(account) => account,
        None => {
            tracing::info!("Reset requested for an unregistered email");
            return Ok(())
        },
    };

    if locked_out(ctx, &account) {
        return Err(ErrorCode::TooManyFailedAttempts
            .with_msg("The request has failed too many times, please wait and try again"))
    }

    // A fresh random code, overwriting any prior unredeemed code for this email.
    let reset_code = utils::generate_reset_code();
    let expires = ctx.now() + Duration::seconds(ctx.config().reset_timeout_seconds as i64);
    ctx.resets().issue_code(email, &reset_code, expires);

    if !ctx.notifier().send(email, &reset_code).await {
        // Undelivered codes are useless - drop it and surface a distinct outcome.
        ctx.resets().clear_code(email);
        return Err(ErrorCode::NotificationFailed
            .with_msg(&format!("the reset code for account {} could not be delivered", account.account_id)))
    }

    tracing::info!("Reset code issued for account {}", account.account_id);
    Ok(())
}

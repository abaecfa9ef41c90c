use tracing::instrument;
use crate::utils::context::ServiceContext;
use crate::utils::errors::GatehouseError;

///
/// Exchange a delivered reset code for a single-use reset token.
///
/// The vault enforces existence, expiry and an exact (constant-time) match inside
/// one critical section, and spends the code on success. The specific failure is
/// logged here; callers surface only the collapsed public message.
///
#[instrument(skip(ctx, code))]
pub async fn redeem_code(ctx: &ServiceContext, email: &str, code: &str)
    -> Result<String, GatehouseError> {

    match ctx.resets().redeem_code(email, code, ctx.now()) {
        Ok(token) => {
            tracing::info!("Reset code redeemed, token minted");
            Ok(token)
        },
        Err(error) => {
            tracing::info!("Reset code rejected: {}", error.message());
            Err(error)
        },
    }
}

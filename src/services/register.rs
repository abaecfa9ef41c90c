use tracing::instrument;
use crate::model::account::Account;
use crate::store::NewAccount;
use crate::utils::context::ServiceContext;
use crate::utils::errors::GatehouseError;

///
/// Create a new account.
///
/// The candidate password runs through the format policy first, then is hashed on
/// the blocking pool. Uniqueness of email and username is enforced inside the
/// store's own critical section, so a duplicate surfaces as an error here rather
/// than a race.
///
#[instrument(skip(ctx, plain_text_password))]
pub async fn register(ctx: &ServiceContext, username: &str, email: &str, plain_text_password: &str)
    -> Result<Account, GatehouseError> {

    ctx.policy().validate_pattern(plain_text_password)?;

    // Hashing is highly CPU-bound - perform it on the blocking worker thread pool.
    let hasher = ctx.hasher().clone();
    let plain_text_password = plain_text_password.to_string();
    let phc = tokio::task::spawn_blocking(move || hasher.hash_into_phc(&plain_text_password))
        .await
        .map_err(GatehouseError::from)?
        ?;

    let new = NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        phc,
    };

    let account = ctx.store().create_account(new, ctx.now()).await?;

    tracing::info!("Registered account {} for {}", account.account_id, account.username);
    Ok(account)
}

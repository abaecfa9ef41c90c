pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::model::account::Account;
use crate::model::history::PasswordHistoryEntry;
use crate::utils::errors::GatehouseError;

///
/// A new account as submitted at registration - the password is already hashed by
/// the time it reaches the store.
///
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub phc: String,
}

///
/// The persistence collaborator.
///
/// Implementations must make each mutating call atomic: duplicate detection happens
/// inside create_account's own critical section, and update_credential commits the
/// new hash, the history append and the prune as one unit or not at all.
///
#[async_trait]
pub trait AccountStore: Send + Sync {
    ///
    /// Create the account and seed its history ledger with the initial hash.
    ///
    /// Fails with DuplicateEmail / DuplicateUsername if either is taken.
    ///
    async fn create_account(&self, new: NewAccount, now: DateTime<Utc>) -> Result<Account, GatehouseError>;

    async fn account_by_username(&self, username: &str) -> Result<Option<Account>, GatehouseError>;

    async fn account_by_email(&self, email: &str) -> Result<Option<Account>, GatehouseError>;

    ///
    /// Bump the failure count and stamp the failure time.
    ///
    async fn record_failure(&self, account_id: &str, now: DateTime<Utc>) -> Result<(), GatehouseError>;

    ///
    /// Clear any failure details and stamp a successful authentication.
    ///
    async fn record_success(&self, account_id: &str, now: DateTime<Utc>) -> Result<(), GatehouseError>;

    ///
    /// The account's history ledger, oldest entry first.
    ///
    async fn history(&self, account_id: &str) -> Result<Vec<PasswordHistoryEntry>, GatehouseError>;

    ///
    /// Replace the credential: set the new hash, append it to the history ledger and
    /// prune the ledger to max_history entries, all as one atomic commit.
    ///
    async fn update_credential(&self, account_id: &str, phc: &str, max_history: u32, now: DateTime<Utc>)
        -> Result<(), GatehouseError>;
}

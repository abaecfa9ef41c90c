use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use crate::model::account::Account;
use crate::model::history::{self, PasswordHistoryEntry};
use crate::store::{AccountStore, NewAccount};
use crate::utils;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// A process-lifetime store - backs the teaching deployment and the tests.
///
/// A single RwLock makes every mutating call a critical section, which is all the
/// atomicity the trait asks for. Real deployments would put a transactional
/// database behind the same trait instead.
///
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, AccountRecord>>, // Keyed by account_id.
}

struct AccountRecord {
    account: Account,
    history: Vec<PasswordHistoryEntry>, // Oldest first.
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore { accounts: RwLock::new(HashMap::new()) }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, new: NewAccount, now: DateTime<Utc>) -> Result<Account, GatehouseError> {
        let mut accounts = self.accounts.write();

        // Duplicate checks and the insert share the write guard, so two concurrent
        // registrations cannot both claim the same username or email.
        if accounts.values().any(|record| record.account.email.eq_ignore_ascii_case(&new.email)) {
            return Err(ErrorCode::DuplicateEmail.with_msg("Email already registered"))
        }

        if accounts.values().any(|record| record.account.username == new.username) {
            return Err(ErrorCode::DuplicateUsername.with_msg("Username already taken"))
        }

        let account = Account {
            account_id: utils::generate_id(),
            username: new.username,
            email: new.email,
            phc: new.phc.clone(),
            is_active: true,
            created_on: now,
            last_success: None,
            last_failure: None,
            failure_count: None,
        };

        accounts.insert(account.account_id.clone(), AccountRecord {
            account: account.clone(),
            history: vec![PasswordHistoryEntry::new(&new.phc, now)],
        });

        Ok(account)
    }

    async fn account_by_username(&self, username: &str) -> Result<Option<Account>, GatehouseError> {
        let accounts = self.accounts.read();
        Ok(accounts.values()
            .find(|record| record.account.username == username)
            .map(|record| record.account.clone()))
    }

    async fn account_by_email(&self, email: &str) -> Result<Option<Account>, GatehouseError> {
        let accounts = self.accounts.read();
        Ok(accounts.values()
            .find(|record| record.account.email.eq_ignore_ascii_case(email))
            .map(|record| record.account.clone()))
    }

    async fn record_failure(&self, account_id: &str, now: DateTime<Utc>) -> Result<(), GatehouseError> {
        let mut accounts = self.accounts.write();
        let record = load_mut(&mut accounts, account_id)?;

        record.account.failure_count = Some(record.account.failure_count.unwrap_or(0) + 1);
        record.account.last_failure = Some(now);
        Ok(())
    }

    async fn record_success(&self, account_id: &str, now: DateTime<Utc>) -> Result<(), GatehouseError> {
        let mut accounts = self.accounts.write();
        let record = load_mut(&mut accounts, account_id)?;

        record.account.failure_count = None;
        record.account.last_failure = None;
        record.account.last_success = Some(now);
        Ok(())
    }

    async fn history(&self, account_id: &str) -> Result<Vec<PasswordHistoryEntry>, GatehouseError> {
        let accounts = self.accounts.read();
        match accounts.get(account_id) {
            Some(record) => Ok(record.history.clone()),
            None => Err(not_found(account_id)),
        }
    }

    async fn update_credential(&self, account_id: &str, phc: &str, max_history: u32, now: DateTime<Utc>)
        -> Result<(), GatehouseError> {

        let mut accounts = self.accounts.write();
        let record = load_mut(&mut accounts, account_id)?;

        record.account.phc = phc.to_string();
        record.history.push(PasswordHistoryEntry::new(phc, now));
        history::prune(&mut record.history, max_history as usize);
        Ok(())
    }
}

fn load_mut<'a>(accounts: &'a mut HashMap<String, AccountRecord>, account_id: &str)
    -> Result<&'a mut AccountRecord, GatehouseError> {
    accounts.get_mut(account_id).ok_or_else(|| not_found(account_id))
}

fn not_found(account_id: &str) -> GatehouseError {
    ErrorCode::StorageError.with_msg(&format!("account {} is not in the store", account_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            phc: String::from("$pbkdf2-sha256$i=10,l=32$abcdefgh$ijklmnop"),
        }
    }

    #[tokio::test]
    async fn test_duplicates_are_refused() {
        let store = MemoryStore::new();
        store.create_account(new_account("alice", "alice@x.com"), Utc::now()).await.unwrap();

        let error = store.create_account(new_account("bob", "ALICE@x.com"), Utc::now()).await.unwrap_err();
        assert_eq!(error.error_code(), ErrorCode::DuplicateEmail);

        let error = store.create_account(new_account("alice", "other@x.com"), Utc::now()).await.unwrap_err();
        assert_eq!(error.error_code(), ErrorCode::DuplicateUsername);
    }

    #[tokio::test]
    async fn test_registration_seeds_the_history_ledger() {
        let store = MemoryStore::new();
        let account = store.create_account(new_account("alice", "alice@x.com"), Utc::now()).await.unwrap();

        let history = store.history(&account.account_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].phc, account.phc);
    }

    #[tokio::test]
    async fn test_update_credential_appends_and_prunes_atomically() {
        let store = MemoryStore::new();
        let account = store.create_account(new_account("alice", "alice@x.com"), Utc::now()).await.unwrap();

        for n in 0..3 {
            store.update_credential(&account.account_id, &format!("$pbkdf2-sha256$phc-{}", n), 3, Utc::now())
                .await
                .unwrap();
        }

        let history = store.history(&account.account_id).await.unwrap();
        assert_eq!(history.len(), 3);

        // The registration seed was the oldest entry and has been evicted.
        assert!(history.iter().all(|entry| entry.phc.starts_with("$pbkdf2-sha256$phc-")));

        let account = store.account_by_username("alice").await.unwrap().unwrap();
        assert_eq!(account.phc, "$pbkdf2-sha256$phc-2");
    }

    #[tokio::test]
    async fn test_failure_bookkeeping() {
        let store = MemoryStore::new();
        let account = store.create_account(new_account("alice", "alice@x.com"), Utc::now()).await.unwrap();
        let now = Utc::now();

        store.record_failure(&account.account_id, now).await.unwrap();
        store.record_failure(&account.account_id, now).await.unwrap();

        let account = store.account_by_email("alice@x.com").await.unwrap().unwrap();
        assert_eq!(account.failure_count, Some(2));
        assert_eq!(account.last_failure, Some(now));

        store.record_success(&account.account_id, now).await.unwrap();
        let account = store.account_by_email("alice@x.com").await.unwrap().unwrap();
        assert_eq!(account.failure_count, None);
        assert_eq!(account.last_failure, None);
        assert_eq!(account.last_success, Some(now));
    }
}

use std::sync::Arc;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use crate::model::algorithm::CredentialHasher;
use crate::model::policy::PasswordPolicy;
use crate::model::reset::ResetVault;
use crate::model::session::SessionTokens;
use crate::notify::ResetNotifier;
use crate::store::AccountStore;
use crate::utils;
use crate::utils::config::Configuration;
use crate::utils::errors::GatehouseError;
use crate::utils::time_provider::TimeProvider;

///
/// The context is available to every service operation and gives it access to the
/// store, the notifier, the policy snapshot and the shared transient state.
///
/// All the mutable state lives behind explicit components with their own locks -
/// nothing here is process-global.
///
pub struct ServiceContext {
    config: Configuration,
    policy: PasswordPolicy,
    hasher: CredentialHasher,
    decoy_phc: String,
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn ResetNotifier>,
    resets: ResetVault,
    sessions: SessionTokens,
    time_provider: RwLock<TimeProvider>,
}

impl ServiceContext {
    pub fn new(config: Configuration, store: Arc<dyn AccountStore>, notifier: Arc<dyn ResetNotifier>)
        -> Result<Self, GatehouseError> {

        let policy = PasswordPolicy::from_config(&config);
        let hasher = CredentialHasher::from_config(&config);

        // A hash of a throwaway random value. Login attempts against unknown
        // usernames verify against this so their timing matches a wrong password.
        let decoy_phc = hasher.hash_into_phc(&utils::generate_token())?;

        tracing::debug!("Service configuration:\n{}", config.fmt_console()?);

        Ok(ServiceContext {
            config,
            policy,
            hasher,
            decoy_phc,
            store,
            notifier,
            resets: ResetVault::new(),
            sessions: SessionTokens::new(),
            time_provider: RwLock::new(TimeProvider::default()),
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time - tests use this to travel through lockout and
    /// reset windows instead of sleeping.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    pub fn decoy_phc(&self) -> &str {
        &self.decoy_phc
    }

    pub fn store(&self) -> &dyn AccountStore {
        self.store.as_ref()
    }

    pub fn notifier(&self) -> &dyn ResetNotifier {
        self.notifier.as_ref()
    }

    pub fn resets(&self) -> &ResetVault {
        &self.resets
    }

    pub fn sessions(&self) -> &SessionTokens {
        &self.sessions
    }
}

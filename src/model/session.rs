use std::collections::HashSet;
use parking_lot::RwLock;
use crate::utils;

///
/// The set of currently-valid bearer tokens. Issued at login, removed at logout,
/// validated by membership.
///
/// Sessions have no expiry - callers that need one should layer a TTL on top.
///
pub struct SessionTokens {
    active: RwLock<HashSet<String>>,
}

impl SessionTokens {
    pub fn new() -> Self {
        SessionTokens { active: RwLock::new(HashSet::new()) }
    }

    pub fn issue(&self) -> String {
        let token = utils::generate_token();
        self.active.write().insert(token.clone());
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.active.read().contains(token)
    }

    ///
    /// Remove the token. Returns false if it was not a live session.
    ///
    pub fn revoke(&self, token: &str) -> bool {
        self.active.write().remove(token)
    }
}

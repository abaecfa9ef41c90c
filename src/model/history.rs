use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::model::algorithm;
use crate::utils::errors::GatehouseError;

///
/// One retired (or current) credential hash. Entries are never edited - the ledger
/// is append-only apart from pruning the oldest entries.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PasswordHistoryEntry {
    pub phc: String,
    pub created_on: DateTime<Utc>,
}

impl PasswordHistoryEntry {
    pub fn new(phc: &str, created_on: DateTime<Utc>) -> Self {
        PasswordHistoryEntry { phc: phc.to_string(), created_on }
    }
}

///
/// Has the candidate password been used within the last `limit` entries?
///
/// Each retained hash is checked with the full verifier, so this is CPU-bound and
/// callers run it on the blocking pool. The history slice is ordered oldest first.
///
pub fn recently_used(plain_text_password: &str, history: &[PasswordHistoryEntry], limit: usize)
    -> Result<bool, GatehouseError> {

    for entry in history.iter().rev().take(limit) {
        if algorithm::verify(plain_text_password, &entry.phc)? {
            return Ok(true)
        }
    }

    Ok(false)
}

///
/// Evict oldest-first until at most `limit` entries remain.
///
pub fn prune(history: &mut Vec<PasswordHistoryEntry>, limit: usize) {
    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(0..excess);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// A registered account as held by the store.
///
/// The failure counter and last-failure timestamp drive the login lockout. The
/// counter is only reset by a successful login - an elapsed lockout window leaves
/// it in place, which is enough to implicitly unblock the account.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    pub account_id: String,
    pub username: String,
    pub email: String,
    pub phc: String,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub failure_count: Option<u32>,
}

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use subtle::ConstantTimeEq;
use crate::utils;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// The two-phase reset exchange state: outstanding codes keyed by email, and minted
/// tokens keyed by their opaque value.
///
/// Process-lifetime only - a restart drops any in-flight resets, which is fine for
/// the teaching deployment. Expiry is evaluated lazily when a code is redeemed, so
/// no background sweeper is needed.
///
/// Every check-then-act runs under one of the two mutexes, so two concurrent
/// redemptions of the same code cannot both succeed.
///
pub struct ResetVault {
    codes: Mutex<HashMap<String, ResetCode>>,
    tokens: Mutex<HashMap<String, String>>, // token value -> email
}

#[derive(Clone, Debug)]
struct ResetCode {
    code: String,
    expires: DateTime<Utc>,
}

impl ResetVault {
    pub fn new() -> Self {
        ResetVault {
            codes: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
        }
    }

    ///
    /// Store a freshly issued code for the email, overwriting any prior unredeemed
    /// code - at most one code is ever live per email.
    ///
    pub fn issue_code(&self, email: &str, code: &str, expires: DateTime<Utc>) {
        let mut codes = self.codes.lock();
        codes.insert(email.to_string(), ResetCode { code: code.to_string(), expires });
    }

    ///
    /// Exchange a code for a single-use reset token.
    ///
    /// The code must exist, be unexpired and match exactly. A successful redemption
    /// invalidates the code, so redeeming twice fails the second time. A mismatch
    /// leaves the code in place for another try.
    ///
    pub fn redeem_code(&self, email: &str, code: &str, now: DateTime<Utc>) -> Result<String, GatehouseError> {
        let mut codes = self.codes.lock();

        let stored = match codes.get(email) {
            Some(stored) => stored.clone(),
            None => return Err(ErrorCode::NoResetCode
                .with_msg(&format!("no reset code outstanding for {}", email))),
        };

        if now > stored.expires {
            codes.remove(email);
            return Err(ErrorCode::ResetWindowExpired
                .with_msg(&format!("the reset code for {} expired at {}", email, stored.expires)))
        }

        if !bool::from(code.as_bytes().ct_eq(stored.code.as_bytes())) {
            return Err(ErrorCode::ResetCodeMismatch
                .with_msg(&format!("the reset code submitted for {} did not match", email)))
        }

        // Redeemed - the code is spent, mint the token while still holding the lock
        // so no second redemption can interleave.
        codes.remove(email);

        let token = utils::generate_token();
        self.tokens.lock().insert(token.clone(), email.to_string());
        Ok(token)
    }

    ///
    /// Look up the email a token was minted for, without consuming it.
    ///
    pub fn token_email(&self, token: &str) -> Option<String> {
        self.tokens.lock().get(token).cloned()
    }

    ///
    /// Atomically take the token out of play. Returns the email it was minted for,
    /// or None if it was never minted or already consumed.
    ///
    pub fn consume_token(&self, token: &str) -> Option<String> {
        self.tokens.lock().remove(token)
    }

    ///
    /// Put a consumed token back - used when the credential update it authorised
    /// could not be committed, so the caller may retry.
    ///
    pub fn restore_token(&self, token: &str, email: &str) {
        self.tokens.lock().insert(token.to_string(), email.to_string());
    }

    ///
    /// Drop any outstanding code for the email.
    ///
    pub fn clear_code(&self, email: &str) {
        self.codes.lock().remove(email);
    }
}

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::model::blocklist::COMMON_PASSWORDS;
use crate::utils::config::Configuration;
use crate::utils::errors::{ErrorCode, GatehouseError};

///
/// The password-format policy, snapshotted from the configuration at start-up.
///
/// Rules run in a fixed order and the first violation determines the error the
/// caller sees. The order only affects which single message is surfaced.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PasswordPolicy {
    pub min_length: u32,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digits: bool,
    pub require_special: bool,
    pub special_chars: String,
    pub forbidden_words: Vec<String>,   // Lower-cased.
    pub blocklist: HashSet<String>,     // Lower-cased. Empty when the check is disabled.
}

impl PasswordPolicy {
    pub fn from_config(config: &Configuration) -> Self {
        let blocklist = match config.check_common_passwords {
            true => COMMON_PASSWORDS.iter().map(|p| p.to_lowercase()).collect(),
            false => HashSet::new(),
        };

        PasswordPolicy {
            min_length: config.min_length,
            require_uppercase: config.require_uppercase,
            require_lowercase: config.require_lowercase,
            require_digits: config.require_digits,
            require_special: config.require_special,
            special_chars: config.special_chars.clone(),
            forbidden_words: config.forbidden_word_list(),
            blocklist,
        }
    }

    ///
    /// Check the plain text password doesn't violate this policy's format.
    ///
    /// The history of the password is not validated. This must be done separately.
    ///
    pub fn validate_pattern(&self, plain_text_password: &str) -> Result<(), GatehouseError> {

        if plain_text_password.chars().count() < self.min_length as usize {
            return Err(ErrorCode::PasswordTooShort
                .with_msg(&format!("passwords must be at least {} characters", self.min_length)))
        }

        if self.require_uppercase && !plain_text_password.chars().any(|c| c.is_uppercase()) {
            return Err(ErrorCode::NoUppercase
                .with_msg("a password must contain at least one uppercase letter"))
        }

        if self.require_lowercase && !plain_text_password.chars().any(|c| c.is_lowercase()) {
            return Err(ErrorCode::NoLowercase
                .with_msg("a password must contain at least one lowercase letter"))
        }

        if self.require_digits && !plain_text_password.chars().any(|c| c.is_numeric()) {
            return Err(ErrorCode::NoDigit
                .with_msg("a password must contain at least one digit"))
        }

        if self.require_special && !plain_text_password.chars().any(|c| self.special_chars.contains(c)) {
            return Err(ErrorCode::NoSpecialCharacter
                .with_msg("a password must contain at least one special character"))
        }

        let lowered = plain_text_password.to_lowercase();

        for word in &self.forbidden_words {
            if lowered.contains(word.as_str()) {
                return Err(ErrorCode::PasswordContainsForbiddenWord
                    .with_msg(&format!("the word '{}' is not allowed", word)))
            }
        }

        if self.blocklist.contains(&lowered) {
            return Err(ErrorCode::PasswordTooCommon
                .with_msg("that password is too common, please choose a stronger one"))
        }

        Ok(())
    }
}

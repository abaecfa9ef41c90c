use std::fmt::Write;
use std::env::VarError;
use config::ConfigError;
use serde::{Deserialize, Serialize};

///
/// The service configuration - initialised at start-up and immutable for the life
/// of the process.
///
/// Every knob can be overridden with an environment variable of the same name in
/// upper-case, e.g. MIN_LENGTH=12 or FORBIDDEN_WORDS=password,admin.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    pub min_length: u32,              // Minimum password length.
    pub require_uppercase: bool,      // Password must contain an upper-case letter.
    pub require_lowercase: bool,      // Password must contain a lower-case letter.
    pub require_digits: bool,         // Password must contain a digit.
    pub require_special: bool,        // Password must contain a character from special_chars.
    pub special_chars: String,        // The set of characters counted as 'special'.
    pub forbidden_words: String,      // Comma-separated words a password may not contain.
    pub check_common_passwords: bool, // Reject passwords on the common-password blocklist.
    pub history_size: u32,            // Number of previous password hashes to retain and refuse.
    pub max_login_attempts: u32,      // Failed logins before the account is locked.
    pub lockout_seconds: u32,         // How long a locked account stays locked.
    pub reset_timeout_seconds: u32,   // How long a reset code is redeemable for.
    pub pbkdf2_rounds: u32,           // Iteration count for the default hashing algorithm.
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            min_length: 10,
            require_uppercase: true,
            require_lowercase: true,
            require_digits: true,
            require_special: true,
            special_chars: String::from("!@#$%^&*()_+-=[]{}|;:,.<>?"),
            forbidden_words: String::from("password,admin,123456,qwerty"),
            check_common_passwords: true,
            history_size: 3,
            max_login_attempts: 3,
            lockout_seconds: 15 * 60,
            reset_timeout_seconds: 5 * 60,
            pbkdf2_rounds: 100_000,
        }
    }
}

impl Configuration {
    ///
    /// Load the service's configuration.
    ///
    pub fn from_env() -> Result<Configuration, ConfigError> {
        let mut cfg = config::Config::default();

        // Merge any environment variables with the same name as the struct fields.
        cfg.merge(config::Environment::new())?;

        // Set defaults for settings that were not specified.
        let defaults = Configuration::default();
        cfg.set_default("min_length", defaults.min_length as i64)?;
        cfg.set_default("require_uppercase", defaults.require_uppercase)?;
        cfg.set_default("require_lowercase", defaults.require_lowercase)?;
        cfg.set_default("require_digits", defaults.require_digits)?;
        cfg.set_default("require_special", defaults.require_special)?;
        cfg.set_default("special_chars", defaults.special_chars)?;
        cfg.set_default("forbidden_words", defaults.forbidden_words)?;
        cfg.set_default("check_common_passwords", defaults.check_common_passwords)?;
        cfg.set_default("history_size", defaults.history_size as i64)?;
        cfg.set_default("max_login_attempts", defaults.max_login_attempts as i64)?;
        cfg.set_default("lockout_seconds", defaults.lockout_seconds as i64)?;
        cfg.set_default("reset_timeout_seconds", defaults.reset_timeout_seconds as i64)?;
        cfg.set_default("pbkdf2_rounds", defaults.pbkdf2_rounds as i64)?;

        let config: Configuration = cfg.try_into()?;

        Ok(config)
    }

    ///
    /// The forbidden-word list, split and lower-cased for case-insensitive matching.
    ///
    pub fn forbidden_word_list(&self) -> Vec<String> {
        self.forbidden_words
            .split(',')
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect()
    }

    ///
    /// Pretty-print the config, one setting per line.
    ///
    pub fn fmt_console(&self) -> Result<String, crate::utils::errors::GatehouseError> {
        // Serialise to JSON so we have fields to iterate.
        let values = serde_json::to_value(&self)?;

        // Turn into a hashmap.
        let values = values.as_object().expect("No config props");

        // Sort by keys.
        let mut sorted: Vec<_> = values.iter().collect();
        sorted.sort_by_key(|a| a.0);

        let mut output = String::new();
        for (k, v) in sorted {
            writeln!(&mut output, "{:>23}: {}", k, v).unwrap();
        }

        Ok(output)
    }
}

///
/// If the specified environment variable is not set for this process, set it to the default value specified.
///
pub fn default_env(key: &str, value: &str) {
    if let Err(VarError::NotPresent) = std::env::var(key) {
        std::env::set_var(key, value);
    }
}

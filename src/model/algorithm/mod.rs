pub mod argon;
pub mod bcrypt;
pub mod pbkdf2;

use std::str::FromStr;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::utils::config::Configuration;
use crate::utils::errors::{ErrorCode, GatehouseError};

#[derive(Clone, Copy, Debug, Deserialize, Display, Serialize, PartialEq)]
pub enum Algorithm {
    Argon,
    BCrypt,
    PBKDF2,
}

///
/// Produces PHC strings for new credentials.
///
/// Verification never consults this - the salt and parameters are embedded in each
/// stored PHC string, so verify() is self-contained and old hashes keep working
/// after the hashing configuration changes.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialHasher {
    pub algorithm: Algorithm,
    pub argon: Option<argon::ArgonParams>,
    pub bcrypt: Option<bcrypt::BcryptParams>,
    pub pbkdf2: Option<pbkdf2::Pbkdf2Params>,
}

impl CredentialHasher {
    ///
    /// The default hasher - PBKDF2-SHA256 with the configured iteration count.
    ///
    pub fn from_config(config: &Configuration) -> Self {
        CredentialHasher {
            algorithm: Algorithm::PBKDF2,
            argon: None,
            bcrypt: None,
            pbkdf2: Some(pbkdf2::Pbkdf2Params { rounds: config.pbkdf2_rounds, dk_len: 32 }),
        }
    }

    ///
    /// Use the hashing algorithm to hash the password and build a PHC string.
    ///
    /// ref: https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md
    ///
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, GatehouseError> {
        match self.algorithm {
            Algorithm::Argon  => self.argon_params()?.hash_into_phc(plain_text_password),
            Algorithm::BCrypt => self.bcrypt_params()?.hash_into_phc(plain_text_password),
            Algorithm::PBKDF2 => self.pbkdf2_params()?.hash_into_phc(plain_text_password),
        }
    }

    fn argon_params(&self) -> Result<&argon::ArgonParams, GatehouseError> {
        self.argon.as_ref()
            .ok_or_else(|| ErrorCode::InvalidAlgorithmConfig.with_msg("Argon selected but no argon parameters supplied"))
    }

    fn bcrypt_params(&self) -> Result<&bcrypt::BcryptParams, GatehouseError> {
        self.bcrypt.as_ref()
            .ok_or_else(|| ErrorCode::InvalidAlgorithmConfig.with_msg("BCrypt selected but no bcrypt parameters supplied"))
    }

    fn pbkdf2_params(&self) -> Result<&pbkdf2::Pbkdf2Params, GatehouseError> {
        self.pbkdf2.as_ref()
            .ok_or_else(|| ErrorCode::InvalidAlgorithmConfig.with_msg("PBKDF2 selected but no pbkdf2 parameters supplied"))
    }
}

///
/// Validate if the plain_text_password matches the hashed password provided.
///
/// The algorithm is constructed and used from the PHC string provided.
///
pub fn verify(plain_text_password: &str, phc: &str) -> Result<bool, GatehouseError> {
    match select(phc)? {
        Algorithm::Argon  => argon::verify(phc, plain_text_password),
        Algorithm::BCrypt => bcrypt::verify(phc, plain_text_password),
        Algorithm::PBKDF2 => pbkdf2::verify(phc, plain_text_password),
    }
}

///
/// Parse the first part of the phc string and return the algorithm.
///
fn select(phc: &str) -> Result<Algorithm, GatehouseError> {
    let mut split = phc.split("$");
    split.next(); /* Skip first it's blank */

    match split.next() {
        Some(algorithm) => Algorithm::from_str(algorithm),
        None => Err(ErrorCode::InvalidPHCFormat.with_msg("The PHC is invalid, there's no algorithm")),
    }
}

impl FromStr for Algorithm {
    type Err = GatehouseError;

    fn from_str(input: &str) -> Result<Algorithm, Self::Err> {
        match input {
            "argon2i"  |
            "argon2d"  |
            "argon2id" => Ok(Algorithm::Argon),

            "2a" |
            "2b" |
            "2x" |
            "2y" => Ok(Algorithm::BCrypt),

            "pbkdf2-sha256" => Ok(Algorithm::PBKDF2),

            _ => Err(ErrorCode::InvalidPHCFormat.with_msg(&format!("algorithm {} is un-handled", input))),
        }
    }
}

use rand_core::OsRng;
use std::str::FromStr;
use std::convert::TryFrom;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{ErrorCode, GatehouseError};

#[derive(Clone, Copy, Debug, Deserialize, Display, Serialize, PartialEq)]
pub enum ArgonHashType {
    ARGON2D,
    ARGON2I,
    ARGON2ID
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArgonParams {
    pub parallelism: u32,
    pub memory_size_kb: u32,
    pub iterations: u32,
    pub version: u32,
    pub hash_type: ArgonHashType
}

pub fn verify(phc: &str, plain_text_password: &str) -> Result<bool, GatehouseError> {
    let parsed_hash = argon2::PasswordHash::new(&phc)?;
    match argon2::PasswordVerifier::verify_password(&argon2::Argon2::default(), plain_text_password.as_bytes(), &parsed_hash) {
        Ok(_)  => Ok(true),
        Err(_) => Ok(false),
    }
}

impl Default for ArgonParams {
    fn default() -> Self {
        ArgonParams {
            parallelism: 1,
            memory_size_kb: 1024 * 16,
            iterations: 1,
            version: 19,
            hash_type: ArgonHashType::ARGON2ID
        }
    }
}

impl ArgonParams {
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, GatehouseError> {
        let password = plain_text_password.as_bytes();
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);

        let argon2 = argon2::Argon2::new(
            argon2::Algorithm::default(),
            argon2::Version::try_from(self.version)?,
            argon2::Params::new(self.memory_size_kb, self.iterations, self.parallelism, None)?);

        // Hash password to PHC string ($argon2id$v=19$...)
        Ok(argon2::PasswordHasher::hash_password(&argon2, password, &salt)?.to_string())
    }
}

impl FromStr for ArgonHashType {
    type Err = GatehouseError;

    fn from_str(input: &str) -> Result<ArgonHashType, Self::Err> {
        match input {
            "argon2i"  => Ok(ArgonHashType::ARGON2I),
            "argon2d"  => Ok(ArgonHashType::ARGON2D),
            "argon2id" => Ok(ArgonHashType::ARGON2ID),
            _          => Err(ErrorCode::UnknownAlgorithmVariant.with_msg(&format!("Unknown argon variant {}", input))),
        }
    }
}

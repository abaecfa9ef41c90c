use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, Salt};
use pbkdf2::{Pbkdf2, password_hash::SaltString};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use crate::utils::errors::GatehouseError;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Pbkdf2Params {
    pub rounds: u32,
    pub dk_len: u32, // Derived key length in bytes.
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            rounds: 100_000, // Anything much lower is brute-forceable.
            dk_len: 32,
        }
    }
}

impl Pbkdf2Params {
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, GatehouseError> {
        let salt = SaltString::generate(&mut OsRng);
        let salt = Salt::new(salt.as_str())?;
        let params = pbkdf2::Params {
            rounds: self.rounds,
            output_length: self.dk_len as usize,
        };

        // Hash password to PHC string ($pbkdf2-sha256$...)
        Ok(Pbkdf2.hash_password_customized(
            plain_text_password.as_bytes(),
            None,
            None,
            params,
            salt)?.to_string())
    }
}

pub fn verify(phc: &str, plain_text_password: &str) -> Result<bool, GatehouseError> {
    let parsed_hash = PasswordHash::new(&phc)?;
    Ok(Pbkdf2.verify_password(plain_text_password.as_bytes(), &parsed_hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_hash_and_verify() -> Result<(), GatehouseError> {
        let params = Pbkdf2Params { rounds: 10, dk_len: 32 };
        let phc = params.hash_into_phc("wibble")?;

        assert!(phc.starts_with("$pbkdf2-sha256$"));
        assert_eq!(verify(&phc, "wibble")?, true);
        assert_eq!(verify(&phc, "wobble")?, false);
        Ok(())
    }

    #[test]
    fn test_the_configured_rounds_appear_in_the_phc() -> Result<(), GatehouseError> {
        let params = Pbkdf2Params { rounds: 123, dk_len: 32 };
        let phc = params.hash_into_phc("wibble")?;
        assert!(phc.contains("i=123"));
        Ok(())
    }
}

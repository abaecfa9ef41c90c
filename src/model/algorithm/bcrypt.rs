use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use crate::utils::errors::GatehouseError;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum BcryptVersion {
    TwoA,
    TwoB,
    TwoX,
    TwoY
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BcryptParams {
    pub version: BcryptVersion,
    pub cost: u32
}

pub fn verify(phc: &str, plain_text_password: &str) -> Result<bool, GatehouseError> {
    bcrypt::verify(plain_text_password, phc).map_err(GatehouseError::from)
}

impl Default for BcryptParams {
    fn default() -> Self {
        Self {
            version: BcryptVersion::TwoB,
            cost: bcrypt::DEFAULT_COST
        }
    }
}

impl BcryptParams {
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, GatehouseError> {
        // bcrypt wants exactly 16 salt bytes - borrow the PHC salt generator for them.
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let salt: String = salt.as_str().chars().take(16).collect();
        let hashed = bcrypt::hash_with_salt(plain_text_password, self.cost, salt.as_bytes())?;

        Ok(hashed.format_for_version(self.version.into()))
    }
}

impl From<BcryptVersion> for bcrypt::Version {
    fn from(version: BcryptVersion) -> Self {
        match version {
            BcryptVersion::TwoA => bcrypt::Version::TwoA,
            BcryptVersion::TwoB => bcrypt::Version::TwoB,
            BcryptVersion::TwoX => bcrypt::Version::TwoX,
            BcryptVersion::TwoY => bcrypt::Version::TwoY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_hash_and_verify() -> Result<(), GatehouseError> {
        let bcrypt = BcryptParams { cost: 4, ..BcryptParams::default() };
        let phc = bcrypt.hash_into_phc("wibble")?;

        assert_eq!(verify(&phc, "wibble")?, true);
        assert_eq!(verify(&phc, "wobble")?, false);
        Ok(())
    }
}

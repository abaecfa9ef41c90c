use rand::Rng;
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

pub mod config;
pub mod context;
pub mod errors;
pub mod time_provider;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const RESET_CODE_LEN: usize = 8;
const TOKEN_BYTES: usize = 32;

pub fn generate_id() -> String {
    Uuid::new_v4().to_hyphenated().to_string()
}

///
/// A short, human-typable one-time code, drawn from the OS random source.
///
/// Never derived from the email address or the clock - both are guessable.
///
pub fn generate_reset_code() -> String {
    let mut rng = OsRng;
    (0..RESET_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

///
/// An opaque, unguessable bearer token - used for both reset tokens and session tokens.
///
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    base64::encode_config(&bytes, base64::URL_SAFE_NO_PAD)
}

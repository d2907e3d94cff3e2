use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

/// Identity V3 format marker.
const FORMAT_MARKER: u8 = 0x01;
/// `KeyDerivationPrf.HMACSHA512` in ASP.NET Core Identity.
const PRF_HMAC_SHA512: u32 = 2;
pub const ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const SUBKEY_LEN: usize = 32;

/// Hashes a password in the ASP.NET Core Identity V3 layout so the auth
/// service can verify it:
/// `0x01 | prf (u32 BE) | iterations (u32 BE) | salt len (u32 BE) | salt | subkey`,
/// base64 encoded.
pub fn hash_password(plain_password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    encode_v3(plain_password, &salt, ITERATIONS)
}

fn encode_v3(plain_password: &str, salt: &[u8], iterations: u32) -> String {
    let mut subkey = [0u8; SUBKEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha512>(plain_password.as_bytes(), salt, iterations, &mut subkey);

    let mut output = Vec::with_capacity(13 + salt.len() + SUBKEY_LEN);
    output.push(FORMAT_MARKER);
    output.extend_from_slice(&PRF_HMAC_SHA512.to_be_bytes());
    output.extend_from_slice(&iterations.to_be_bytes());
    output.extend_from_slice(&(salt.len() as u32).to_be_bytes());
    output.extend_from_slice(salt);
    output.extend_from_slice(&subkey);

    STANDARD.encode(output)
}

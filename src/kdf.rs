use openssl::hash::MessageDigest;
use openssl::pkcs5::pbkdf2_hmac;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;

/// The number of iterations of PBKDF2 to perform on the wallet password.
pub const PBKDF2_ITERATIONS: u32 = 500_000;

/// AES-128 key length.
pub const KEY_LEN: usize = 16;

/// AES key derived from the wallet password. Cleared when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Derive a 16-byte key with PBKDF2-HMAC-SHA256.
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    let mut key = DerivedKey([0u8; KEY_LEN]);
    pbkdf2_hmac(
        password.as_bytes(),
        salt,
        iterations as usize,
        MessageDigest::sha256(),
        &mut key.0,
    )?;
    log::debug!("Derived {KEY_LEN}-byte key with {iterations} PBKDF2 iterations");
    log::trace!(
        "Derived key (hex): {}",
        key.0
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    );
    Ok(key)
}

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use openssl::rand::rand_bytes;

use crate::cbc::{decrypt_cbc, encrypt_cbc, unpad_lenient};
use crate::error::{Result, WalletError};
use crate::format::{
    IS_CORRECT_PASSWORD_IDENTIFIER, IV_LEN, SALT_LEN, WalletFormat, WalletLayout, assemble,
    has_identifier,
};
use crate::kdf::{PBKDF2_ITERATIONS, derive_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletOptions {
    pub format: WalletFormat,
    pub iterations: u32,
}

impl Default for WalletOptions {
    fn default() -> Self {
        WalletOptions {
            format: WalletFormat::Legacy,
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

/// Read a wallet file and return the decrypted payload text.
pub fn open_wallet(path: &Path, password: &str, options: WalletOptions) -> Result<String> {
    let mut data = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut data)?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());

    decrypt_wallet(&data, password, options)
}

/// Decrypt the bytes of a wallet file:
/// [header identifier] [salt] [iv, SeparateIv only] [AES-128-CBC ciphertext]
pub fn decrypt_wallet(data: &[u8], password: &str, options: WalletOptions) -> Result<String> {
    let layout = WalletLayout::parse(data, options.format)?;

    let key = derive_key(password, layout.salt, options.iterations)?;
    let decrypted = unpad_lenient(decrypt_cbc(&key, layout.iv, layout.ciphertext)?)?;

    if !has_identifier(&decrypted, IS_CORRECT_PASSWORD_IDENTIFIER) {
        log::warn!("Password identifier missing after decryption");
        return Err(WalletError::Authentication);
    }

    let mut payload = decrypted;
    payload.drain(..IS_CORRECT_PASSWORD_IDENTIFIER.len());
    Ok(String::from_utf8(payload)?)
}

/// Encrypt `plaintext` into a new wallet with a random salt (and IV).
pub fn encrypt_wallet(plaintext: &str, password: &str, options: WalletOptions) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    rand_bytes(&mut salt)?;
    if options.format == WalletFormat::SeparateIv {
        rand_bytes(&mut iv)?;
    }
    encrypt_wallet_with_salt(plaintext, password, &salt, &iv, options)
}

/// Like [`encrypt_wallet`] with caller-chosen salt and IV.
/// For [`WalletFormat::Legacy`] the `iv` argument is ignored and the salt is used.
pub fn encrypt_wallet_with_salt(
    plaintext: &str,
    password: &str,
    salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
    options: WalletOptions,
) -> Result<Vec<u8>> {
    let iv = match options.format {
        WalletFormat::Legacy => salt,
        WalletFormat::SeparateIv => iv,
    };

    let key = derive_key(password, salt, options.iterations)?;

    let mut payload =
        Vec::with_capacity(IS_CORRECT_PASSWORD_IDENTIFIER.len() + plaintext.len());
    payload.extend_from_slice(IS_CORRECT_PASSWORD_IDENTIFIER);
    payload.extend_from_slice(plaintext.as_bytes());

    let ciphertext = encrypt_cbc(&key, iv, &payload)?;
    Ok(assemble(options.format, salt, iv, &ciphertext))
}

/// Encrypt `plaintext` and write the wallet to `output_path`.
pub fn create_wallet(
    output_path: &Path,
    plaintext: &str,
    password: &str,
    options: WalletOptions,
) -> Result<()> {
    let wallet = encrypt_wallet(plaintext, password, options)?;

    let mut outfile = BufWriter::new(File::create(output_path)?);
    outfile.write_all(&wallet)?;
    outfile.flush()?;

    log::debug!(
        "Wrote {} byte {:?} wallet to {}",
        wallet.len(),
        options.format,
        output_path.display()
    );
    Ok(())
}

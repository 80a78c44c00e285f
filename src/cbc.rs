use openssl::symm::{Cipher, Crypter, Mode, encrypt};

use crate::error::{Result, WalletError};
use crate::format::{BLOCK_LEN, IV_LEN};
use crate::kdf::DerivedKey;

/// AES-128-CBC decrypt without letting OpenSSL check the padding.
///
/// The padding is removed by [`unpad_lenient`] afterwards. Any cipher failure
/// is reported as [`WalletError::Authentication`].
pub fn decrypt_cbc(key: &DerivedKey, iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::aes_128_cbc();

    let mut crypter = Crypter::new(cipher, Mode::Decrypt, key.as_bytes(), Some(iv.as_slice()))?;
    crypter.pad(false);

    let mut plaintext = vec![0; ciphertext.len() + cipher.block_size()];
    let mut count = crypter
        .update(ciphertext, &mut plaintext)
        .map_err(|_| WalletError::Authentication)?;
    count += crypter
        .finalize(&mut plaintext[count..])
        .map_err(|_| WalletError::Authentication)?;
    plaintext.truncate(count);

    log::debug!("[decrypt] {} bytes decrypted", plaintext.len());
    Ok(plaintext)
}

/// Drop the trailing `P` bytes, where `P` is the value of the last byte.
///
/// The removed bytes are not checked to all equal `P`, which is how existing
/// wallets have always been read. A `P` of zero or larger than the buffer
/// cannot come from a real wallet and is treated as a wrong password.
pub fn unpad_lenient(mut data: Vec<u8>) -> Result<Vec<u8>> {
    let pad = *data.last().ok_or(WalletError::Authentication)? as usize;
    if pad == 0 || pad > data.len() {
        log::warn!("Invalid padding length {pad} for {} decrypted bytes", data.len());
        return Err(WalletError::Authentication);
    }
    data.truncate(data.len() - pad);
    Ok(data)
}

/// AES-128-CBC encrypt with standard PKCS#7 padding.
pub fn encrypt_cbc(key: &DerivedKey, iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::aes_128_cbc();
    let ciphertext = encrypt(cipher, key.as_bytes(), Some(iv.as_slice()), plaintext)?;
    debug_assert_eq!(ciphertext.len() % BLOCK_LEN, 0);
    log::debug!("[encrypt] {} bytes encrypted", ciphertext.len());
    Ok(ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;
    use hex_literal::hex;

    fn test_key() -> DerivedKey {
        derive_key("cbc-test", &[3u8; 16], 1000).unwrap()
    }

    #[test]
    fn test_unpad_lenient_standard_padding() {
        let data = b"TEXT\x04\x04\x04\x04".to_vec();
        assert_eq!(unpad_lenient(data).unwrap(), b"TEXT");
    }

    #[test]
    fn test_unpad_lenient_ignores_padding_contents() {
        // Only the last byte matters
        let data = b"TEXTyz\x03".to_vec();
        assert_eq!(unpad_lenient(data).unwrap(), b"TEXT");

        let data = b"TEXTxyz\x04".to_vec();
        assert_eq!(unpad_lenient(data).unwrap(), b"TEXT");
    }

    #[test]
    fn test_unpad_lenient_zero_is_authentication_error() {
        let data = b"TEXT\x00".to_vec();
        assert!(matches!(
            unpad_lenient(data),
            Err(WalletError::Authentication)
        ));
    }

    #[test]
    fn test_unpad_lenient_single_byte() {
        assert_eq!(unpad_lenient(vec![0x01]).unwrap(), b"");
        assert!(matches!(
            unpad_lenient(vec![0x00]),
            Err(WalletError::Authentication)
        ));
    }

    #[test]
    fn test_unpad_lenient_never_panics() {
        assert!(matches!(
            unpad_lenient(Vec::new()),
            Err(WalletError::Authentication)
        ));
        assert!(matches!(
            unpad_lenient(vec![0xAA, 0x05]),
            Err(WalletError::Authentication)
        ));
        for last in 0..=u8::MAX {
            let mut data = vec![0u8; 16];
            data[15] = last;
            let _ = unpad_lenient(data);
        }
    }

    #[test]
    fn test_encrypt_then_decrypt_keeps_pkcs7_padding() {
        let key = test_key();
        let iv = [5u8; IV_LEN];

        let ciphertext = encrypt_cbc(&key, &iv, b"hello").unwrap();
        assert_eq!(ciphertext.len(), BLOCK_LEN);

        let raw = decrypt_cbc(&key, &iv, &ciphertext).unwrap();
        assert_eq!(raw.len(), BLOCK_LEN);
        assert_eq!(&raw[..5], b"hello");
        assert!(raw[5..].iter().all(|&b| b == 11));

        assert_eq!(unpad_lenient(raw).unwrap(), b"hello");
    }

    #[test]
    fn test_full_block_plaintext_gets_extra_block() {
        let key = test_key();
        let iv = [0u8; IV_LEN];

        let ciphertext = encrypt_cbc(&key, &iv, &[0x42; BLOCK_LEN]).unwrap();
        assert_eq!(ciphertext.len(), 2 * BLOCK_LEN);

        let plaintext = unpad_lenient(decrypt_cbc(&key, &iv, &ciphertext).unwrap()).unwrap();
        assert_eq!(plaintext, [0x42u8; BLOCK_LEN]);
    }

    #[test]
    fn test_decrypt_misaligned_ciphertext_is_authentication_error() {
        let key = test_key();
        let result = decrypt_cbc(&key, &[0u8; IV_LEN], &[0u8; 17]);
        assert!(matches!(result, Err(WalletError::Authentication)));
    }

    #[test]
    fn test_known_ciphertext() {
        let key = derive_key("password", &[0u8; 16], crate::kdf::PBKDF2_ITERATIONS).unwrap();
        let ciphertext = hex!(
            "548a985c82fabdfd109522eb185dc787"
            "d0c91072d751ce4372944816cc12c8aa"
            "72e493f2d9abcb52005bb3317ea305e8"
        );

        let raw = decrypt_cbc(&key, &[0u8; IV_LEN], &ciphertext).unwrap();
        let plaintext = unpad_lenient(raw).unwrap();
        assert_eq!(plaintext, b"You're a big guy.\nFor you.{\"hello\":\"world\"}");
    }
}

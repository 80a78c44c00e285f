use crate::error::{Result, WalletError};

/// Stored in clear at the start of every wallet file.
/// [header identifier(64 bytes)] [salt(16 bytes)] [iv(16 bytes, SeparateIv only)] [ciphertext ...]
pub const IS_A_WALLET_IDENTIFIER: &[u8; 64] =
    b"If I pull that off, will you die?\nIt would be extremely painful.";

/// Encrypted at the start of the payload; seeing it after decryption means the password was right.
pub const IS_CORRECT_PASSWORD_IDENTIFIER: &[u8; 26] = b"You're a big guy.\nFor you.";

pub const SALT_LEN: usize = 16;
pub const IV_LEN: usize = 16;
pub const BLOCK_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletFormat {
    /// The salt doubles as the CBC IV. Every existing wallet file uses this.
    #[default]
    Legacy,
    /// An independent random IV is stored right after the salt.
    SeparateIv,
}

impl WalletFormat {
    /// Bytes between the header identifier and the ciphertext.
    pub fn preamble_len(self) -> usize {
        match self {
            WalletFormat::Legacy => SALT_LEN,
            WalletFormat::SeparateIv => SALT_LEN + IV_LEN,
        }
    }
}

/// Borrowed view over the sections of a wallet file.
#[derive(Debug)]
pub struct WalletLayout<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub iv: &'a [u8; IV_LEN],
    pub ciphertext: &'a [u8],
}

/// True when `input` starts with `identifier`.
pub fn has_identifier(input: &[u8], identifier: &[u8]) -> bool {
    input.len() >= identifier.len() && &input[..identifier.len()] == identifier
}

impl<'a> WalletLayout<'a> {
    /// Split a wallet file into salt, IV and ciphertext.
    ///
    /// Runs before any key derivation.
    pub fn parse(data: &'a [u8], format: WalletFormat) -> Result<Self> {
        if !has_identifier(data, IS_A_WALLET_IDENTIFIER) {
            log::warn!("Wallet identifier magic bytes are missing");
            return Err(WalletError::format(
                "data is missing wallet identifier magic bytes",
            ));
        }
        let rest = &data[IS_A_WALLET_IDENTIFIER.len()..];

        if rest.len() < format.preamble_len() {
            return Err(WalletError::format(format!(
                "wallet is corrupted, need {} bytes of salt/iv but only {} remain",
                format.preamble_len(),
                rest.len()
            )));
        }

        let (salt, rest) = split_array::<SALT_LEN>(rest)?;
        let (iv, ciphertext) = match format {
            WalletFormat::Legacy => (salt, rest),
            WalletFormat::SeparateIv => split_array::<IV_LEN>(rest)?,
        };

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(WalletError::format(format!(
                "ciphertext length {} is not a positive multiple of {BLOCK_LEN}",
                ciphertext.len()
            )));
        }

        log::debug!(
            "Parsed {format:?} wallet: {} bytes of ciphertext",
            ciphertext.len()
        );
        Ok(WalletLayout {
            salt,
            iv,
            ciphertext,
        })
    }
}

fn split_array<const N: usize>(input: &[u8]) -> Result<(&[u8; N], &[u8])> {
    let (head, tail) = input
        .split_first_chunk::<N>()
        .ok_or_else(|| WalletError::format("wallet is truncated"))?;
    Ok((head, tail))
}

/// Assemble `header identifier || salt || [iv] || ciphertext`.
pub fn assemble(
    format: WalletFormat,
    salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut packed = Vec::with_capacity(
        IS_A_WALLET_IDENTIFIER.len() + format.preamble_len() + ciphertext.len(),
    );
    packed.extend_from_slice(IS_A_WALLET_IDENTIFIER);
    packed.extend_from_slice(salt);
    if format == WalletFormat::SeparateIv {
        packed.extend_from_slice(iv);
    }
    packed.extend_from_slice(ciphertext);
    packed
}

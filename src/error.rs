use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error)]
pub enum WalletError {
    /// The input is not a wallet container, or it is truncated.
    #[error("not a wallet file: {0}")]
    Format(String),

    /// Decryption produced something other than a wallet payload.
    /// Padding, cipher and identifier failures all map here.
    #[error("wrong password")]
    Authentication,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("crypto backend failure: {0}")]
    Crypto(#[from] openssl::error::ErrorStack),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl WalletError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        WalletError::Format(msg.into())
    }
}

pub mod cbc;
pub mod cli;
pub mod error;
pub mod format;
pub mod kdf;
pub mod logger;
pub mod payload;
pub mod wallet;

pub use error::{Result, WalletError};
pub use format::WalletFormat;
pub use payload::{RenderMode, render};
pub use wallet::{
    WalletOptions, create_wallet, decrypt_wallet, encrypt_wallet, encrypt_wallet_with_salt,
    open_wallet,
};

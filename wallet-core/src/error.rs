use thiserror::Error;

pub use crate::codec::{DecodeError, EncodeError, RegistryError};

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Invalid mnemonic!")]
    InvalidMnemonic,

    #[error("Entropy source unavailable: {0}")]
    EntropySource(String),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Malformed transfer item '{item}': {reason}")]
    MalformedTransferItem { item: String, reason: String },

    #[error("Unbalanced transfer for denom '{denom}': senders {senders}, receivers {receivers}")]
    UnbalancedTransfer {
        denom: String,
        senders: String,
        receivers: String,
    },

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("Malformed key text: {0}")]
    MalformedKeyText(String),

    #[error("Encode Error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Type registry Error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration Error: {0}")]
    Config(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

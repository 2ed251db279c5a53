// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic**: BIP-39 phrase (12/24 words) và seed qua [`WalletMnemonic`].
//! - **Key Derivation**: seed -> ed25519 key pair qua [`KeyDeriver`].
//! - **Key Pair**: ký, verify và export private key qua [`KeyPair`].

pub mod key_deriver;
pub mod keypair;
pub mod mnemonic;

// Re-exports cho API gọn hơn
pub use key_deriver::{Ed25519Deriver, KeyDeriver};
pub use keypair::{KeyPair, PublicKey};
pub use mnemonic::{EntropyBits, PassphrasePolicy, WalletMnemonic, LEGACY_DEFAULT_PASSPHRASE};

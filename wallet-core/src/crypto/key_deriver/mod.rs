// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Ed25519, không HD path
//
// Kiến trúc:
//
// ┌──────────────────────────────────────────┐
// │  Mnemonic + passphrase (policy applied)  │
// │                    │ PBKDF2-HMAC-SHA512  │
// │                    ▼                     │
// │  Seed (64 bytes)                         │
// │                    │ leading 32 bytes    │
// │                    ▼                     │
// │  ed25519 secret ──► public key ──► addr  │
// └──────────────────────────────────────────┘

pub mod ed25519;

pub use ed25519::Ed25519Deriver;

use crate::crypto::keypair::KeyPair;
use crate::crypto::mnemonic::{PassphrasePolicy, WalletMnemonic};
use crate::error::WalletResult;

/// Entry point: secret -> key pair.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Seed -> key pair, deterministic. Không path, không index.
    pub fn derive_from_seed(seed: &[u8]) -> WalletResult<KeyPair> {
        let secret = Ed25519Deriver::derive(seed)?;
        Ok(KeyPair::from_secret(&secret))
    }

    /// Mnemonic -> seed (policy applied) -> key pair.
    pub fn derive_from_mnemonic(
        mnemonic: &WalletMnemonic,
        passphrase: &str,
        policy: &PassphrasePolicy,
    ) -> WalletResult<KeyPair> {
        let seed = mnemonic.to_seed_with_policy(passphrase, policy);
        Self::derive_from_seed(&*seed)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_derive_is_deterministic() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        let policy = PassphrasePolicy::Standard;
        let k1 = KeyDeriver::derive_from_mnemonic(&mnemonic, "", &policy).unwrap();
        let k2 = KeyDeriver::derive_from_mnemonic(&mnemonic, "", &policy).unwrap();
        assert_eq!(k1.public_key(), k2.public_key());
        assert_eq!(&*k1.to_private_bytes(), &*k2.to_private_bytes());
    }

    #[test]
    fn test_passphrase_changes_key() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        let policy = PassphrasePolicy::Standard;
        let plain = KeyDeriver::derive_from_mnemonic(&mnemonic, "", &policy).unwrap();
        let salted = KeyDeriver::derive_from_mnemonic(&mnemonic, "extra", &policy).unwrap();
        assert_ne!(plain.public_key(), salted.public_key());
        assert_ne!(plain.address(), salted.address());
    }

    #[test]
    fn test_policy_changes_key_for_empty_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        let standard =
            KeyDeriver::derive_from_mnemonic(&mnemonic, "", &PassphrasePolicy::Standard).unwrap();
        let legacy =
            KeyDeriver::derive_from_mnemonic(&mnemonic, "", &PassphrasePolicy::legacy()).unwrap();
        assert_ne!(standard.address(), legacy.address());
    }

    #[test]
    fn test_derive_from_seed_rejects_short_seed() {
        assert!(KeyDeriver::derive_from_seed(&[0u8; 16]).is_err());
    }
}

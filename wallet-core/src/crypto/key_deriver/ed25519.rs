// wallet-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation - một account cho mỗi seed
//
// Không có derivation path: 32 bytes đầu của BIP-39 seed được dùng trực tiếp
// làm ed25519 secret key.

use crate::error::{CryptoError, WalletError, WalletResult};
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

/// Ed25519 Key Deriver
///
/// # Security
/// - Secret được bọc trong `Zeroizing`
/// - Không giữ state trung gian
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    /// Length of an ed25519 secret key.
    pub const SECRET_LEN: usize = 32;

    /// Lấy [`Self::SECRET_LEN`] bytes đầu của `seed` làm secret key.
    ///
    /// Pure function: không I/O, không random.
    pub fn derive(seed: &[u8]) -> WalletResult<Zeroizing<[u8; 32]>> {
        let head = seed.get(..Self::SECRET_LEN).ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Seed too short: need at least {} bytes, got {}",
                Self::SECRET_LEN,
                seed.len()
            )))
        })?;

        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(head);
        Ok(secret)
    }

    /// Tạo dalek `SigningKey` từ secret đã derive.
    pub fn signing_key(secret: &[u8; 32]) -> SigningKey {
        SigningKey::from_bytes(secret)
    }
}

// =============================================================================
// TESTS
// =============================================================================

// wallet-core/src/crypto/keypair.rs
//
// Ed25519 Key Pair & Public Key
// Private key khi export: 64 bytes = secret (32) || public (32).

use crate::chains::qos::address::Address;
use crate::codec::{BinaryDecode, BinaryEncode, DecodeError, Decoder, EncodeError, Encoder, Registered};
use crate::crypto::key_deriver::Ed25519Deriver;
use crate::error::{CryptoError, WalletError, WalletResult};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const PRIVATE_KEY_LEN: usize = 64;
pub const SIGNATURE_LEN: usize = 64;

// =============================================================================
// PUBLIC KEY
// =============================================================================

/// Ed25519 public key, luôn là point hợp lệ trên curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        let raw: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "public key must be {} bytes, got {}",
                PUBLIC_KEY_LEN,
                bytes.len()
            )))
        })?;
        VerifyingKey::from_bytes(&raw).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "not an ed25519 point: {}",
                e
            )))
        })?;
        Ok(Self(raw))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Chain address of this key.
    #[inline]
    pub fn address(&self) -> Address {
        Address::from_public_key(self)
    }

    /// Verify chữ ký ed25519. Input sai format chỉ trả về false.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        verifying.verify(message, &signature).is_ok()
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey(")?;
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl Registered for PublicKey {
    const TYPE_NAME: &'static str = "tendermint/PubKeyEd25519";
}

impl BinaryEncode for PublicKey {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError> {
        enc.bytes_field(1, &self.0);
        Ok(())
    }
}

impl BinaryDecode for PublicKey {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let raw: [u8; PUBLIC_KEY_LEN] = dec.array_field(1)?;
        Self::from_bytes(&raw).map_err(|e| DecodeError::InvalidValue(e.to_string()))
    }
}

// =============================================================================
// KEY PAIR
// =============================================================================

/// Ed25519 signing key + public key.
///
/// # Security
/// - **ZeroizeOnDrop**: `SigningKey` tự động ghi đè bằng 0 khi drop
/// - **No Debug Leak**: `Debug` chỉ hiển thị public key
#[derive(Clone)]
pub struct KeyPair {
    signing: SigningKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    pub fn from_secret(secret: &[u8; 32]) -> Self {
        Self {
            signing: Ed25519Deriver::signing_key(secret),
        }
    }

    /// Import private key bytes.
    ///
    /// Nhận dạng export 64 bytes (nửa public phải khớp với secret) hoặc
    /// secret 32 bytes.
    pub fn from_private_bytes(bytes: &[u8]) -> WalletResult<Self> {
        match bytes.len() {
            PRIVATE_KEY_LEN => {
                let mut raw = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
                raw.copy_from_slice(bytes);
                let signing = SigningKey::from_keypair_bytes(&raw).map_err(|e| {
                    WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                        "public half does not match secret: {}",
                        e
                    )))
                })?;
                Ok(Self { signing })
            }
            32 => {
                let mut raw = Zeroizing::new([0u8; 32]);
                raw.copy_from_slice(bytes);
                Ok(Self::from_secret(&raw))
            }
            n => Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "private key must be 32 or {} bytes, got {}",
                PRIVATE_KEY_LEN, n
            )))),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing.verifying_key().to_bytes())
    }

    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Dạng export 64 bytes. Chỉ dùng khi export tường minh.
    pub fn to_private_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        Zeroizing::new(self.signing.to_keypair_bytes())
    }

    /// Ký `message` bằng ed25519, deterministic với cùng một key.
    pub fn sign(&self, message: &[u8]) -> WalletResult<[u8; SIGNATURE_LEN]> {
        self.signing
            .try_sign(message)
            .map(|sig| sig.to_bytes())
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))
    }
}

// =============================================================================
// TESTS
// =============================================================================

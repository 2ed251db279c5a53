// wallet-core/src/chains/qos/address.rs
//
// Account Address - SHA-256 của public key, cắt 20 bytes, dạng text Bech32
//
// Flow:  Public Key (32B) → SHA-256 → first 20 bytes → Bech32("address", ...)

use crate::crypto::keypair::PublicKey;
use crate::error::{WalletError, WalletResult};
use bech32::{FromBase32, ToBase32, Variant};
use sha2::{Digest, Sha256};

pub const ADDRESS_LEN: usize = 20;

/// Human-readable part (HRP) cho account address.
pub const DEFAULT_ADDRESS_PREFIX: &str = "address";

/// Độ dài tối đa của chuỗi Bech32 (tính cả HRP và checksum).
const MAX_BECH32_LEN: usize = 90;

/// Account address 20 bytes.
///
/// Chỉ tạo được từ [`PublicKey`] hoặc bằng cách decode address text hợp lệ.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = Sha256::digest(public_key.as_bytes());
        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash[..ADDRESS_LEN]);
        Self(address)
    }

    /// Raw bytes từ nguồn đã validate (codec, Bech32).
    pub(crate) fn from_raw(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// `"address1..."` style text.
    pub fn to_bech32(&self, prefix: &str) -> WalletResult<String> {
        encode_address(prefix, &self.0)
    }

    /// Parse address text, yêu cầu đúng `prefix` và payload 20 bytes.
    pub fn from_bech32(prefix: &str, text: &str) -> WalletResult<Self> {
        let bytes = decode_address(prefix, text)?;
        let raw: [u8; ADDRESS_LEN] = bytes.as_slice().try_into().map_err(|_| {
            WalletError::InvalidAddress(format!(
                "expected {} address bytes, got {}",
                ADDRESS_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    #[inline]
    pub fn is_valid(prefix: &str, text: &str) -> bool {
        Self::from_bech32(prefix, text).is_ok()
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address(")?;
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

// =============================================================================
// BECH32
// =============================================================================

/// Bech32 encode bytes với prefix cho trước.
pub fn encode_address(prefix: &str, bytes: &[u8]) -> WalletResult<String> {
    let text = bech32::encode(prefix, bytes.to_base32(), Variant::Bech32)
        .map_err(|e| WalletError::InvalidAddress(format!("cannot encode under '{}': {}", prefix, e)))?;
    if text.len() > MAX_BECH32_LEN {
        return Err(WalletError::InvalidAddress(format!(
            "encoded length {} exceeds {}",
            text.len(),
            MAX_BECH32_LEN
        )));
    }
    Ok(text)
}

/// Decode Bech32, kiểm tra prefix, checksum và variant (Bech32m bị từ chối).
pub fn decode_address(prefix: &str, text: &str) -> WalletResult<Vec<u8>> {
    if text.len() > MAX_BECH32_LEN {
        return Err(WalletError::InvalidAddress(format!(
            "'{}' is longer than {} characters",
            text, MAX_BECH32_LEN
        )));
    }

    let (hrp, data, variant) =
        bech32::decode(text).map_err(|e| WalletError::InvalidAddress(format!("'{}': {}", text, e)))?;

    if hrp != prefix {
        return Err(WalletError::InvalidAddress(format!(
            "'{}': expected prefix '{}', found '{}'",
            text, prefix, hrp
        )));
    }
    if variant != Variant::Bech32 {
        return Err(WalletError::InvalidAddress(format!(
            "'{}': bech32m is not accepted",
            text
        )));
    }

    Vec::<u8>::from_base32(&data).map_err(|e| WalletError::InvalidAddress(format!("'{}': {}", text, e)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address::from_raw([
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13,
        ])
    }

    #[test]
    fn test_bech32_roundtrip() {
        let text = sample().to_bech32(DEFAULT_ADDRESS_PREFIX).unwrap();
        assert!(text.starts_with("address1"));
        assert_eq!(
            Address::from_bech32(DEFAULT_ADDRESS_PREFIX, &text).unwrap(),
            sample()
        );
    }

    #[test]
    fn test_uppercase_text_accepted() {
        let text = sample().to_bech32(DEFAULT_ADDRESS_PREFIX).unwrap();
        let upper = text.to_uppercase();
        assert_eq!(
            Address::from_bech32(DEFAULT_ADDRESS_PREFIX, &upper).unwrap(),
            sample()
        );
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let text = sample().to_bech32("cosmos").unwrap();
        assert!(!Address::is_valid(DEFAULT_ADDRESS_PREFIX, &text));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let mut text = sample().to_bech32(DEFAULT_ADDRESS_PREFIX).unwrap();
        let last = text.pop().unwrap();
        text.push(if last == 'q' { 'p' } else { 'q' });
        assert!(matches!(
            Address::from_bech32(DEFAULT_ADDRESS_PREFIX, &text),
            Err(WalletError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_wrong_payload_length_rejected() {
        let text = encode_address(DEFAULT_ADDRESS_PREFIX, &[1u8; 32]).unwrap();
        assert!(decode_address(DEFAULT_ADDRESS_PREFIX, &text).is_ok());
        assert!(Address::from_bech32(DEFAULT_ADDRESS_PREFIX, &text).is_err());
    }

    #[test]
    fn test_bech32m_rejected() {
        let text = bech32::encode(
            DEFAULT_ADDRESS_PREFIX,
            sample().as_bytes().to_base32(),
            Variant::Bech32m,
        )
        .unwrap();
        assert!(!Address::is_valid(DEFAULT_ADDRESS_PREFIX, &text));
    }

    #[test]
    fn test_invalid_prefix_and_length_rejected() {
        // Characters outside the printable range are not a valid prefix.
        assert!(encode_address("bad prefix\u{7f}", &[1u8; 20]).is_err());
        assert!(encode_address("", &[1u8; 20]).is_err());
        // Payload too long for the 90 character limit.
        assert!(encode_address(DEFAULT_ADDRESS_PREFIX, &[1u8; 64]).is_err());
        assert!(!Address::is_valid(DEFAULT_ADDRESS_PREFIX, "not an address"));
        assert!(!Address::is_valid(DEFAULT_ADDRESS_PREFIX, ""));
    }
}

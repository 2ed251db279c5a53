// wallet-core/src/chains/qos/key_text.rs
//
// Typed key text: {"type": "<scheme>", "value": "<base64>"}
//
// Luôn render bằng serde_json từ `TypedKeyText`, KHÔNG BAO GIỜ ghép chuỗi JSON
// bằng tay với input của caller.

use crate::crypto::keypair::{KeyPair, PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use crate::error::{WalletError, WalletResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Các loại key hỗ trợ trong typed key text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    PubKeyEd25519,
    PrivKeyEd25519,
}

impl KeyKind {
    pub const fn type_name(self) -> &'static str {
        match self {
            KeyKind::PubKeyEd25519 => "tendermint/PubKeyEd25519",
            KeyKind::PrivKeyEd25519 => "tendermint/PrivKeyEd25519",
        }
    }

    /// Raw byte length carried by this kind.
    pub const fn raw_len(self) -> usize {
        match self {
            KeyKind::PubKeyEd25519 => PUBLIC_KEY_LEN,
            KeyKind::PrivKeyEd25519 => PRIVATE_KEY_LEN,
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        [KeyKind::PubKeyEd25519, KeyKind::PrivKeyEd25519]
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }
}

#[derive(Serialize, Deserialize)]
struct TypedKeyText {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

// =============================================================================
// GENERIC ENCODE / DECODE
// =============================================================================

/// Chỉ phần `value` (base64), hiển thị cho user cạnh address.
pub fn key_value(kind: KeyKind, raw: &[u8]) -> WalletResult<String> {
    check_len(kind, raw.len())?;
    Ok(STANDARD.encode(raw))
}

pub fn encode_typed_key(kind: KeyKind, raw: &[u8]) -> WalletResult<String> {
    let text = TypedKeyText {
        kind: kind.type_name().to_string(),
        value: key_value(kind, raw)?,
    };
    serde_json::to_string(&text).map_err(|e| WalletError::MalformedKeyText(e.to_string()))
}

/// Ngược lại của [`encode_typed_key`].
///
/// # Errors
/// - [`WalletError::UnsupportedKeyType`]: `type` không hỗ trợ
/// - [`WalletError::MalformedKeyText`]: JSON lỗi, base64 lỗi hoặc sai độ dài
pub fn decode_typed_key(text: &str) -> WalletResult<(KeyKind, Zeroizing<Vec<u8>>)> {
    let parsed: TypedKeyText =
        serde_json::from_str(text).map_err(|e| WalletError::MalformedKeyText(e.to_string()))?;
    decode_parts(&parsed)
}

fn decode_parts(parsed: &TypedKeyText) -> WalletResult<(KeyKind, Zeroizing<Vec<u8>>)> {
    let kind = KeyKind::from_type_name(&parsed.kind)
        .ok_or_else(|| WalletError::UnsupportedKeyType(parsed.kind.clone()))?;
    let raw = Zeroizing::new(
        STANDARD
            .decode(parsed.value.trim())
            .map_err(|e| WalletError::MalformedKeyText(format!("value is not base64: {}", e)))?,
    );
    check_len(kind, raw.len())?;
    Ok((kind, raw))
}

fn check_len(kind: KeyKind, len: usize) -> WalletResult<()> {
    if len != kind.raw_len() {
        return Err(WalletError::MalformedKeyText(format!(
            "{} expects {} bytes, got {}",
            kind.type_name(),
            kind.raw_len(),
            len
        )));
    }
    Ok(())
}

// =============================================================================
// KEY-SPECIFIC HELPERS
// =============================================================================

pub fn encode_public_key(public_key: &PublicKey) -> WalletResult<String> {
    encode_typed_key(KeyKind::PubKeyEd25519, public_key.as_bytes())
}

/// Export private key. Kết quả là secret, xử lý cẩn thận.
pub fn encode_private_key(pair: &KeyPair) -> WalletResult<Zeroizing<String>> {
    encode_typed_key(KeyKind::PrivKeyEd25519, &*pair.to_private_bytes()).map(Zeroizing::new)
}

pub fn decode_public_key(text: &str) -> WalletResult<PublicKey> {
    match decode_typed_key(text)? {
        (KeyKind::PubKeyEd25519, raw) => PublicKey::from_bytes(&raw),
        (other, _) => Err(WalletError::UnsupportedKeyType(format!(
            "expected {}, found {}",
            KeyKind::PubKeyEd25519.type_name(),
            other.type_name()
        ))),
    }
}

pub fn decode_private_key(text: &str) -> WalletResult<KeyPair> {
    match decode_typed_key(text)? {
        (KeyKind::PrivKeyEd25519, raw) => KeyPair::from_private_bytes(&raw),
        (other, _) => Err(WalletError::UnsupportedKeyType(format!(
            "expected {}, found {}",
            KeyKind::PrivKeyEd25519.type_name(),
            other.type_name()
        ))),
    }
}

/// Import private key từ base64 value (chỉ phần `value`).
pub fn import_private_key(value: &str) -> WalletResult<KeyPair> {
    let parsed = TypedKeyText {
        kind: KeyKind::PrivKeyEd25519.type_name().to_string(),
        value: value.to_string(),
    };
    let (_, raw) = decode_parts(&parsed)?;
    KeyPair::from_private_bytes(&raw)
}

// =============================================================================
// TESTS
// =============================================================================

// wallet-core/src/chains/qos/signer.rs
//
// Transfer Signer - Offline Signing, một signer
//
// Unsigned ──compute sign-bytes──► Prepared ──sign + attach──► Signed (TxStd)
//
// Sign-bytes = canonical encoding của `SignPayload {tx, gas, chain_id, nonce}`.
// Chain ID chống replay giữa các ledger, nonce chống replay trong cùng ledger.

use crate::chains::qos::address::Address;
use crate::chains::qos::transfer::TxTransfer;
use crate::codec::{
    BinaryDecode, BinaryEncode, Codec, DecodeError, Decoder, EncodeError, Encoder, Registered,
};
use crate::crypto::keypair::{KeyPair, PublicKey, SIGNATURE_LEN};
use crate::error::WalletResult;
use num_bigint::BigUint;

// =============================================================================
// WIRE SHAPES
// =============================================================================

/// Một chữ ký đính kèm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub pubkey: PublicKey,
    pub signature: Vec<u8>,
    pub nonce: u64,
}

impl BinaryEncode for Signature {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError> {
        enc.registered_field(1, &self.pubkey)?;
        enc.bytes_field(2, &self.signature);
        enc.uvarint_field(3, self.nonce);
        Ok(())
    }
}

impl BinaryDecode for Signature {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            pubkey: dec.registered_field(1)?,
            signature: dec.bytes_field(2)?,
            nonce: dec.uvarint_field(3)?,
        })
    }
}

/// Shape chính xác được encode rồi ký.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPayload {
    pub tx: TxTransfer,
    pub gas: BigUint,
    pub chain_id: String,
    pub nonce: u64,
}

impl Registered for SignPayload {
    const TYPE_NAME: &'static str = "qbase/txs/signpayload";
}

impl BinaryEncode for SignPayload {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError> {
        enc.registered_field(1, &self.tx)?;
        enc.biguint_field(2, &self.gas);
        enc.string_field(3, &self.chain_id);
        enc.uvarint_field(4, self.nonce);
        Ok(())
    }
}

impl BinaryDecode for SignPayload {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tx: dec.registered_field(1)?,
            gas: dec.biguint_field(2)?,
            chain_id: dec.string_field(3)?,
            nonce: dec.uvarint_field(4)?,
        })
    }
}

/// Transaction đã ký, sẵn sàng broadcast. Read-only sau khi tạo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStd {
    tx: TxTransfer,
    signatures: Vec<Signature>,
    chain_id: String,
    max_gas: BigUint,
}

impl TxStd {
    #[inline]
    pub fn transaction(&self) -> &TxTransfer {
        &self.tx
    }

    #[inline]
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    #[inline]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    #[inline]
    pub fn gas(&self) -> &BigUint {
        &self.max_gas
    }

    /// Mọi chữ ký phải verify được trên sign-bytes dựng lại từ transaction này
    /// và nonce của chính chữ ký đó.
    pub fn verify(&self, codec: &Codec<'_>) -> WalletResult<bool> {
        if self.signatures.is_empty() {
            return Ok(false);
        }
        for sig in &self.signatures {
            let bytes = compute_sign_bytes(codec, &self.tx, &self.max_gas, &self.chain_id, sig.nonce)?;
            if !sig.pubkey.verify(&bytes, &sig.signature) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Registered for TxStd {
    const TYPE_NAME: &'static str = "qbase/txs/stdtx";
}

impl BinaryEncode for TxStd {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError> {
        enc.registered_field(1, &self.tx)?;
        enc.seq_field(2, &self.signatures)?;
        enc.string_field(3, &self.chain_id);
        enc.biguint_field(4, &self.max_gas);
        Ok(())
    }
}

impl BinaryDecode for TxStd {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tx: dec.registered_field(1)?,
            signatures: dec.seq_field(2)?,
            chain_id: dec.string_field(3)?,
            max_gas: dec.biguint_field(4)?,
        })
    }
}

// =============================================================================
// PIPELINE STEPS
// =============================================================================

/// Canonical bytes mà chữ ký bao phủ.
///
/// Lỗi encode ở bất kỳ phần nào => dừng, không ký gì cả.
pub fn compute_sign_bytes(
    codec: &Codec<'_>,
    tx: &TxTransfer,
    gas: &BigUint,
    chain_id: &str,
    nonce: u64,
) -> WalletResult<Vec<u8>> {
    let payload = SignPayload {
        tx: tx.clone(),
        gas: gas.clone(),
        chain_id: chain_id.to_string(),
        nonce,
    };
    let bytes = codec.encode(&payload)?;
    tracing::debug!(chain_id, nonce, len = bytes.len(), "computed sign bytes");
    Ok(bytes)
}

/// ed25519 signature over sign-bytes.
pub fn sign(keypair: &KeyPair, sign_bytes: &[u8]) -> WalletResult<[u8; SIGNATURE_LEN]> {
    keypair.sign(sign_bytes)
}

/// Gắn chữ ký (single signer).
pub fn attach(
    tx: TxTransfer,
    chain_id: impl Into<String>,
    gas: BigUint,
    pubkey: PublicKey,
    signature: [u8; SIGNATURE_LEN],
    nonce: u64,
) -> TxStd {
    TxStd {
        tx,
        signatures: vec![Signature {
            pubkey,
            signature: signature.to_vec(),
            nonce,
        }],
        chain_id: chain_id.into(),
        max_gas: gas,
    }
}

/// Payload cuối cùng cho broadcaster.
pub fn serialize_for_broadcast(codec: &Codec<'_>, signed: &TxStd) -> WalletResult<Vec<u8>> {
    Ok(codec.encode(signed)?)
}

// =============================================================================
// TYPESTATE
// =============================================================================

/// Transfer + gas + chain id, chưa gắn nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    tx: TxTransfer,
    gas: BigUint,
    chain_id: String,
}

impl UnsignedTx {
    pub fn new(tx: TxTransfer, gas: BigUint, chain_id: impl Into<String>) -> Self {
        Self {
            tx,
            gas,
            chain_id: chain_id.into(),
        }
    }

    pub fn prepare(self, codec: &Codec<'_>, nonce: u64) -> WalletResult<PreparedTx> {
        let sign_bytes = compute_sign_bytes(codec, &self.tx, &self.gas, &self.chain_id, nonce)?;
        Ok(PreparedTx {
            unsigned: self,
            nonce,
            sign_bytes,
        })
    }
}

/// Đã tính sign-bytes; bước tiếp theo duy nhất là [`PreparedTx::sign`].
#[derive(Debug, Clone)]
pub struct PreparedTx {
    unsigned: UnsignedTx,
    nonce: u64,
    sign_bytes: Vec<u8>,
}

impl PreparedTx {
    #[inline]
    pub fn sign_bytes(&self) -> &[u8] {
        &self.sign_bytes
    }

    #[inline]
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn sign(self, keypair: &KeyPair) -> WalletResult<TxStd> {
        let signature = sign(keypair, &self.sign_bytes)?;
        let UnsignedTx { tx, gas, chain_id } = self.unsigned;
        Ok(attach(tx, chain_id, gas, keypair.public_key(), signature, self.nonce))
    }
}

// =============================================================================
// SIGNER
// =============================================================================

/// Offline Signer gắn với một key và một chain.
///
/// # Security
/// - **ZeroizeOnDrop**: key pair tự động ghi đè bằng 0 khi drop
/// - **No Debug Leak**: `Debug` chỉ hiển thị address và chain id
pub struct TxSigner<'r> {
    keypair: KeyPair,
    chain_id: String,
    codec: Codec<'r>,
}

impl std::fmt::Debug for TxSigner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxSigner")
            .field("address", &self.keypair.address())
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl<'r> TxSigner<'r> {
    pub fn new(keypair: KeyPair, chain_id: impl Into<String>, codec: Codec<'r>) -> Self {
        Self {
            keypair,
            chain_id: chain_id.into(),
            codec,
        }
    }

    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    #[inline]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn compute_sign_bytes(&self, tx: &TxTransfer, gas: &BigUint, nonce: u64) -> WalletResult<Vec<u8>> {
        compute_sign_bytes(&self.codec, tx, gas, &self.chain_id, nonce)
    }

    /// Chạy toàn bộ pipeline: sign-bytes -> chữ ký -> gắn vào tx.
    pub fn sign_transfer(&self, tx: TxTransfer, gas: BigUint, nonce: u64) -> WalletResult<TxStd> {
        let signed = UnsignedTx::new(tx, gas, self.chain_id.clone())
            .prepare(&self.codec, nonce)?
            .sign(&self.keypair)?;
        tracing::info!(
            chain_id = %self.chain_id,
            nonce,
            senders = signed.tx.senders.len(),
            receivers = signed.tx.receivers.len(),
            "signed transfer"
        );
        Ok(signed)
    }

    /// [`Self::sign_transfer`] followed by [`serialize_for_broadcast`].
    pub fn sign_for_broadcast(&self, tx: TxTransfer, gas: BigUint, nonce: u64) -> WalletResult<Vec<u8>> {
        let signed = self.sign_transfer(tx, gas, nonce)?;
        serialize_for_broadcast(&self.codec, &signed)
    }

    pub fn verify(&self, signed: &TxStd) -> WalletResult<bool> {
        if signed.chain_id != self.chain_id {
            return Ok(false);
        }
        signed.verify(&self.codec)
    }
}

// =============================================================================
// TESTS
// =============================================================================

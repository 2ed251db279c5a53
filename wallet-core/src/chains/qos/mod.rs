// wallet-core/src/chains/qos/mod.rs

//! QOS-style account chain
//!
//! Ledger theo account model, key ed25519, wire format binary có type tag.
//!
//! # Key Features
//! - **Addresses**: SHA-256 của public key (20 bytes), text Bech32, qua [`Address`].
//! - **Key text**: typed key JSON `{"type", "value"}` qua [`key_text`].
//! - **Transfers**: [`TxTransfer`] nhiều bên, parse từ `"<address>,<denom>:<amount>"`.
//! - **Signing**: sign-bytes gắn chain id + nonce, một signer, qua [`TxSigner`].

pub mod address;
pub mod key_text;
pub mod signer;
pub mod transfer;

pub use address::{Address, DEFAULT_ADDRESS_PREFIX};
pub use key_text::KeyKind;
pub use signer::{SignPayload, Signature, TxSigner, TxStd, UnsignedTx};
pub use transfer::{build_transfer, parse_transfer_item, parse_transfer_items, TransferItem, TxTransfer};

use crate::codec::{RegistryError, TypeRegistryBuilder};
use crate::crypto::keypair::PublicKey;

/// Đăng ký mọi shape mà chain này ký hoặc broadcast.
pub fn register_types(builder: TypeRegistryBuilder) -> Result<TypeRegistryBuilder, RegistryError> {
    builder
        .register::<PublicKey>()?
        .register::<TxTransfer>()?
        .register::<SignPayload>()?
        .register::<TxStd>()
}

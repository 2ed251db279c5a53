// wallet-core/src/lib.rs

//! Offline wallet core
//!
//! Account ed25519 từ mnemonic, address Bech32 và ký transfer transaction với
//! canonical binary encoding có type tag. Không có network I/O: output là
//! broadcast bytes để layer khác gửi đi.
//!
//! - [`crypto`]: BIP-39 phrase, seed -> key pair, chữ ký.
//! - [`codec`]: type registry và binary encoder/decoder.
//! - [`chains::qos`]: addresses, typed key text, transfers, signer.
//! - [`account`]: tạo/recover account và ký transfer trong một lần gọi.

pub mod account;
#[path = "api/api.rs"]
pub mod api;
pub mod chains;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;

pub use account::{AccountKeyOut, PubAddrRetrieval};
pub use codec::{Codec, TypeRegistry};
pub use config::WalletConfig;
pub use error::{WalletError, WalletResult};

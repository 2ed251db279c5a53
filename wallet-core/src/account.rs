// wallet-core/src/account.rs
//
// Account Facade - mnemonic -> keys -> address, ký transfer trong một lần gọi
//
// Key ra khỏi module dưới dạng base64 (phần `value` của typed key text),
// address dưới dạng Bech32 với prefix trong config.

use crate::chains::qos::key_text::{import_private_key, key_value, KeyKind};
use crate::chains::qos::signer::TxSigner;
use crate::chains::qos::transfer::{build_transfer, parse_transfer_item, TxTransfer};
use crate::codec::Codec;
use crate::config::WalletConfig;
use crate::crypto::keypair::KeyPair;
use crate::crypto::mnemonic::{PassphrasePolicy, WalletMnemonic};
use crate::crypto::KeyDeriver;
use crate::error::{WalletError, WalletResult};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Account vừa tạo hoặc vừa recover.
///
/// # Security
/// Chứa private key và phrase. Cả hai được ghi đè bằng 0 khi drop và
/// KHÔNG hiển thị trong `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeyOut {
    pub pub_key: String,
    pub priv_key: String,
    pub addr: String,
    pub mnemonic: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub denom: String,
}

impl std::fmt::Debug for AccountKeyOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKeyOut")
            .field("pub_key", &self.pub_key)
            .field("addr", &self.addr)
            .field("type", &self.account_type)
            .field("denom", &self.denom)
            .finish_non_exhaustive()
    }
}

/// Public key + address của một private key được import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubAddrRetrieval {
    pub pub_key: String,
    pub addr: String,
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Tạo account mới từ entropy, passphrase theo `config.passphrase_policy`.
pub fn create_account(config: &WalletConfig) -> WalletResult<AccountKeyOut> {
    let mnemonic = WalletMnemonic::generate(config.entropy)?;
    let keypair = KeyDeriver::derive_from_mnemonic(&mnemonic, "", &config.passphrase_policy)?;
    let out = account_key_out(config, &keypair, &mnemonic)?;
    tracing::info!(addr = %out.addr, words = mnemonic.word_count(), "created account");
    Ok(out)
}

/// Recover từ phrase. Phrase được validate trước khi derive bất kỳ key nào.
///
/// # Errors
/// [`WalletError::InvalidMnemonic`] nếu sai word, sai số lượng hoặc sai checksum.
pub fn recover_account(config: &WalletConfig, phrase: &str, passphrase: &str) -> WalletResult<AccountKeyOut> {
    let mnemonic = parse_phrase(phrase)?;
    let keypair = KeyDeriver::derive_from_mnemonic(&mnemonic, passphrase, &config.passphrase_policy)?;
    let out = account_key_out(config, &keypair, &mnemonic)?;
    tracing::info!(addr = %out.addr, "recovered account");
    Ok(out)
}

/// Recover với passphrase rỗng chuẩn BIP-39, bỏ qua policy trong config.
pub fn account_from_mnemonic(config: &WalletConfig, phrase: &str) -> WalletResult<AccountKeyOut> {
    let mnemonic = parse_phrase(phrase)?;
    let keypair = KeyDeriver::derive_from_mnemonic(&mnemonic, "", &PassphrasePolicy::Standard)?;
    account_key_out(config, &keypair, &mnemonic)
}

/// Public key value and address for a base64 private key value.
pub fn pub_addr_from_private(config: &WalletConfig, private_key: &str) -> WalletResult<PubAddrRetrieval> {
    let keypair = import_private_key(private_key)?;
    let public_key = keypair.public_key();
    Ok(PubAddrRetrieval {
        pub_key: key_value(KeyKind::PubKeyEd25519, public_key.as_bytes())?,
        addr: public_key.address().to_bech32(&config.address_prefix)?,
    })
}

fn parse_phrase(phrase: &str) -> WalletResult<WalletMnemonic> {
    WalletMnemonic::from_phrase(phrase).map_err(|e| {
        tracing::debug!(error = %e, "mnemonic rejected");
        WalletError::InvalidMnemonic
    })
}

fn account_key_out(
    config: &WalletConfig,
    keypair: &KeyPair,
    mnemonic: &WalletMnemonic,
) -> WalletResult<AccountKeyOut> {
    let public_key = keypair.public_key();
    Ok(AccountKeyOut {
        pub_key: key_value(KeyKind::PubKeyEd25519, public_key.as_bytes())?,
        priv_key: key_value(KeyKind::PrivKeyEd25519, &*keypair.to_private_bytes())?,
        addr: public_key.address().to_bech32(&config.address_prefix)?,
        mnemonic: mnemonic.phrase().to_string(),
        account_type: config.account_type.clone(),
        denom: config.denom.clone(),
    })
}

// =============================================================================
// TRANSFERS
// =============================================================================

/// Parse senders/receivers và kiểm tra tổng theo từng denom.
pub fn transfer(config: &WalletConfig, senders: &str, receivers: &str) -> WalletResult<TxTransfer> {
    let prefix = config.address_prefix.as_str();
    let tx = build_transfer(
        crate::chains::qos::parse_transfer_items(prefix, senders)?,
        crate::chains::qos::parse_transfer_items(prefix, receivers)?,
    );
    tx.validate_balance()?;
    Ok(tx)
}

/// Một sender, một receiver, cùng coin, gas = 0. Trả về bytes sẵn sàng broadcast.
///
/// `coin` có dạng `"<denom>:<amount>"`, `private_key` là base64 value.
#[allow(clippy::too_many_arguments)]
pub fn local_tx_gen(
    config: &WalletConfig,
    codec: Codec<'_>,
    from: &str,
    to: &str,
    coin: &str,
    chain_id: &str,
    private_key: &str,
    nonce: u64,
) -> WalletResult<Vec<u8>> {
    let prefix = config.address_prefix.as_str();
    let sender = parse_transfer_item(prefix, &format!("{},{}", from, coin))?;
    let receiver = parse_transfer_item(prefix, &format!("{},{}", to, coin))?;
    let keypair = import_private_key(private_key)?;

    let signer = TxSigner::new(keypair, chain_id, codec);
    signer.sign_for_broadcast(build_transfer(vec![sender], vec![receiver]), BigUint::default(), nonce)
}

// =============================================================================
// TESTS
// =============================================================================

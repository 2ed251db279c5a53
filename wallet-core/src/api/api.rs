// wallet-core/src/api/api.rs
//
// API cho binding layer - tham số owned, config mặc định, registry toàn cục

use crate::account::{self, AccountKeyOut, PubAddrRetrieval};
use crate::chains::qos::address::Address;
use crate::codec::Codec;
use crate::config::WalletConfig;
use crate::crypto::WalletMnemonic;
use crate::error::WalletError;

// --- Key Management ---

pub fn create_account() -> Result<AccountKeyOut, WalletError> {
    account::create_account(&WalletConfig::default())
}

pub fn recover_account(mnemonic: String, passphrase: String) -> Result<AccountKeyOut, WalletError> {
    account::recover_account(&WalletConfig::default(), &mnemonic, &passphrase)
}

pub fn account_from_mnemonic(mnemonic: String) -> Result<AccountKeyOut, WalletError> {
    account::account_from_mnemonic(&WalletConfig::default(), &mnemonic)
}

pub fn pub_addr_from_private(private_key: String) -> Result<PubAddrRetrieval, WalletError> {
    account::pub_addr_from_private(&WalletConfig::default(), &private_key)
}

pub fn validate_mnemonic(mnemonic: String) -> bool {
    WalletMnemonic::validate(&mnemonic)
}

pub fn validate_address(address: String) -> bool {
    Address::is_valid(&WalletConfig::default().address_prefix, &address)
}

// --- Transactions ---

pub fn local_tx_gen(
    from: String,
    to: String,
    coin: String,
    chain_id: String,
    private_key: String,
    nonce: u64,
) -> Result<Vec<u8>, WalletError> {
    account::local_tx_gen(
        &WalletConfig::default(),
        Codec::global(),
        &from,
        &to,
        &coin,
        &chain_id,
        &private_key,
        nonce,
    )
}

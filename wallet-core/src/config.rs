// wallet-core/src/config.rs
//
// Wallet Config - address prefix, denom mặc định, passphrase policy

use crate::chains::qos::address::DEFAULT_ADDRESS_PREFIX;
use crate::crypto::mnemonic::{EntropyBits, PassphrasePolicy};
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};

/// Account type cho key được tạo và giữ trên thiết bị.
pub const LOCAL_ACCOUNT_TYPE: &str = "local";

/// Denom của native coin.
pub const DEFAULT_DENOM: &str = "qos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Bech32 HRP cho account address.
    pub address_prefix: String,
    /// Denom trả về cùng account mới.
    pub denom: String,
    /// Account type reported with new accounts.
    pub account_type: String,
    /// Kích thước entropy khi tạo mnemonic mới.
    pub entropy: EntropyBits,
    /// Cách xử lý passphrase rỗng khi derive seed.
    pub passphrase_policy: PassphrasePolicy,
}

impl WalletConfig {
    /// Tương thích account tạo bởi client cũ: passphrase rỗng được thay bằng
    /// [`crate::crypto::LEGACY_DEFAULT_PASSPHRASE`].
    pub fn legacy() -> Self {
        Self {
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            denom: DEFAULT_DENOM.to_string(),
            account_type: LOCAL_ACCOUNT_TYPE.to_string(),
            entropy: EntropyBits::Bits256,
            passphrase_policy: PassphrasePolicy::legacy(),
        }
    }

    /// Chuẩn BIP-39: passphrase rỗng giữ nguyên.
    pub fn bip39_standard() -> Self {
        Self {
            passphrase_policy: PassphrasePolicy::Standard,
            ..Self::legacy()
        }
    }

    /// Parse TOML. Key thiếu lấy giá trị từ [`WalletConfig::legacy`].
    pub fn from_toml_str(text: &str) -> WalletResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WalletResult<()> {
        if self.address_prefix.is_empty() {
            return Err(WalletError::Config("address_prefix must not be empty".to_string()));
        }
        if self.denom.is_empty() {
            return Err(WalletError::Config("denom must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WalletConfig::default();
        assert_eq!(config.address_prefix, "address");
        assert_eq!(config.denom, "qos");
        assert_eq!(config.account_type, "local");
        assert_eq!(config.entropy, EntropyBits::Bits256);
        assert_eq!(config.passphrase_policy, PassphrasePolicy::legacy());
    }

    #[test]
    fn test_bip39_standard() {
        let config = WalletConfig::bip39_standard();
        assert_eq!(config.passphrase_policy, PassphrasePolicy::Standard);
        assert_eq!(config.address_prefix, "address");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = WalletConfig::from_toml_str(
            r#"
            denom = "uqos"
            entropy = "bits128"
            passphrase_policy = { kind = "default_when_empty", value = "house" }
            "#,
        )
        .unwrap();
        assert_eq!(config.denom, "uqos");
        assert_eq!(config.entropy, EntropyBits::Bits128);
        assert_eq!(
            config.passphrase_policy,
            PassphrasePolicy::DefaultWhenEmpty("house".to_string())
        );
        assert_eq!(config.address_prefix, "address");
    }

    #[test]
    fn test_from_toml_standard_policy() {
        let config = WalletConfig::from_toml_str(r#"passphrase_policy = { kind = "standard" }"#).unwrap();
        assert_eq!(config.passphrase_policy, PassphrasePolicy::Standard);
    }

    #[test]
    fn test_from_toml_rejects_empty_prefix() {
        assert!(matches!(
            WalletConfig::from_toml_str(r#"address_prefix = """#),
            Err(WalletError::Config(_))
        ));
        assert!(WalletConfig::from_toml_str("entropy = 7").is_err());
    }
}

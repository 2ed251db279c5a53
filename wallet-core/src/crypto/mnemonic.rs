// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 Recovery Phrase
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Passphrase mà client cũ thay cho passphrase rỗng. Account tạo từ client cũ chỉ
/// recover ra đúng address với [`PassphrasePolicy::DefaultWhenEmpty`] + giá trị này.
pub const LEGACY_DEFAULT_PASSPHRASE: &str = "DNWTTY";

/// Kích thước entropy hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyBits {
    /// 128-bit entropy, 12 words
    Bits128,
    /// 256-bit entropy, 24 words
    Bits256,
}

impl EntropyBits {
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            EntropyBits::Bits128 => 16,
            EntropyBits::Bits256 => 32,
        }
    }

    #[inline]
    pub const fn word_count(self) -> usize {
        match self {
            EntropyBits::Bits128 => 12,
            EntropyBits::Bits256 => 24,
        }
    }

    #[inline]
    pub const fn bits(self) -> usize {
        self.entropy_bytes() * 8
    }

    fn from_word_count(count: usize) -> Option<Self> {
        match count {
            12 => Some(EntropyBits::Bits128),
            24 => Some(EntropyBits::Bits256),
            _ => None,
        }
    }
}

/// Cách xử lý passphrase rỗng khi stretch mnemonic thành seed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum PassphrasePolicy {
    /// Chuẩn BIP-39: passphrase rỗng giữ nguyên.
    Standard,
    /// Thay bằng hằng số cho trước khi caller truyền `""`.
    DefaultWhenEmpty(String),
}

impl PassphrasePolicy {
    /// Policy tương thích account tạo bởi client cũ.
    pub fn legacy() -> Self {
        PassphrasePolicy::DefaultWhenEmpty(LEGACY_DEFAULT_PASSPHRASE.to_string())
    }

    /// Passphrase thực sự đưa vào PBKDF2.
    pub fn resolve<'a>(&'a self, passphrase: &'a str) -> &'a str {
        match self {
            PassphrasePolicy::DefaultWhenEmpty(default) if passphrase.is_empty() => default,
            _ => passphrase,
        }
    }
}

impl Default for PassphrasePolicy {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Wallet Mnemonic - BIP-39, 12 hoặc 24 words
///
/// # Security
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Sử dụng `OsRng`
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
#[derive(Clone)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Không expose `Zeroize`: phrase chỉ bị xoá khi drop, nên `to_seed` luôn có phrase hợp lệ.
impl Drop for WalletMnemonic {
    fn drop(&mut self) {
        self.phrase.zeroize();
        self.word_count.zeroize();
    }
}

impl ZeroizeOnDrop for WalletMnemonic {}

impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo mnemonic mới với kích thước entropy cho trước.
    ///
    /// # Errors
    /// [`WalletError::EntropySource`] nếu OS RNG lỗi.
    pub fn generate(bits: EntropyBits) -> WalletResult<Self> {
        let entropy_size = bits.entropy_bytes();

        let mut entropy = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut entropy[..entropy_size])
            .map_err(|e| WalletError::EntropySource(e.to_string()))?;

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_size]);
        entropy.zeroize();
        let mnemonic =
            mnemonic.map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())))?;

        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: bits.word_count(),
        })
    }

    /// Khôi phục từ phrase có sẵn.
    ///
    /// # Validation
    /// - Số lượng words (12 hoặc 24)
    /// - Mỗi word phải nằm trong BIP-39 English wordlist
    /// - Checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if EntropyBits::from_word_count(count).is_none() {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse_normalized(&normalized_phrase).map_err(|e| match e {
            bip39::Error::UnknownWord(idx) => WalletError::Mnemonic(MnemonicError::UnknownWord(
                normalized.get(idx).map(|w| w.to_string()).unwrap_or_default(),
            )),
            bip39::Error::InvalidChecksum => WalletError::Mnemonic(MnemonicError::ChecksumFailed),
            other => WalletError::Mnemonic(MnemonicError::Bip39Error(other.to_string())),
        })?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Phrase gốc. KHÔNG BAO GIỜ log.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    pub fn strength_bits(&self) -> usize {
        EntropyBits::from_word_count(self.word_count)
            .map(EntropyBits::bits)
            .unwrap_or(0)
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// BIP-39 seed: PBKDF2-HMAC-SHA512, 2048 rounds, salt `"mnemonic" || passphrase`.
    ///
    /// Pure và deterministic; passphrase dùng nguyên như được truyền vào.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        let mnemonic =
            Mnemonic::parse_normalized(&self.phrase).expect("Internal phrase is valid");
        Zeroizing::new(mnemonic.to_seed_normalized(passphrase))
    }

    /// Seed sau khi áp dụng passphrase policy.
    pub fn to_seed_with_policy(
        &self,
        passphrase: &str,
        policy: &PassphrasePolicy,
    ) -> Zeroizing<[u8; 64]> {
        self.to_seed(policy.resolve(passphrase))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra đầy đủ (số words, wordlist, checksum). Không bao giờ panic.
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_generate_12_words() {
        let mnemonic = WalletMnemonic::generate(EntropyBits::Bits128).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_24_words() {
        let mnemonic = WalletMnemonic::generate(EntropyBits::Bits256).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert_eq!(mnemonic.strength_bits(), 256);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace() {
        let messy_phrase =
            "  abandon  abandon   abandon abandon abandon abandon abandon abandon abandon abandon abandon about  ";
        let mnemonic = WalletMnemonic::from_phrase(messy_phrase).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_from_phrase_invalid_word_count() {
        let result = WalletMnemonic::from_phrase("abandon abandon abandon");
        assert_eq!(
            result.unwrap_err(),
            WalletError::Mnemonic(MnemonicError::InvalidWordCount(3))
        );
    }

    #[test]
    fn test_from_phrase_unsupported_size() {
        // 15 words is valid BIP-39 but not a supported size here.
        let fifteen = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon address";
        assert!(matches!(
            WalletMnemonic::from_phrase(fifteen),
            Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(15)))
        ));
    }

    #[test]
    fn test_from_phrase_invalid_word() {
        let invalid = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon invalid";
        assert_eq!(
            WalletMnemonic::from_phrase(invalid).unwrap_err(),
            WalletError::Mnemonic(MnemonicError::UnknownWord("invalid".to_string()))
        );
    }

    #[test]
    fn test_from_phrase_bad_checksum() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert_eq!(
            WalletMnemonic::from_phrase(bad).unwrap_err(),
            WalletError::Mnemonic(MnemonicError::ChecksumFailed)
        );
    }

    #[test]
    fn test_to_seed_bip39_vector() {
        // BIP-39 reference vector, passphrase "TREZOR".
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed("TREZOR");
        assert_eq!(
            hex::encode(&*seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_to_seed_is_deterministic() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        assert_eq!(&*mnemonic.to_seed("pw"), &*mnemonic.to_seed("pw"));
    }

    #[test]
    fn test_to_seed_with_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        assert_ne!(&*mnemonic.to_seed(""), &*mnemonic.to_seed("TREZOR"));
    }

    #[test]
    fn test_policy_substitutes_empty_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let legacy = PassphrasePolicy::legacy();

        let via_policy = mnemonic.to_seed_with_policy("", &legacy);
        let explicit = mnemonic.to_seed(LEGACY_DEFAULT_PASSPHRASE);
        assert_eq!(&*via_policy, &*explicit);

        // A non-empty passphrase is never replaced.
        let custom = mnemonic.to_seed_with_policy("mine", &legacy);
        assert_eq!(&*custom, &*mnemonic.to_seed("mine"));
    }

    #[test]
    fn test_standard_policy_keeps_empty_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed_with_policy("", &PassphrasePolicy::Standard);
        assert_eq!(&*seed, &*mnemonic.to_seed(""));
    }

    #[test]
    fn test_validate() {
        assert!(WalletMnemonic::validate(TEST_MNEMONIC_12));
        assert!(WalletMnemonic::validate(TEST_MNEMONIC_24));
        assert!(!WalletMnemonic::validate("invalid mnemonic phrase"));
        assert!(!WalletMnemonic::validate(""));
    }

    #[test]
    fn test_validate_rejects_single_word_substitution() {
        let words: Vec<&str> = TEST_MNEMONIC_24.split(' ').collect();
        for i in 0..words.len() {
            let mut altered = words.clone();
            altered[i] = if words[i] == "zoo" { "zebra" } else { "zoo" };
            assert!(
                !WalletMnemonic::validate(&altered.join(" ")),
                "substitution at {} still validated",
                i
            );
        }
    }

    #[test]
    fn test_validate_rejects_truncation() {
        let words: Vec<&str> = TEST_MNEMONIC_24.split(' ').collect();
        for len in 0..words.len() {
            assert!(!WalletMnemonic::validate(&words[..len].join(" ")));
        }
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let debug_output = format!("{:?}", mnemonic);
        assert!(!debug_output.contains("abandon"));
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("word_count: 12"));
    }

    #[test]
    fn test_unique_generation() {
        let m1 = WalletMnemonic::generate(EntropyBits::Bits128).unwrap();
        let m2 = WalletMnemonic::generate(EntropyBits::Bits128).unwrap();
        assert_ne!(m1.phrase(), m2.phrase());
    }

    fn wiped_on_drop<T: ZeroizeOnDrop>(_: &T) {}

    #[test]
    fn test_seed_available_until_drop() {
        let original = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        wiped_on_drop(&original);
        let expected = original.to_seed("");

        let copy = original.clone();
        drop(original);
        assert_eq!(&*copy.to_seed(""), &*expected);
    }
}

// wallet-core/src/chains/qos/transfer.rs
//
// Transfer Builder - lắp ráp transaction chuyển coin
// Item text: "<address>,<denom>:<amount>", nhiều item nối bằng ';'.

use crate::chains::qos::address::{Address, ADDRESS_LEN};
use crate::codec::{BinaryDecode, BinaryEncode, DecodeError, Decoder, EncodeError, Encoder, Registered};
use crate::error::{WalletError, WalletResult};
use num_bigint::BigUint;
use std::collections::BTreeMap;

/// Một phía của transfer: address, denom, amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferItem {
    pub address: Address,
    pub denom: String,
    pub amount: BigUint,
}

impl TransferItem {
    pub fn new(address: Address, denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        Self {
            address,
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl BinaryEncode for TransferItem {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError> {
        if self.denom.is_empty() {
            return Err(EncodeError::InvalidValue("transfer item with empty denom".to_string()));
        }
        enc.bytes_field(1, self.address.as_bytes());
        enc.string_field(2, &self.denom);
        enc.biguint_field(3, &self.amount);
        Ok(())
    }
}

impl BinaryDecode for TransferItem {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let address = Address::from_raw(dec.array_field::<ADDRESS_LEN>(1)?);
        let denom = dec.string_field(2)?;
        if denom.is_empty() {
            return Err(DecodeError::InvalidValue("transfer item with empty denom".to_string()));
        }
        let amount = dec.biguint_field(3)?;
        Ok(Self {
            address,
            denom,
            amount,
        })
    }
}

/// Transfer nhiều bên. Thứ tự của cả hai list nằm trong sign-bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxTransfer {
    pub senders: Vec<TransferItem>,
    pub receivers: Vec<TransferItem>,
}

impl Registered for TxTransfer {
    const TYPE_NAME: &'static str = "transfer/txs/TxTransfer";
}

impl BinaryEncode for TxTransfer {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError> {
        enc.seq_field(1, &self.senders)?;
        enc.seq_field(2, &self.receivers)
    }
}

impl BinaryDecode for TxTransfer {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            senders: dec.seq_field(1)?,
            receivers: dec.seq_field(2)?,
        })
    }
}

impl TxTransfer {
    /// Tổng senders và receivers theo từng denom phải bằng nhau.
    ///
    /// [`build_transfer`] không gọi hàm này. Ledger cũng kiểm tra rule này,
    /// gọi trước để fail sớm, trước khi ký.
    pub fn validate_balance(&self) -> WalletResult<()> {
        let sent = sum_by_denom(&self.senders);
        let received = sum_by_denom(&self.receivers);

        let zero = BigUint::default();
        for denom in sent.keys().chain(received.keys()) {
            let s = sent.get(denom).unwrap_or(&zero);
            let r = received.get(denom).unwrap_or(&zero);
            if s != r {
                return Err(WalletError::UnbalancedTransfer {
                    denom: denom.to_string(),
                    senders: s.to_string(),
                    receivers: r.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn sum_by_denom(items: &[TransferItem]) -> BTreeMap<&str, BigUint> {
    let mut sums: BTreeMap<&str, BigUint> = BTreeMap::new();
    for item in items {
        *sums.entry(item.denom.as_str()).or_default() += &item.amount;
    }
    sums
}

// =============================================================================
// PARSING
// =============================================================================

fn malformed(item: &str, reason: impl Into<String>) -> WalletError {
    WalletError::MalformedTransferItem {
        item: item.to_string(),
        reason: reason.into(),
    }
}

/// Parse `"<address>,<denom>:<amount>"`.
///
/// Kiểm tra format trước, address sau: item sai cấu trúc luôn trả về
/// [`WalletError::MalformedTransferItem`].
pub fn parse_transfer_item(prefix: &str, text: &str) -> WalletResult<TransferItem> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let [address_text, coin] = fields.as_slice() else {
        return Err(malformed(
            text,
            format!("expected 2 comma-separated fields, found {}", fields.len()),
        ));
    };

    let (denom, amount) = coin
        .split_once(':')
        .ok_or_else(|| malformed(text, "coin must be '<denom>:<amount>'"))?;
    let (denom, amount) = (denom.trim(), amount.trim());

    if denom.is_empty() || denom.chars().any(char::is_whitespace) {
        return Err(malformed(text, "denom must be a non-empty token"));
    }
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(text, format!("amount '{}' is not a non-negative integer", amount)));
    }
    let amount = amount
        .parse::<BigUint>()
        .map_err(|e| malformed(text, e.to_string()))?;

    let address = Address::from_bech32(prefix, address_text)?;

    Ok(TransferItem {
        address,
        denom: denom.to_string(),
        amount,
    })
}

/// Parse nhiều item nối bằng `';'`. Bỏ qua đoạn rỗng, cần ít nhất một item.
pub fn parse_transfer_items(prefix: &str, text: &str) -> WalletResult<Vec<TransferItem>> {
    let items = text
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| parse_transfer_item(prefix, segment))
        .collect::<WalletResult<Vec<_>>>()?;

    if items.is_empty() {
        return Err(malformed(text, "no transfer items"));
    }
    Ok(items)
}

/// Pure function, giữ nguyên thứ tự input.
pub fn build_transfer(senders: Vec<TransferItem>, receivers: Vec<TransferItem>) -> TxTransfer {
    TxTransfer { senders, receivers }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::qos::address::DEFAULT_ADDRESS_PREFIX;
    use crate::codec::Codec;
    use crate::crypto::keypair::KeyPair;

    fn addr(seed: u8) -> Address {
        KeyPair::from_secret(&[seed; 32]).address()
    }

    fn addr_text(seed: u8) -> String {
        addr(seed).to_bech32(DEFAULT_ADDRESS_PREFIX).unwrap()
    }

    #[test]
    fn test_parse_item() {
        let text = format!("{},uqos:100", addr_text(1));
        let item = parse_transfer_item(DEFAULT_ADDRESS_PREFIX, &text).unwrap();
        assert_eq!(item, TransferItem::new(addr(1), "uqos", 100u32));
    }

    #[test]
    fn test_parse_item_big_amount() {
        let text = format!("{},qos:340282366920938463463374607431768211456", addr_text(1));
        let item = parse_transfer_item(DEFAULT_ADDRESS_PREFIX, &text).unwrap();
        assert_eq!(item.amount, BigUint::from(u128::MAX) + 1u32);
    }

    #[test]
    fn test_parse_item_missing_coin() {
        let result = parse_transfer_item(DEFAULT_ADDRESS_PREFIX, "addr1,bad");
        assert!(matches!(
            result,
            Err(WalletError::MalformedTransferItem { .. })
        ));
    }

    #[test]
    fn test_parse_item_wrong_field_count() {
        for text in ["addr1", "addr1,qos:1,extra", ""] {
            assert!(matches!(
                parse_transfer_item(DEFAULT_ADDRESS_PREFIX, text),
                Err(WalletError::MalformedTransferItem { .. })
            ));
        }
    }

    #[test]
    fn test_parse_item_non_numeric_amount() {
        for coin in ["qos:ten", "qos:-5", "qos:", "qos:1.5", ":10"] {
            let text = format!("{},{}", addr_text(1), coin);
            assert!(
                matches!(
                    parse_transfer_item(DEFAULT_ADDRESS_PREFIX, &text),
                    Err(WalletError::MalformedTransferItem { .. })
                ),
                "accepted {}",
                coin
            );
        }
    }

    #[test]
    fn test_parse_item_invalid_address() {
        let result = parse_transfer_item(DEFAULT_ADDRESS_PREFIX, "addr1,uqos:100");
        assert!(matches!(result, Err(WalletError::InvalidAddress(_))));
    }

    #[test]
    fn test_parse_items_multiple() {
        let text = format!("{},qos:1;{},qsc:2;", addr_text(1), addr_text(2));
        let items = parse_transfer_items(DEFAULT_ADDRESS_PREFIX, &text).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].denom, "qos");
        assert_eq!(items[1].address, addr(2));
        assert!(parse_transfer_items(DEFAULT_ADDRESS_PREFIX, " ; ").is_err());
    }

    #[test]
    fn test_build_preserves_order() {
        let a = TransferItem::new(addr(1), "qos", 1u32);
        let b = TransferItem::new(addr(2), "qos", 2u32);
        let tx = build_transfer(vec![a.clone(), b.clone()], vec![b.clone()]);
        assert_eq!(tx.senders, vec![a, b.clone()]);
        assert_eq!(tx.receivers, vec![b]);
    }

    #[test]
    fn test_validate_balance() {
        let balanced = build_transfer(
            vec![
                TransferItem::new(addr(1), "qos", 3u32),
                TransferItem::new(addr(2), "qos", 2u32),
            ],
            vec![TransferItem::new(addr(3), "qos", 5u32)],
        );
        assert!(balanced.validate_balance().is_ok());

        let unbalanced = build_transfer(
            vec![TransferItem::new(addr(1), "qos", 5u32)],
            vec![TransferItem::new(addr(3), "qsc", 5u32)],
        );
        assert!(matches!(
            unbalanced.validate_balance(),
            Err(WalletError::UnbalancedTransfer { .. })
        ));
    }

    #[test]
    fn test_codec_roundtrip() {
        let codec = Codec::global();
        let tx = build_transfer(
            vec![TransferItem::new(addr(1), "qos", 100u32)],
            vec![
                TransferItem::new(addr(2), "qos", 60u32),
                TransferItem::new(addr(3), "qos", 40u32),
            ],
        );
        let bytes = codec.encode(&tx).unwrap();
        assert_eq!(codec.decode::<TxTransfer>(&bytes).unwrap(), tx);

        let empty = TxTransfer::default();
        let bytes = codec.encode(&empty).unwrap();
        assert_eq!(codec.decode::<TxTransfer>(&bytes).unwrap(), empty);
    }

    #[test]
    fn test_empty_denom_not_encoded() {
        let tx = build_transfer(vec![TransferItem::new(addr(1), "", 1u32)], vec![]);
        assert!(matches!(
            Codec::global().encode(&tx),
            Err(EncodeError::InvalidValue(_))
        ));
    }
}

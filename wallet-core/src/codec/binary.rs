// wallet-core/src/codec/binary.rs
//
// Binary Encoder/Decoder - đọc/ghi từng field của canonical format
// Primitive (varint, key, wire type) lấy từ prost::encoding.
// Mọi field đều được ghi; decoder đòi đủ từng field, đúng thứ tự.

use super::{BinaryDecode, BinaryEncode, DecodeError, EncodeError, Registered, TypeRegistry};
use num_bigint::BigUint;
use prost::encoding::{decode_key, decode_varint, encode_key, encode_varint, encoded_len_varint};

pub use prost::encoding::WireType;

/// Số byte một varint chiếm ở đầu `buf`.
///
/// Tách riêng "thiếu dữ liệu" (Truncated) khỏi "tràn 64 bit" (VarintOverflow)
/// trước khi giao cho prost.
fn varint_extent(buf: &[u8]) -> Result<usize, DecodeError> {
    let max_len = encoded_len_varint(u64::MAX);
    match buf.iter().take(max_len).position(|b| b & 0x80 == 0) {
        Some(i) => Ok(i + 1),
        None if buf.len() < max_len => Err(DecodeError::Truncated),
        None => Err(DecodeError::VarintOverflow),
    }
}

// =============================================================================
// ENCODER
// =============================================================================

/// Append-only canonical writer.
pub struct Encoder<'r> {
    registry: &'r TypeRegistry,
    buf: Vec<u8>,
}

impl<'r> Encoder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            buf: Vec::new(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn child(&self) -> Encoder<'r> {
        Encoder::new(self.registry)
    }

    fn put_uvarint(&mut self, value: u64) {
        encode_varint(value, &mut self.buf);
    }

    fn put_key(&mut self, field: u32, wire_type: WireType) {
        encode_key(field, wire_type, &mut self.buf);
    }

    fn put_len_prefixed(&mut self, bytes: &[u8]) {
        self.put_uvarint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn uvarint_field(&mut self, field: u32, value: u64) {
        self.put_key(field, WireType::Varint);
        self.put_uvarint(value);
    }

    pub fn bytes_field(&mut self, field: u32, bytes: &[u8]) {
        self.put_key(field, WireType::LengthDelimited);
        self.put_len_prefixed(bytes);
    }

    pub fn string_field(&mut self, field: u32, value: &str) {
        self.bytes_field(field, value.as_bytes());
    }

    pub fn biguint_field(&mut self, field: u32, value: &BigUint) {
        self.string_field(field, &value.to_str_radix(10));
    }

    /// Struct lồng nhau (không prefix), ghi thành body length-delimited.
    pub fn struct_field<T: BinaryEncode>(&mut self, field: u32, value: &T) -> Result<(), EncodeError> {
        let mut child = self.child();
        value.encode_body(&mut child)?;
        self.bytes_field(field, &child.buf);
        Ok(())
    }

    /// Registered value nằm trong value khác: length-delimited `prefix || body`.
    pub fn registered_field<T: Registered + BinaryEncode>(
        &mut self,
        field: u32,
        value: &T,
    ) -> Result<(), EncodeError> {
        let mut child = self.child();
        child.write_registered(value)?;
        self.bytes_field(field, &child.buf);
        Ok(())
    }

    /// Ordered sequence of plain structs: `uvarint(count) || (uvarint(len) || body)*`.
    pub fn seq_field<T: BinaryEncode>(&mut self, field: u32, items: &[T]) -> Result<(), EncodeError> {
        let mut child = self.child();
        child.put_uvarint(items.len() as u64);
        for item in items {
            let mut element = child.child();
            item.encode_body(&mut element)?;
            child.put_len_prefixed(&element.buf);
        }
        self.bytes_field(field, &child.buf);
        Ok(())
    }

    pub(crate) fn write_registered<T: Registered + BinaryEncode>(&mut self, value: &T) -> Result<(), EncodeError> {
        let prefix = self
            .registry
            .prefix_of(T::TYPE_NAME)
            .ok_or_else(|| EncodeError::UnregisteredType(T::TYPE_NAME.to_string()))?;
        self.buf.extend_from_slice(prefix.as_bytes());
        value.encode_body(self)
    }
}

// =============================================================================
// DECODER
// =============================================================================

/// Decoder strict trên buffer mượn (borrowed).
pub struct Decoder<'a> {
    registry: &'a TypeRegistry,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a TypeRegistry, buf: &'a [u8]) -> Self {
        Self { registry, buf, pos: 0 }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Chỉ thành công khi đã đọc hết mọi byte.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }

    fn child(&self, buf: &'a [u8]) -> Decoder<'a> {
        Decoder::new(self.registry, buf)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::Truncated);
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Varint dạng tối giản; mọi cách mã hoá dài hơn cần thiết đều bị từ chối.
    fn read_uvarint(&mut self) -> Result<u64, DecodeError> {
        let mut rest = &self.buf[self.pos..];
        let extent = varint_extent(rest)?;
        let value = decode_varint(&mut rest).map_err(|_| DecodeError::VarintOverflow)?;
        if encoded_len_varint(value) != extent {
            return Err(DecodeError::NonCanonicalVarint);
        }
        self.pos += extent;
        Ok(value)
    }

    fn expect_key(&mut self, field: u32, wire_type: WireType) -> Result<(), DecodeError> {
        let start = self.pos;
        let raw = self.read_uvarint()?;
        let mut key = &self.buf[start..self.pos];
        match decode_key(&mut key) {
            Ok((tag, found)) if tag == field && found == wire_type => Ok(()),
            _ => Err(DecodeError::UnexpectedField {
                expected: field,
                found: raw >> 3,
                wire_type: (raw & 0x07) as u8,
            }),
        }
    }

    fn read_len_prefixed(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_uvarint()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::Truncated)?;
        self.take(len)
    }

    pub fn uvarint_field(&mut self, field: u32) -> Result<u64, DecodeError> {
        self.expect_key(field, WireType::Varint)?;
        self.read_uvarint()
    }

    pub fn bytes_field(&mut self, field: u32) -> Result<Vec<u8>, DecodeError> {
        self.expect_key(field, WireType::LengthDelimited)?;
        Ok(self.read_len_prefixed()?.to_vec())
    }

    /// Field length-delimited phải chứa đúng `N` bytes.
    pub fn array_field<const N: usize>(&mut self, field: u32) -> Result<[u8; N], DecodeError> {
        self.expect_key(field, WireType::LengthDelimited)?;
        let raw = self.read_len_prefixed()?;
        raw.try_into().map_err(|_| {
            DecodeError::InvalidValue(format!(
                "field {} expected {} bytes, got {}",
                field,
                N,
                raw.len()
            ))
        })
    }

    pub fn string_field(&mut self, field: u32) -> Result<String, DecodeError> {
        self.expect_key(field, WireType::LengthDelimited)?;
        let raw = self.read_len_prefixed()?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8)
    }

    pub fn biguint_field(&mut self, field: u32) -> Result<BigUint, DecodeError> {
        let text = self.string_field(field)?;
        parse_canonical_biguint(&text)
    }

    pub fn struct_field<T: BinaryDecode>(&mut self, field: u32) -> Result<T, DecodeError> {
        self.expect_key(field, WireType::LengthDelimited)?;
        let raw = self.read_len_prefixed()?;
        let mut child = self.child(raw);
        let value = T::decode_body(&mut child)?;
        child.finish()?;
        Ok(value)
    }

    pub fn registered_field<T: Registered + BinaryDecode>(&mut self, field: u32) -> Result<T, DecodeError> {
        self.expect_key(field, WireType::LengthDelimited)?;
        let raw = self.read_len_prefixed()?;
        let mut child = self.child(raw);
        let value = child.read_registered::<T>()?;
        child.finish()?;
        Ok(value)
    }

    pub fn seq_field<T: BinaryDecode>(&mut self, field: u32) -> Result<Vec<T>, DecodeError> {
        self.expect_key(field, WireType::LengthDelimited)?;
        let raw = self.read_len_prefixed()?;
        let mut seq = self.child(raw);

        let count = seq.read_uvarint()?;
        // Mỗi phần tử tối thiểu 1 byte (length prefix).
        if count > seq.remaining() as u64 {
            return Err(DecodeError::Truncated);
        }

        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let element = seq.read_len_prefixed()?;
            let mut child = seq.child(element);
            items.push(T::decode_body(&mut child)?);
            child.finish()?;
        }
        seq.finish()?;
        Ok(items)
    }

    pub(crate) fn read_registered<T: Registered + BinaryDecode>(&mut self) -> Result<T, DecodeError> {
        let tag = self.take(4)?;
        let prefix = super::TypePrefix::from_slice(tag).ok_or(DecodeError::Truncated)?;
        match self.registry.name_of(&prefix) {
            None => Err(DecodeError::UnknownTypeTag(prefix.to_string())),
            Some(name) if name != T::TYPE_NAME => Err(DecodeError::TypeMismatch {
                expected: T::TYPE_NAME.to_string(),
                found: name.to_string(),
            }),
            Some(_) => T::decode_body(self),
        }
    }
}

/// Chỉ chữ số thập phân, không có số 0 đứng đầu (trừ chính "0").
fn parse_canonical_biguint(text: &str) -> Result<BigUint, DecodeError> {
    let canonical = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));
    if !canonical {
        return Err(DecodeError::InvalidValue(format!(
            "'{}' is not a canonical unsigned integer",
            text
        )));
    }
    text.parse::<BigUint>()
        .map_err(|e| DecodeError::InvalidValue(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

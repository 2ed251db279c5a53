// wallet-core/src/codec/mod.rs

//! Canonical Binary Codec
//!
//! Serialization binary deterministic, có type tag. Cùng một bytes dùng cho cả
//! sign-bytes và broadcast payload, nên layout cố định:
//!
//! - **Registered value**: `prefix (4 bytes) || body`. Prefix tính từ type name
//!   theo quy tắc prefix của amino, xem [`TypePrefix::from_name`].
//! - **Body**: mọi field theo đúng thứ tự khai báo, không bỏ field nào. Mỗi field là
//!   `uvarint(field_number << 3 | wire_type) || payload` (protobuf key, qua prost).
//! - **Wire types**: `0` = varint LEB128 (dạng tối giản), `2` = `uvarint(len) || bytes`.
//! - **Registered field**: length-delimited `prefix || body`. Byte array như
//!   `PubKeyEd25519` vẫn là field 1 trong body: `prefix || 0a 20 || key`.
//! - **Sequences**: một field length-delimited chứa `uvarint(count)`, sau đó từng
//!   phần tử `uvarint(len) || body`. Sequence rỗng vẫn được ghi.
//! - **Big integers**: chuỗi thập phân canonical (không dấu, không số 0 đứng đầu).
//!
//! # Compatibility
//! Format này chỉ mượn quy tắc prefix của amino. Body KHÔNG tương thích amino
//! (amino bỏ field rỗng, lặp key cho từng phần tử, ghi byte array không key)
//! và cũng không phải một protobuf message: mọi field bắt buộc nên buffer bị cắt
//! luôn là `DecodeError::Truncated`, không bao giờ decode ra giá trị thiếu.
//!
//! [`TypeRegistry`] (name -> prefix) bị freeze sau khi build, được truyền vào codec
//! bằng reference qua [`Codec`].

pub mod binary;
pub mod registry;

pub use binary::{Decoder, Encoder, WireType};
pub use registry::{TypePrefix, TypeRegistry, TypeRegistryBuilder};

use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Lỗi khi tạo canonical bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("type '{0}' is not registered")]
    UnregisteredType(String),

    #[error("value cannot be encoded: {0}")]
    InvalidValue(String),
}

/// Lỗi khi đọc canonical bytes. Mỗi loại riêng biệt để phân biệt bị cắt với bị hỏng.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input truncated")]
    Truncated,

    #[error("unknown type tag {0}")]
    UnknownTypeTag(String),

    #[error("type mismatch: expected '{expected}', found '{found}'")]
    TypeMismatch { expected: String, found: String },

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("unexpected field key: expected field {expected}, found field {found} (wire type {wire_type})")]
    UnexpectedField {
        expected: u32,
        found: u64,
        wire_type: u8,
    },

    #[error("varint is not in minimal form")]
    NonCanonicalVarint,

    #[error("varint overflows 64 bits")]
    VarintOverflow,

    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Lỗi khi build [`TypeRegistry`]. Luôn là lỗi cấu hình.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type name '{0}' registered twice")]
    DuplicateName(String),

    #[error("type tag {tag} of '{new}' already taken by '{existing}'")]
    DuplicateTag {
        tag: String,
        existing: String,
        new: String,
    },

    #[error("type name '{0}' does not yield a usable tag")]
    DegenerateName(String),
}

// =============================================================================
// TRAITS
// =============================================================================

/// Shape có registered name cố định (=> type tag cố định).
pub trait Registered {
    const TYPE_NAME: &'static str;
}

/// Ghi body: các field theo thứ tự khai báo.
pub trait BinaryEncode {
    fn encode_body(&self, enc: &mut Encoder<'_>) -> Result<(), EncodeError>;
}

/// Reads the body written by the matching [`BinaryEncode`] impl.
pub trait BinaryDecode: Sized {
    fn decode_body(dec: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}

// =============================================================================
// CODEC
// =============================================================================

/// Entry point cho encode/decode top-level trên một registry.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    registry: &'r TypeRegistry,
}

impl Codec<'static> {
    /// Codec over the process-wide standard registry.
    pub fn global() -> Self {
        Self {
            registry: TypeRegistry::global(),
        }
    }
}

impl<'r> Codec<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Encode registered value thành `prefix || body`.
    pub fn encode<T: Registered + BinaryEncode>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let mut enc = Encoder::new(self.registry);
        enc.write_registered(value)?;
        Ok(enc.into_bytes())
    }

    /// Decode registered value. Từ chối tag khác và byte thừa ở cuối.
    pub fn decode<T: Registered + BinaryDecode>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        let mut dec = Decoder::new(self.registry, bytes);
        let value = dec.read_registered::<T>()?;
        dec.finish()?;
        Ok(value)
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Self::global()
    }
}

// wallet-core/src/codec/registry.rs
//
// Type Registry - registered name -> prefix 4 bytes, build một lần rồi freeze

use super::{Registered, RegistryError};
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

static GLOBAL_REGISTRY: Lazy<TypeRegistry> = Lazy::new(|| {
    TypeRegistry::standard().expect("built-in type names map to distinct tags")
});

/// Tag 4 bytes đứng trước mọi registered value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePrefix([u8; 4]);

impl TypePrefix {
    /// Cách tính tag:
    /// 1. `h = SHA-256(name)`
    /// 2. bỏ các byte `0x00` ở đầu
    /// 3. bỏ 3 byte tiếp theo (disambiguation)
    /// 4. bỏ các byte `0x00` ở đầu lần nữa
    /// 5. 4 byte tiếp theo là prefix
    pub fn from_name(name: &str) -> Option<Self> {
        let hash = Sha256::digest(name.as_bytes());
        let rest = skip_zeros(&hash);
        let rest = skip_zeros(rest.get(3..)?);
        Self::from_slice(rest.get(..4)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

fn skip_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

impl fmt::Display for TypePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypePrefix({})", self)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Mapping name <-> tag đã freeze. Chỉ [`TypeRegistryBuilder`] thêm được entry,
/// registry đã build là read-only, share giữa các thread an toàn.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_name: HashMap<&'static str, TypePrefix>,
    by_prefix: HashMap<TypePrefix, &'static str>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder {
            inner: TypeRegistry::default(),
        }
    }

    /// Registry chứa mọi shape mà wallet ký hoặc broadcast.
    pub fn standard() -> Result<Self, RegistryError> {
        let builder = crate::chains::qos::register_types(Self::builder())?;
        Ok(builder.build())
    }

    /// Registry chuẩn toàn cục, khởi tạo ở lần dùng đầu tiên.
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn prefix_of(&self, name: &str) -> Option<TypePrefix> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, prefix: &TypePrefix) -> Option<&'static str> {
        self.by_prefix.get(prefix).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Gom các đăng ký; conflict bất kỳ => build thất bại.
#[derive(Debug)]
pub struct TypeRegistryBuilder {
    inner: TypeRegistry,
}

impl TypeRegistryBuilder {
    pub fn register<T: Registered>(self) -> Result<Self, RegistryError> {
        self.register_name(T::TYPE_NAME)
    }

    pub fn register_name(self, name: &'static str) -> Result<Self, RegistryError> {
        let prefix =
            TypePrefix::from_name(name).ok_or_else(|| RegistryError::DegenerateName(name.to_string()))?;
        self.insert(name, prefix)
    }

    fn insert(mut self, name: &'static str, prefix: TypePrefix) -> Result<Self, RegistryError> {
        if self.inner.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        if let Some(existing) = self.inner.by_prefix.get(&prefix) {
            return Err(RegistryError::DuplicateTag {
                tag: prefix.to_string(),
                existing: existing.to_string(),
                new: name.to_string(),
            });
        }

        tracing::debug!(type_name = name, tag = %prefix, "registered codec type");
        self.inner.by_name.insert(name, prefix);
        self.inner.by_prefix.insert(prefix, name);
        Ok(self)
    }

    pub fn build(self) -> TypeRegistry {
        self.inner
    }
}

// =============================================================================
// TESTS
// =============================================================================

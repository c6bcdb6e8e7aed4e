//! This module defines the key byte wrapper and the per-algorithm key length
//! policy.
//!
//! 这个模块定义了密钥字节包装器以及每个算法的密钥长度策略。
use crate::common::rng::RandomSource;
use crate::error::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// The key lengths an algorithm accepts, in bytes.
///
/// A length is valid when it lies in `[min, max]` and `length - min` is a
/// multiple of `multiple`.
///
/// 算法接受的密钥长度（字节）。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyLengthPolicy {
    pub default: usize,
    pub min: usize,
    pub max: usize,
    pub multiple: usize,
}

impl KeyLengthPolicy {
    pub const fn new(default: usize, min: usize, max: usize, multiple: usize) -> Self {
        Self {
            default,
            min,
            max,
            multiple,
        }
    }

    /// A policy that only accepts one length.
    pub const fn fixed(length: usize) -> Self {
        Self::new(length, length, length, 1)
    }

    /// Resolves `requested` to the closest length the algorithm accepts,
    /// never going below the request unless it exceeds `max`.
    ///
    /// 将请求的长度解析为算法可接受的最接近长度。
    pub fn valid_length(&self, requested: usize) -> usize {
        if requested <= self.min {
            return self.min;
        }
        if requested >= self.max {
            return self.max;
        }
        let step = self.multiple.max(1);
        let over = requested - self.min;
        let rounded = self.min + over.div_ceil(step) * step;
        rounded.min(self.max)
    }

    pub fn is_valid(&self, length: usize) -> bool {
        self.valid_length(length) == length
    }
}

/// A byte wrapper for a symmetric cipher key.
///
/// The bytes are wiped from memory when the key is dropped.
///
/// 对称密钥的字节包装器，在释放时会清零内存。
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey(Zeroizing<Vec<u8>>);

impl SymmetricKey {
    /// Create a new symmetric key from bytes
    ///
    /// 从字节创建一个新的对称密钥
    pub fn new(bytes: impl Into<Zeroizing<Vec<u8>>>) -> Self {
        Self(bytes.into())
    }

    /// Decodes a lowercase or uppercase hexadecimal key.
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        Ok(Self::new(hex::decode(hex_key)?))
    }

    /// Generates a new random key of `len` bytes from the given source.
    ///
    /// 使用给定的随机源生成一个指定长度的新随机密钥。
    pub fn generate(len: usize, source: RandomSource) -> Result<Self> {
        let mut key_bytes = Zeroizing::new(vec![0u8; len]);
        source.fill(&mut key_bytes)?;
        Ok(Self(key_bytes))
    }

    /// Returns a copy of the key resized to exactly `len` bytes, either by
    /// right-padding with zeros or by truncating.
    ///
    /// 返回一个长度恰好为 `len` 的密钥副本：不足则右侧补零，过长则截断。
    pub fn normalized(&self, len: usize) -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        let n = len.min(self.0.len());
        bytes[..n].copy_from_slice(&self.0[..n]);
        Self(bytes)
    }

    /// Get a reference to the raw bytes of the key
    ///
    /// 获取密钥原始字节的引用
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the key and return the inner bytes
    ///
    /// 消耗密钥并返回内部字节
    pub fn into_bytes(self) -> Zeroizing<Vec<u8>> {
        self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const AES: KeyLengthPolicy = KeyLengthPolicy::new(16, 16, 32, 8);
    const CAST256: KeyLengthPolicy = KeyLengthPolicy::new(16, 16, 32, 4);
    const BLOWFISH: KeyLengthPolicy = KeyLengthPolicy::new(16, 4, 56, 1);

    #[test]
    fn test_valid_length_rounds_up_to_the_next_step() {
        assert_eq!(AES.valid_length(8), 16);
        assert_eq!(AES.valid_length(16), 16);
        assert_eq!(AES.valid_length(17), 24);
        assert_eq!(AES.valid_length(25), 32);
        assert_eq!(AES.valid_length(64), 32);
        assert_eq!(CAST256.valid_length(17), 20);
        assert_eq!(BLOWFISH.valid_length(13), 13);
        assert_eq!(KeyLengthPolicy::fixed(8).valid_length(24), 8);
    }

    #[test]
    fn test_symmetric_key_generate() {
        let key1 = SymmetricKey::generate(32, RandomSource::Rand).unwrap();
        let key2 = SymmetricKey::generate(32, RandomSource::Rand).unwrap();

        assert_eq!(key1.len(), 32);
        assert_ne!(
            key1.as_bytes(),
            key2.as_bytes(),
            "Generated keys should be unique"
        );
    }

    #[test]
    fn test_normalized_pads_and_truncates() {
        let key = SymmetricKey::new(b"00000000".to_vec());
        let padded = key.normalized(16);
        assert_eq!(&padded.as_bytes()[..8], b"00000000");
        assert_eq!(&padded.as_bytes()[8..], &[0u8; 8]);

        let truncated = padded.normalized(4);
        assert_eq!(truncated.as_bytes(), b"0000");
    }

    #[test]
    fn test_hex_round_trip() {
        let key = SymmetricKey::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
        assert_eq!(key.len(), 16);
        assert_eq!(key.to_hex(), "000102030405060708090a0b0c0d0e0f");
        assert!(SymmetricKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_debug_does_not_print_key_bytes() {
        let key = SymmetricKey::new(vec![0xAB; 4]);
        let printed = format!("{:?}", key);
        assert!(!printed.to_lowercase().contains("ab"));
    }

    mod proptests {
        use super::*;

        proptest! {
            #[test]
            fn valid_length_is_always_accepted(n in 0usize..512) {
                for policy in [AES, CAST256, BLOWFISH] {
                    let resolved = policy.valid_length(n);
                    prop_assert!(policy.is_valid(resolved));
                    prop_assert!(resolved >= policy.min && resolved <= policy.max);
                    if n >= policy.min && n <= policy.max {
                        prop_assert!(resolved >= n);
                    }
                }
            }

            #[test]
            fn normalization_is_idempotent(bytes in proptest::collection::vec(any::<u8>(), 0..64), len in 1usize..48) {
                let once = SymmetricKey::new(bytes).normalized(len);
                let twice = once.normalized(len);
                prop_assert_eq!(once.len(), len);
                prop_assert_eq!(once.as_bytes(), twice.as_bytes());
            }
        }
    }
}

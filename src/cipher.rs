//! The stateful cipher instance.
//!
//! A [`CipherInstance`] holds a key, an IV, the plaintext and ciphertext
//! buffers and the algorithm-specific parameters. Block-only settings live in
//! [`block`], encryption in [`engine`] and bulk configuration in [`options`].
//!
//! 有状态的密码实例：持有密钥、初始化向量、明文与密文缓冲区以及算法相关参数。

use crate::algorithms::definitions::{Algorithm, AlgorithmDescriptor, CipherFamily};
use crate::common::mode::BlockMode;
use crate::common::padding::Padding;
use crate::common::rng::RandomSource;
use crate::error::{Error, Result};
use crate::keys::{KeyLengthPolicy, SymmetricKey};
use tracing::debug;

pub mod block;
pub mod engine;
pub mod options;

/// The outcome of a lenient setter: what was asked for and what was used.
///
/// 宽松设置操作的结果：请求的值与实际采用的值。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied<T> {
    pub requested: T,
    pub applied: T,
}

impl<T: PartialEq> Applied<T> {
    /// `true` when the request was used as given.
    pub fn is_exact(&self) -> bool {
        self.requested == self.applied
    }
}

#[derive(Clone, Debug)]
pub(crate) struct BlockSettings {
    pub(crate) mode: BlockMode,
    pub(crate) padding: Padding,
    /// Only set for algorithms with a variable round count.
    pub(crate) rounds: Option<u32>,
    /// Effective key length in bits as last set. `None` follows the key.
    /// Reads clamp it to what the current key length allows.
    pub(crate) effective_key_length: Option<usize>,
}

#[derive(Clone, Debug)]
pub(crate) enum FamilyState {
    Block(BlockSettings),
    Stream,
}

/// A configured cipher, created through the
/// [`CipherFactory`](crate::factory::CipherFactory).
///
/// Instances share no mutable state; each one can be moved to its own thread.
///
/// 通过 `CipherFactory` 创建的已配置密码实例。
#[derive(Clone, Debug)]
pub struct CipherInstance {
    pub(crate) descriptor: &'static AlgorithmDescriptor,
    pub(crate) key_length: usize,
    pub(crate) key: Option<SymmetricKey>,
    pub(crate) iv: Vec<u8>,
    pub(crate) plaintext: Vec<u8>,
    pub(crate) ciphertext: Vec<u8>,
    pub(crate) rng: RandomSource,
    pub(crate) state: FamilyState,
}

impl CipherInstance {
    /// Creates an instance with the algorithm's defaults: default key length,
    /// no key, CBC with PKCS padding for block ciphers and the `rand` RNG.
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        let descriptor = algorithm.descriptor();
        if !descriptor.is_enabled() {
            return Err(Error::DisabledAlgorithm(descriptor.name.to_string()));
        }

        let state = match descriptor.family {
            CipherFamily::Block => {
                let mode = BlockMode::default();
                FamilyState::Block(BlockSettings {
                    mode,
                    padding: mode.default_padding(),
                    rounds: descriptor
                        .rounds
                        .filter(|policy| policy.is_variable())
                        .map(|policy| policy.default_rounds(descriptor.key_length.default)),
                    effective_key_length: None,
                })
            }
            CipherFamily::Stream => FamilyState::Stream,
        };

        debug!(
            "created {} cipher instance ({:?})",
            descriptor.name, descriptor.family
        );

        Ok(Self {
            descriptor,
            key_length: descriptor.key_length.default,
            key: None,
            iv: Vec::new(),
            plaintext: Vec::new(),
            ciphertext: Vec::new(),
            rng: RandomSource::default(),
            state,
        })
    }

    // --- identity ---

    pub fn algorithm(&self) -> Algorithm {
        self.descriptor.algorithm
    }

    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        self.descriptor
    }

    /// The symbolic name of the algorithm, e.g. `"aes"`.
    pub fn cipher_type(&self) -> &'static str {
        self.descriptor.name
    }

    /// The human-readable name of the algorithm, e.g. `"AES"`.
    pub fn algorithm_name(&self) -> &'static str {
        self.descriptor.display_name
    }

    pub fn family(&self) -> CipherFamily {
        self.descriptor.family
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.state, FamilyState::Stream)
    }

    /// Block size in bytes, 1 for stream ciphers.
    pub fn block_size(&self) -> usize {
        self.descriptor.block_size
    }

    // --- key length ---

    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn key_length_policy(&self) -> KeyLengthPolicy {
        self.descriptor.key_length
    }

    pub fn default_key_length(&self) -> usize {
        self.descriptor.key_length.default
    }

    pub fn min_key_length(&self) -> usize {
        self.descriptor.key_length.min
    }

    pub fn max_key_length(&self) -> usize {
        self.descriptor.key_length.max
    }

    pub fn key_length_multiple(&self) -> usize {
        self.descriptor.key_length.multiple
    }

    /// The length `requested` would resolve to. Does not change the instance.
    pub fn valid_key_length(&self, requested: usize) -> usize {
        self.descriptor.key_length.valid_length(requested)
    }

    /// Sets the key length, failing without any change when `length` is not
    /// a length the algorithm accepts.
    ///
    /// 设置密钥长度；若长度不被算法接受则失败且不做任何修改。
    pub fn set_key_length(&mut self, length: usize) -> Result<()> {
        let used = self.valid_key_length(length);
        if used != length {
            return Err(Error::InvalidKeyLength {
                requested: length,
                used,
            });
        }
        self.install_key_length(used);
        Ok(())
    }

    /// Adopts the nearest accepted key length and reports what was used.
    pub fn adjust_key_length(&mut self, length: usize) -> Applied<usize> {
        let applied = self.valid_key_length(length);
        self.install_key_length(applied);
        Applied {
            requested: length,
            applied,
        }
    }

    fn install_key_length(&mut self, length: usize) {
        self.key_length = length;
        if let Some(key) = self.key.as_mut() {
            if key.len() != length {
                *key = key.normalized(length);
            }
        }
    }

    // --- key ---

    /// Installs `key`, zero-padded or truncated to the configured key length.
    pub fn set_key(&mut self, key: impl AsRef<[u8]>) {
        let key = SymmetricKey::new(key.as_ref().to_vec());
        self.key = Some(key.normalized(self.key_length));
    }

    pub fn set_key_hex(&mut self, key: &str) -> Result<()> {
        let key = SymmetricKey::from_hex(key)?;
        self.key = Some(key.normalized(self.key_length));
        Ok(())
    }

    /// Generates a random key of the configured length from the selected RNG.
    pub fn generate_key(&mut self) -> Result<()> {
        self.key = Some(SymmetricKey::generate(self.key_length, self.rng)?);
        Ok(())
    }

    pub fn key(&self) -> Option<&[u8]> {
        self.key.as_ref().map(SymmetricKey::as_bytes)
    }

    pub fn key_hex(&self) -> Option<String> {
        self.key.as_ref().map(SymmetricKey::to_hex)
    }

    // --- IV ---

    pub fn set_iv(&mut self, iv: impl AsRef<[u8]>) {
        self.iv = iv.as_ref().to_vec();
    }

    pub fn set_iv_hex(&mut self, iv: &str) -> Result<()> {
        self.iv = hex::decode(iv)?;
        Ok(())
    }

    /// Draws `length` random bytes from the selected RNG and installs them as
    /// the IV. The previous IV is kept when the RNG fails.
    pub fn set_rand_iv(&mut self, length: usize) -> Result<()> {
        let mut iv = vec![0u8; length];
        self.rng.fill(&mut iv)?;
        self.iv = iv;
        Ok(())
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn iv_hex(&self) -> String {
        hex::encode(&self.iv)
    }

    // --- plaintext / ciphertext ---

    pub fn set_plaintext(&mut self, plaintext: impl AsRef<[u8]>) {
        self.plaintext = plaintext.as_ref().to_vec();
    }

    pub fn set_plaintext_hex(&mut self, plaintext: &str) -> Result<()> {
        self.plaintext = hex::decode(plaintext)?;
        Ok(())
    }

    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    pub fn plaintext_hex(&self) -> String {
        hex::encode(&self.plaintext)
    }

    pub fn set_ciphertext(&mut self, ciphertext: impl AsRef<[u8]>) {
        self.ciphertext = ciphertext.as_ref().to_vec();
    }

    pub fn set_ciphertext_hex(&mut self, ciphertext: &str) -> Result<()> {
        self.ciphertext = hex::decode(ciphertext)?;
        Ok(())
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn ciphertext_hex(&self) -> String {
        hex::encode(&self.ciphertext)
    }

    // --- RNG ---

    pub fn rng(&self) -> RandomSource {
        self.rng
    }

    pub fn rng_name(&self) -> &'static str {
        self.rng.symbol()
    }

    /// Selects the RNG used by [`set_rand_iv`](Self::set_rand_iv) and
    /// [`generate_key`](Self::generate_key). Accepts a [`RandomSource`] or its
    /// symbolic name.
    ///
    /// 选择随机数源；接受 `RandomSource` 或其符号名称。
    pub fn set_rng<R>(&mut self, rng: R) -> Result<()>
    where
        R: TryInto<RandomSource>,
        Error: From<R::Error>,
    {
        let rng = rng.try_into()?;
        if !rng.is_available() {
            tracing::warn!("RNG '{}' is not available on this host", rng.symbol());
            return Err(Error::RngUnavailable(rng.symbol()));
        }
        self.rng = rng;
        Ok(())
    }

    // --- helpers for the block and engine modules ---

    pub(crate) fn block_settings(&self) -> Option<&BlockSettings> {
        match &self.state {
            FamilyState::Block(settings) => Some(settings),
            FamilyState::Stream => None,
        }
    }

    pub(crate) fn block_settings_mut(&mut self, operation: &'static str) -> Result<&mut BlockSettings> {
        match &mut self.state {
            FamilyState::Block(settings) => Ok(settings),
            FamilyState::Stream => Err(Error::InvalidOperationForCipherType {
                operation,
                algorithm: self.descriptor.name,
            }),
        }
    }
}

/// The largest effective key length, in bits, a key of `key_length` bytes
/// supports.
pub(crate) fn effective_limit(key_length: usize) -> usize {
    (key_length * 8).min(1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_algorithm_cannot_be_instantiated() {
        assert!(matches!(
            CipherInstance::new(Algorithm::Mars),
            Err(Error::DisabledAlgorithm(name)) if name == "mars"
        ));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_key_is_normalized_to_the_key_length() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        assert!(cipher.key().is_none());

        cipher.set_key(b"00000000");
        let key = cipher.key().unwrap();
        assert_eq!(key.len(), 16);
        assert_eq!(&key[..8], b"00000000");
        assert!(key[8..].iter().all(|b| *b == 0));

        cipher.set_key([1u8; 40]);
        assert_eq!(cipher.key().unwrap(), &[1u8; 16]);
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_strict_and_lenient_key_length() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        cipher.set_key([9u8; 16]);

        let err = cipher.set_key_length(20).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidKeyLength {
                requested: 20,
                used: 24
            }
        ));
        assert_eq!(cipher.key_length(), 16);

        let applied = cipher.adjust_key_length(20);
        assert_eq!(applied.applied, 24);
        assert!(!applied.is_exact());
        assert_eq!(cipher.key_length(), 24);
        assert_eq!(cipher.key().unwrap().len(), 24);

        cipher.set_key_length(32).unwrap();
        assert_eq!(cipher.key().unwrap().len(), 32);
        assert_eq!(cipher.valid_key_length(1), 16);
        assert_eq!(cipher.key_length(), 32);
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_hex_accessors() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        cipher.set_iv_hex("000102030405060708090A0B0C0D0E0F").unwrap();
        assert_eq!(cipher.iv_hex(), "000102030405060708090a0b0c0d0e0f");
        assert!(cipher.set_plaintext_hex("xyz").is_err());
        assert!(cipher.plaintext().is_empty());
        cipher.set_ciphertext(b"\x01\xff");
        assert_eq!(cipher.ciphertext_hex(), "01ff");
        assert_eq!(cipher.key_hex(), None);
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_rng_selection() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        assert_eq!(cipher.rng(), RandomSource::Rand);
        assert!(matches!(cipher.set_rng("dice"), Err(Error::InvalidRng(_))));
        assert_eq!(cipher.rng(), RandomSource::Rand);

        for source in RandomSource::available() {
            cipher.set_rng(source).unwrap();
            assert_eq!(cipher.rng(), source);
        }

        cipher.set_rng("rand").unwrap();
        cipher.set_rand_iv(16).unwrap();
        assert_eq!(cipher.iv().len(), 16);
        cipher.generate_key().unwrap();
        assert_eq!(cipher.key().unwrap().len(), 16);
    }
}

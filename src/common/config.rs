//! Named options for bulk configuration of a cipher instance.
//!
//! 用于批量配置密码实例的命名选项。

use crate::common::mode::BlockMode;
use crate::common::padding::Padding;
use crate::common::rng::RandomSource;
use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The value attached to a named option.
///
/// 命名选项的取值。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Bytes(Vec<u8>),
    Text(String),
    Number(usize),
}

impl OptionValue {
    fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bytes(_) => "bytes",
            OptionValue::Text(_) => "text",
            OptionValue::Number(_) => "number",
        }
    }
}

impl From<Vec<u8>> for OptionValue {
    fn from(value: Vec<u8>) -> Self {
        OptionValue::Bytes(value)
    }
}

impl From<&[u8]> for OptionValue {
    fn from(value: &[u8]) -> Self {
        OptionValue::Bytes(value.to_vec())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        OptionValue::Number(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Number(value as usize)
    }
}

/// A set of options to apply to a
/// [`CipherInstance`](crate::cipher::CipherInstance) in one call.
///
/// Fields left as `None` are not touched. Mutually exclusive fields are
/// checked when the options are applied, not when they are built.
///
/// 一次性应用到密码实例上的选项集合。为 `None` 的字段不会被修改。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CipherOptions {
    pub plaintext: Option<Vec<u8>>,
    pub plaintext_hex: Option<String>,
    pub ciphertext: Option<Vec<u8>>,
    pub ciphertext_hex: Option<String>,
    pub key: Option<Vec<u8>>,
    pub key_hex: Option<String>,
    pub key_length: Option<usize>,
    /// RC2 only, in bits.
    pub effective_key_length: Option<usize>,
    pub rounds: Option<u32>,
    pub rng: Option<RandomSource>,
    /// Draws an IV of this many bytes from the selected RNG.
    pub rand_iv: Option<usize>,
    pub iv: Option<Vec<u8>>,
    pub iv_hex: Option<String>,
    pub block_mode: Option<BlockMode>,
    pub padding: Option<Padding>,
}

impl CipherOptions {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Builds options from `(name, value)` pairs.
    ///
    /// Names are the field names of this struct. Text values for `rng`,
    /// `block_mode` and `padding` are parsed through their catalogs, so an
    /// unknown catalog name fails here with the matching `Invalid*` error.
    ///
    /// 从 `(名称, 值)` 对构建选项。
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, OptionValue)>,
        K: AsRef<str>,
    {
        let mut options = Self::default();
        let mut seen = HashSet::new();

        for (name, value) in pairs {
            let name = name.as_ref();
            if !seen.insert(name.to_string()) {
                return Err(Error::ConflictingOption {
                    first: name.to_string(),
                    second: name.to_string(),
                });
            }
            options.set_named(name, value)?;
        }

        Ok(options)
    }

    fn set_named(&mut self, name: &str, value: OptionValue) -> Result<()> {
        match name {
            "plaintext" => self.plaintext = Some(bytes(name, value)?),
            "plaintext_hex" => self.plaintext_hex = Some(text(name, value)?),
            "ciphertext" => self.ciphertext = Some(bytes(name, value)?),
            "ciphertext_hex" => self.ciphertext_hex = Some(text(name, value)?),
            "key" => self.key = Some(bytes(name, value)?),
            "key_hex" => self.key_hex = Some(text(name, value)?),
            "key_length" => self.key_length = Some(number(name, value)?),
            "effective_key_length" => self.effective_key_length = Some(number(name, value)?),
            "rounds" => {
                let rounds = number(name, value)?;
                self.rounds = Some(u32::try_from(rounds).map_err(|_| {
                    Error::InvalidOptionValue {
                        option: name.to_string(),
                        expected: "a round count that fits in 32 bits",
                    }
                })?);
            }
            "rng" => self.rng = Some(text(name, value)?.parse()?),
            "rand_iv" => self.rand_iv = Some(number(name, value)?),
            "iv" => self.iv = Some(bytes(name, value)?),
            "iv_hex" => self.iv_hex = Some(text(name, value)?),
            "block_mode" => self.block_mode = Some(text(name, value)?.parse()?),
            "padding" => self.padding = Some(text(name, value)?.parse()?),
            _ => return Err(Error::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Returns `true` when no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn bytes(name: &str, value: OptionValue) -> Result<Vec<u8>> {
    match value {
        OptionValue::Bytes(b) => Ok(b),
        OptionValue::Text(s) => Ok(s.into_bytes()),
        other => Err(mismatch(name, &other, "bytes")),
    }
}

fn text(name: &str, value: OptionValue) -> Result<String> {
    match value {
        OptionValue::Text(s) => Ok(s),
        other => Err(mismatch(name, &other, "text")),
    }
}

fn number(name: &str, value: OptionValue) -> Result<usize> {
    match value {
        OptionValue::Number(n) => Ok(n),
        other => Err(mismatch(name, &other, "a number")),
    }
}

fn mismatch(name: &str, got: &OptionValue, expected: &'static str) -> Error {
    tracing::debug!("option '{}' got a {} value", name, got.kind());
    Error::InvalidOptionValue {
        option: name.to_string(),
        expected,
    }
}

/// Chained builder for [`CipherOptions`].
#[derive(Clone, Debug, Default)]
pub struct OptionsBuilder {
    options: CipherOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_plaintext(mut self, plaintext: impl Into<Vec<u8>>) -> Self {
        self.options.plaintext = Some(plaintext.into());
        self
    }

    pub fn set_plaintext_hex(mut self, plaintext: impl Into<String>) -> Self {
        self.options.plaintext_hex = Some(plaintext.into());
        self
    }

    pub fn set_ciphertext(mut self, ciphertext: impl Into<Vec<u8>>) -> Self {
        self.options.ciphertext = Some(ciphertext.into());
        self
    }

    pub fn set_ciphertext_hex(mut self, ciphertext: impl Into<String>) -> Self {
        self.options.ciphertext_hex = Some(ciphertext.into());
        self
    }

    pub fn set_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.options.key = Some(key.into());
        self
    }

    pub fn set_key_hex(mut self, key: impl Into<String>) -> Self {
        self.options.key_hex = Some(key.into());
        self
    }

    pub fn set_key_length(mut self, key_length: usize) -> Self {
        self.options.key_length = Some(key_length);
        self
    }

    pub fn set_effective_key_length(mut self, bits: usize) -> Self {
        self.options.effective_key_length = Some(bits);
        self
    }

    pub fn set_rounds(mut self, rounds: u32) -> Self {
        self.options.rounds = Some(rounds);
        self
    }

    pub fn set_rng(mut self, rng: RandomSource) -> Self {
        self.options.rng = Some(rng);
        self
    }

    pub fn set_rand_iv(mut self, length: usize) -> Self {
        self.options.rand_iv = Some(length);
        self
    }

    pub fn set_iv(mut self, iv: impl Into<Vec<u8>>) -> Self {
        self.options.iv = Some(iv.into());
        self
    }

    pub fn set_iv_hex(mut self, iv: impl Into<String>) -> Self {
        self.options.iv_hex = Some(iv.into());
        self
    }

    pub fn set_block_mode(mut self, mode: BlockMode) -> Self {
        self.options.block_mode = Some(mode);
        self
    }

    pub fn set_padding(mut self, padding: Padding) -> Self {
        self.options.padding = Some(padding);
        self
    }

    pub fn build(self) -> CipherOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let options = CipherOptions::builder()
            .set_key_hex("00ff")
            .set_block_mode(BlockMode::Ecb)
            .set_padding(Padding::Zeros)
            .set_rand_iv(16)
            .build();

        assert_eq!(options.key_hex.as_deref(), Some("00ff"));
        assert_eq!(options.block_mode, Some(BlockMode::Ecb));
        assert_eq!(options.padding, Some(Padding::Zeros));
        assert_eq!(options.rand_iv, Some(16));
        assert!(options.key.is_none());
        assert!(!options.is_empty());
        assert!(CipherOptions::default().is_empty());
    }

    #[test]
    fn test_from_pairs_parses_catalog_names() {
        let options = CipherOptions::from_pairs([
            ("block_mode", OptionValue::from("counter")),
            ("padding", OptionValue::from("none")),
            ("rng", OptionValue::from("rand")),
            ("key_length", OptionValue::from(24usize)),
            ("plaintext", OptionValue::from("hello")),
        ])
        .unwrap();

        assert_eq!(options.block_mode, Some(BlockMode::Ctr));
        assert_eq!(options.padding, Some(Padding::None));
        assert_eq!(options.rng, Some(RandomSource::Rand));
        assert_eq!(options.key_length, Some(24));
        assert_eq!(options.plaintext.as_deref(), Some(&b"hello"[..]));
    }

    #[test]
    fn test_from_pairs_rejects_bad_input() {
        assert!(matches!(
            CipherOptions::from_pairs([("nonce", OptionValue::from(1usize))]),
            Err(Error::UnknownOption(name)) if name == "nonce"
        ));
        assert!(matches!(
            CipherOptions::from_pairs([("key_length", OptionValue::from("16"))]),
            Err(Error::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            CipherOptions::from_pairs([("block_mode", OptionValue::from("gcm"))]),
            Err(Error::InvalidMode(_))
        ));
        assert!(matches!(
            CipherOptions::from_pairs([
                ("key", OptionValue::from("a")),
                ("key", OptionValue::from("b")),
            ]),
            Err(Error::ConflictingOption { .. })
        ));
    }
}

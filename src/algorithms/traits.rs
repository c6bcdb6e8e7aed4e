//! Defines the seam between the cipher engine and the external primitives.
//!
//! 定义密码引擎与外部密码学原语之间的接口。

use crate::common::mode::BlockMode;
use crate::common::padding::Padding;
use cipher::block_padding::UnpadError;
use cipher::{InvalidLength, StreamCipherError};
use thiserror::Error;

/// Direction of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// An opaque failure reported by a primitive. The message is carried through
/// to the caller without reinterpretation.
///
/// 原语报告的不透明错误，消息原样传递给调用方。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PrimitiveError {
    message: String,
}

impl PrimitiveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<InvalidLength> for PrimitiveError {
    fn from(_: InvalidLength) -> Self {
        Self::new("invalid key or IV length for the primitive")
    }
}

impl From<UnpadError> for PrimitiveError {
    fn from(_: UnpadError) -> Self {
        Self::new("invalid padding encountered while decrypting")
    }
}

impl From<StreamCipherError> for PrimitiveError {
    fn from(_: StreamCipherError) -> Self {
        Self::new("keystream exhausted")
    }
}

/// Everything a block primitive needs for one transform.
#[derive(Clone, Copy, Debug)]
pub struct BlockParams<'a> {
    pub key: &'a [u8],
    pub iv: &'a [u8],
    pub mode: BlockMode,
    pub padding: Padding,
    pub rounds: u32,
    /// Effective key length in bits, only ever set for RC2.
    pub effective_key_length: Option<usize>,
}

/// Represents a concrete block cipher primitive.
/// This is an object-safe trait that erases the concrete algorithm type.
///
/// 表示一个具体的分组密码原语。
/// 这是一个对象安全的 trait，它擦除了具体的算法类型。
pub trait BlockPrimitive: Send + Sync + 'static {
    /// Runs the primitive over `input` in the configured mode and padding.
    fn transform(
        &self,
        direction: Direction,
        params: &BlockParams<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError>;

    fn encrypt(&self, params: &BlockParams<'_>, input: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        self.transform(Direction::Encrypt, params, input)
    }

    fn decrypt(&self, params: &BlockParams<'_>, input: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        self.transform(Direction::Decrypt, params, input)
    }
}

/// Represents a concrete stream cipher primitive. Encryption and decryption
/// are the same keystream application.
pub trait StreamPrimitive: Send + Sync + 'static {
    fn apply_keystream(&self, key: &[u8], input: &[u8]) -> Result<Vec<u8>, PrimitiveError>;
}

/// The construction capability attached to an enabled algorithm.
#[derive(Clone, Copy)]
pub enum Primitive {
    Block(&'static dyn BlockPrimitive),
    Stream(&'static dyn StreamPrimitive),
}

impl std::fmt::Debug for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Block(_) => f.write_str("Primitive::Block"),
            Primitive::Stream(_) => f.write_str("Primitive::Stream"),
        }
    }
}

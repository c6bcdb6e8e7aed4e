use crate::algorithms::traits::PrimitiveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown cipher algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("cipher algorithm '{0}' has been disabled in this build")]
    DisabledAlgorithm(String),

    #[error("can't set both {first} and {second} in options")]
    ConflictingOption { first: String, second: String },

    #[error("option '{option}' can't be used with the {algorithm} cipher")]
    UnsupportedOption {
        option: &'static str,
        algorithm: &'static str,
    },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{option}' expects {expected}")]
    InvalidOptionValue {
        option: String,
        expected: &'static str,
    },

    #[error("tried to set a key length of {requested} but {used} was used")]
    InvalidKeyLength { requested: usize, used: usize },

    #[error("tried to set an effective key length of {requested} but {used} was used")]
    InvalidEffectiveKeyLength { requested: usize, used: usize },

    #[error("初始化向量长度无效：需要 {expected} 字节，实际为 {actual} 字节")]
    InvalidIvLength { expected: usize, actual: usize },

    #[error("尚未设置密钥")]
    MissingKey,

    #[error("invalid cipher mode '{0}'")]
    InvalidMode(String),

    #[error("invalid cipher padding '{0}'")]
    InvalidPadding(String),

    #[error("padding '{padding}' cannot be used with mode '{mode}'")]
    IncompatiblePadding {
        padding: &'static str,
        mode: &'static str,
    },

    #[error("can't set {operation} on the {algorithm} cipher")]
    InvalidOperationForCipherType {
        operation: &'static str,
        algorithm: &'static str,
    },

    #[error("invalid cipher RNG '{0}'")]
    InvalidRng(String),

    #[error("RNG '{0}' is unavailable")]
    RngUnavailable(&'static str),

    #[error("tried to set the number of rounds to {requested} but {used} was used instead")]
    InvalidRounds { requested: u32, used: u32 },

    #[error("十六进制数据解码失败: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("底层密码学原语返回错误: {0}")]
    CryptoFailure(#[from] PrimitiveError),

    #[error("Infallible Error: {0:?}")]
    Infallible(#[from] core::convert::Infallible),
}

impl Error {
    /// Returns `true` when the error was caused by caller input rather than by
    /// the underlying cipher primitive.
    ///
    /// 当错误由调用方输入引起（而非底层原语失败）时返回 `true`。
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::CryptoFailure(_))
    }
}

// 定义一个统一的 Result 类型
pub type Result<T> = std::result::Result<T, Error>;

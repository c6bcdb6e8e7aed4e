//! The block mode catalog.
//!
//! 分组模式目录。

use crate::common::padding::Padding;
use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A block cipher mode of operation.
///
/// ECB and CBC process whole blocks and therefore need a padding scheme for
/// unaligned input. CFB, OFB and CTR turn the block cipher into a stream and
/// only accept [`Padding::None`].
///
/// 分组密码的工作模式。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockMode {
    /// Electronic codebook.
    Ecb,
    /// Cipher block chaining. This is the default for every block cipher.
    #[default]
    Cbc,
    /// Full-block cipher feedback.
    Cfb,
    /// Output feedback.
    Ofb,
    /// Counter mode, the whole block is a big-endian counter.
    Ctr,
}

const ALIGNED_PADDINGS: &[Padding] = &[
    Padding::None,
    Padding::Zeros,
    Padding::Pkcs,
    Padding::OneAndZeros,
    Padding::AnsiX923,
];

const STREAM_PADDINGS: &[Padding] = &[Padding::None];

impl BlockMode {
    pub const ALL: [BlockMode; 5] = [
        BlockMode::Ecb,
        BlockMode::Cbc,
        BlockMode::Cfb,
        BlockMode::Ofb,
        BlockMode::Ctr,
    ];

    /// The symbolic name accepted by [`FromStr`].
    pub fn symbol(self) -> &'static str {
        match self {
            BlockMode::Ecb => "ecb",
            BlockMode::Cbc => "cbc",
            BlockMode::Cfb => "cfb",
            BlockMode::Ofb => "ofb",
            BlockMode::Ctr => "counter",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BlockMode::Ecb => "ECB",
            BlockMode::Cbc => "CBC",
            BlockMode::Cfb => "CFB",
            BlockMode::Ofb => "OFB",
            BlockMode::Ctr => "CTR",
        }
    }

    /// Whether the mode consumes an initialization vector.
    pub fn requires_iv(self) -> bool {
        !matches!(self, BlockMode::Ecb)
    }

    /// Whether input must be a whole number of blocks after padding.
    pub fn is_block_aligned(self) -> bool {
        matches!(self, BlockMode::Ecb | BlockMode::Cbc)
    }

    /// The paddings this mode accepts.
    ///
    /// 该模式接受的填充方案。
    pub fn allowed_paddings(self) -> &'static [Padding] {
        if self.is_block_aligned() {
            ALIGNED_PADDINGS
        } else {
            STREAM_PADDINGS
        }
    }

    /// The padding installed whenever this mode is selected.
    pub fn default_padding(self) -> Padding {
        if self.is_block_aligned() {
            Padding::Pkcs
        } else {
            Padding::None
        }
    }

    pub fn accepts(self, padding: Padding) -> bool {
        self.allowed_paddings().contains(&padding)
    }
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BlockMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ecb" => Ok(BlockMode::Ecb),
            "cbc" => Ok(BlockMode::Cbc),
            "cfb" => Ok(BlockMode::Cfb),
            "ofb" => Ok(BlockMode::Ofb),
            "counter" | "ctr" => Ok(BlockMode::Ctr),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<&str> for BlockMode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

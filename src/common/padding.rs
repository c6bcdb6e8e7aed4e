//! The padding catalog.
//!
//! 填充方案目录。
use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A padding scheme for block-aligned modes.
///
/// Which paddings a mode accepts is declared by
/// [`BlockMode::allowed_paddings`](crate::common::mode::BlockMode::allowed_paddings).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Padding {
    /// No padding. Input to ECB/CBC must already be block aligned.
    None,
    /// Zero bytes up to the block boundary, stripped on decrypt.
    Zeros,
    /// PKCS#7.
    Pkcs,
    /// A single `0x80` byte followed by zeros (ISO/IEC 7816-4).
    OneAndZeros,
    /// Zeros followed by the pad length (ANSI X9.23).
    AnsiX923,
}

impl Padding {
    pub const ALL: [Padding; 5] = [
        Padding::None,
        Padding::Zeros,
        Padding::Pkcs,
        Padding::OneAndZeros,
        Padding::AnsiX923,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Padding::None => "none",
            Padding::Zeros => "zeroes",
            Padding::Pkcs => "pkcs",
            Padding::OneAndZeros => "one_and_zeroes",
            Padding::AnsiX923 => "ansi_x923",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Padding::None => "NoPadding",
            Padding::Zeros => "ZerosPadding",
            Padding::Pkcs => "PKCSPadding",
            Padding::OneAndZeros => "OneAndZerosPadding",
            Padding::AnsiX923 => "ANSIX923Padding",
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Padding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Padding::None),
            "zeroes" | "zeros" => Ok(Padding::Zeros),
            "pkcs" | "pkcs7" => Ok(Padding::Pkcs),
            "one_and_zeroes" | "one_and_zeros" => Ok(Padding::OneAndZeros),
            "ansi_x923" => Ok(Padding::AnsiX923),
            _ => Err(Error::InvalidPadding(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Padding {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

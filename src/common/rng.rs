//! Randomness sources used to generate initialization vectors.
//!
//! 用于生成初始化向量的随机数源。

use crate::error::{Error, Result};
use rand::rngs::OsRng;
use rand::{RngCore, TryRngCore};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[cfg(unix)]
const BLOCKING_DEVICE: &str = "/dev/random";

/// A selectable source of random bytes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RandomSource {
    /// Thread-local CSPRNG seeded from the OS. Always available.
    #[default]
    Rand,
    /// OS entropy that never blocks.
    NonBlocking,
    /// OS entropy that may block until the pool is ready (`/dev/random`).
    Blocking,
}

impl RandomSource {
    pub const ALL: [RandomSource; 3] = [
        RandomSource::Rand,
        RandomSource::NonBlocking,
        RandomSource::Blocking,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            RandomSource::Rand => "rand",
            RandomSource::NonBlocking => "non_blocking",
            RandomSource::Blocking => "blocking",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RandomSource::Rand => "ThreadRng",
            RandomSource::NonBlocking => "OsRng",
            RandomSource::Blocking => "BlockingRng",
        }
    }

    /// Probes whether the source can produce randomness on this host.
    ///
    /// 探测该随机源在当前主机上是否可用。
    pub fn is_available(self) -> bool {
        match self {
            RandomSource::Rand => true,
            RandomSource::NonBlocking => OsRng.try_next_u32().is_ok(),
            RandomSource::Blocking => blocking_available(),
        }
    }

    /// All sources usable on this host, in catalog order.
    pub fn available() -> Vec<RandomSource> {
        Self::ALL
            .into_iter()
            .filter(|source| source.is_available())
            .collect()
    }

    /// `false` for unknown names as well as unusable sources.
    pub fn is_available_named(name: &str) -> bool {
        name.parse::<RandomSource>()
            .map(RandomSource::is_available)
            .unwrap_or(false)
    }

    /// Fills `buf` from this source.
    pub fn fill(self, buf: &mut [u8]) -> Result<()> {
        match self {
            RandomSource::Rand => {
                rand::rng().fill_bytes(buf);
                Ok(())
            }
            RandomSource::NonBlocking => OsRng.try_fill_bytes(buf).map_err(|e| {
                warn!("OS random source failed: {}", e);
                Error::RngUnavailable(self.symbol())
            }),
            RandomSource::Blocking => fill_blocking(buf),
        }
    }
}

#[cfg(unix)]
fn blocking_available() -> bool {
    std::path::Path::new(BLOCKING_DEVICE).exists()
}

#[cfg(not(unix))]
fn blocking_available() -> bool {
    false
}

#[cfg(unix)]
fn fill_blocking(buf: &mut [u8]) -> Result<()> {
    use std::io::Read;

    std::fs::File::open(BLOCKING_DEVICE)
        .and_then(|mut device| device.read_exact(buf))
        .map_err(|e| {
            warn!("reading {} failed: {}", BLOCKING_DEVICE, e);
            Error::RngUnavailable(RandomSource::Blocking.symbol())
        })
}

#[cfg(not(unix))]
fn fill_blocking(_buf: &mut [u8]) -> Result<()> {
    Err(Error::RngUnavailable(RandomSource::Blocking.symbol()))
}

impl fmt::Display for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for RandomSource {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rand" => Ok(RandomSource::Rand),
            "non_blocking" => Ok(RandomSource::NonBlocking),
            "blocking" => Ok(RandomSource::Blocking),
            _ => Err(Error::InvalidRng(s.to_string())),
        }
    }
}

impl TryFrom<&str> for RandomSource {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

//! The static algorithm catalog.
//!
//! Every cipher the engine knows about has exactly one entry here, whether or
//! not its primitive was compiled in. The order of [`DESCRIPTORS`] is the
//! registration order reported by the registry.
//!
//! 静态算法目录。无论原语是否被编译进来，每个已知的密码算法在这里都恰好有一个条目。

use super::stream;
use super::symmetric;
use super::traits::Primitive;
use crate::keys::KeyLengthPolicy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// 密码算法枚举
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    ThreeWay,
    Aes,
    Blowfish,
    Camellia,
    Cast128,
    Cast256,
    Des,
    DesEde2,
    DesEde3,
    DesXex3,
    Gost,
    Idea,
    Mars,
    Rc2,
    Rc5,
    Rc6,
    Serpent,
    Shacal2,
    Skipjack,
    Square,
    Tea,
    Twofish,
    Arc4,
    Marc4,
    Panama,
    Seal,
}

impl Algorithm {
    /// The catalog entry for this algorithm.
    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn is_enabled(self) -> bool {
        self.descriptor().is_enabled()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an algorithm transforms fixed-size blocks or a keystream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherFamily {
    Block,
    Stream,
}

/// How an algorithm's round count is determined.
///
/// 算法轮数的确定方式。
#[derive(Clone, Copy, Debug)]
pub enum RoundsPolicy {
    /// Always the same number of rounds.
    Fixed(u32),
    /// Determined by the key length in bytes.
    Derived(fn(usize) -> u32),
    /// Caller-selectable within `[min, max]`.
    Variable { default: u32, min: u32, max: u32 },
}

impl RoundsPolicy {
    /// The round count used for a fresh instance with `key_length` bytes of key.
    pub fn default_rounds(&self, key_length: usize) -> u32 {
        match *self {
            RoundsPolicy::Fixed(rounds) => rounds,
            RoundsPolicy::Derived(derive) => derive(key_length),
            RoundsPolicy::Variable { default, .. } => default,
        }
    }

    /// The round count that would actually be used if `requested` were set.
    pub fn resolve(&self, requested: u32, key_length: usize) -> u32 {
        match *self {
            RoundsPolicy::Variable { min, max, .. } => requested.clamp(min, max),
            _ => self.default_rounds(key_length),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, RoundsPolicy::Variable { .. })
    }
}

/// An immutable catalog entry.
///
/// 不可变的目录条目。
#[derive(Debug)]
pub struct AlgorithmDescriptor {
    pub algorithm: Algorithm,
    /// Canonical symbolic name.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub display_name: &'static str,
    pub family: CipherFamily,
    /// Block size in bytes, 1 for stream ciphers.
    pub block_size: usize,
    pub key_length: KeyLengthPolicy,
    /// `None` for stream ciphers.
    pub rounds: Option<RoundsPolicy>,
    /// Whether an effective key length (in bits) applies.
    pub effective_key_length: bool,
    /// `None` when the primitive was compiled out.
    pub primitive: Option<Primitive>,
}

impl AlgorithmDescriptor {
    pub fn is_enabled(&self) -> bool {
        self.primitive.is_some()
    }

    pub fn is_stream(&self) -> bool {
        self.family == CipherFamily::Stream
    }

    /// Whether `name` is the canonical name or an alias, ignoring ASCII case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

fn aes_rounds(key_length: usize) -> u32 {
    (key_length / 4 + 6) as u32
}

fn camellia_rounds(key_length: usize) -> u32 {
    if key_length == 16 {
        18
    } else {
        24
    }
}

fn cast128_rounds(key_length: usize) -> u32 {
    if key_length <= 10 {
        12
    } else {
        16
    }
}

const fn block_entry(
    algorithm: Algorithm,
    name: &'static str,
    display_name: &'static str,
    block_size: usize,
    key_length: KeyLengthPolicy,
    rounds: RoundsPolicy,
    primitive: Option<Primitive>,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        algorithm,
        name,
        aliases: &[],
        display_name,
        family: CipherFamily::Block,
        block_size,
        key_length,
        rounds: Some(rounds),
        effective_key_length: false,
        primitive,
    }
}

const fn stream_entry(
    algorithm: Algorithm,
    name: &'static str,
    display_name: &'static str,
    key_length: KeyLengthPolicy,
    primitive: Option<Primitive>,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        algorithm,
        name,
        aliases: &[],
        display_name,
        family: CipherFamily::Stream,
        block_size: 1,
        key_length,
        rounds: None,
        effective_key_length: false,
        primitive,
    }
}

const fn with_aliases(
    mut descriptor: AlgorithmDescriptor,
    aliases: &'static [&'static str],
) -> AlgorithmDescriptor {
    descriptor.aliases = aliases;
    descriptor
}

use Algorithm as A;
use KeyLengthPolicy as K;
use RoundsPolicy::{Derived, Fixed, Variable};

/// Every algorithm, indexed by `Algorithm as usize`.
pub static DESCRIPTORS: [AlgorithmDescriptor; 26] = [
    with_aliases(
        block_entry(A::ThreeWay, "threeway", "3-Way", 12, K::fixed(12), Fixed(11), None),
        &["3way"],
    ),
    with_aliases(
        block_entry(A::Aes, "aes", "AES", 16, K::new(16, 16, 32, 8), Derived(aes_rounds), symmetric::AES),
        &["rijndael"],
    ),
    block_entry(A::Blowfish, "blowfish", "Blowfish", 8, K::new(16, 4, 56, 1), Fixed(16), symmetric::BLOWFISH),
    block_entry(A::Camellia, "camellia", "Camellia", 16, K::new(16, 16, 32, 8), Derived(camellia_rounds), symmetric::CAMELLIA),
    block_entry(A::Cast128, "cast128", "CAST-128", 8, K::new(16, 5, 16, 1), Derived(cast128_rounds), symmetric::CAST128),
    block_entry(A::Cast256, "cast256", "CAST-256", 16, K::new(16, 16, 32, 4), Fixed(48), symmetric::CAST256),
    block_entry(A::Des, "des", "DES", 8, K::fixed(8), Fixed(16), symmetric::DES),
    block_entry(A::DesEde2, "des_ede2", "DES-EDE2", 8, K::fixed(16), Fixed(16), symmetric::DES_EDE2),
    block_entry(A::DesEde3, "des_ede3", "DES-EDE3", 8, K::fixed(24), Fixed(16), symmetric::DES_EDE3),
    block_entry(A::DesXex3, "des_xex3", "DES-XEX3", 8, K::fixed(24), Fixed(16), None),
    block_entry(A::Gost, "gost", "GOST", 8, K::fixed(32), Fixed(32), symmetric::GOST),
    block_entry(A::Idea, "idea", "IDEA", 8, K::fixed(16), Fixed(8), symmetric::IDEA),
    block_entry(A::Mars, "mars", "MARS", 16, K::new(16, 16, 56, 4), Fixed(32), None),
    AlgorithmDescriptor {
        effective_key_length: true,
        ..block_entry(A::Rc2, "rc2", "RC2", 8, K::new(16, 1, 128, 1), Fixed(16), symmetric::RC2)
    },
    block_entry(A::Rc5, "rc5", "RC5", 8, K::new(16, 0, 255, 1), Variable { default: 16, min: 0, max: 255 }, None),
    block_entry(A::Rc6, "rc6", "RC6", 16, K::new(16, 0, 255, 1), Variable { default: 20, min: 0, max: 255 }, None),
    block_entry(A::Serpent, "serpent", "Serpent", 16, K::new(16, 16, 32, 8), Fixed(32), symmetric::SERPENT),
    block_entry(A::Shacal2, "shacal2", "SHACAL-2", 32, K::new(16, 16, 64, 4), Fixed(64), None),
    block_entry(A::Skipjack, "skipjack", "SKIPJACK", 8, K::fixed(10), Fixed(32), None),
    block_entry(A::Square, "square", "Square", 16, K::fixed(16), Fixed(8), None),
    block_entry(A::Tea, "tea", "TEA", 8, K::fixed(16), Variable { default: 32, min: 1, max: 255 }, None),
    block_entry(A::Twofish, "twofish", "Twofish", 16, K::new(16, 16, 32, 8), Fixed(16), symmetric::TWOFISH),
    with_aliases(
        stream_entry(A::Arc4, "arc4", "ARC4", K::new(16, 1, 256, 1), stream::ARC4),
        &["rc4"],
    ),
    stream_entry(A::Marc4, "marc4", "MARC4", K::new(16, 1, 256, 1), stream::MARC4),
    stream_entry(A::Panama, "panama", "Panama", K::fixed(32), None),
    stream_entry(A::Seal, "seal", "SEAL", K::fixed(20), None),
];

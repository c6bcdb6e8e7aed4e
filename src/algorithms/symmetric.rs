//! Block cipher primitives backed by the RustCrypto block cipher crates.
//!
//! Each algorithm gets a unit-struct wrapper implementing [`BlockPrimitive`].
//! The wrapper keys the concrete cipher and hands it to the mode drivers in
//! [`super::modes`]. OFB and CTR are instantiated per concrete cipher type.
//!
//! 由 RustCrypto 分组密码库支持的分组密码原语。

use super::traits::Primitive;
#[cfg(any(
    feature = "aes",
    feature = "blowfish",
    feature = "camellia",
    feature = "cast128",
    feature = "cast256",
    feature = "des",
    feature = "gost",
    feature = "idea",
    feature = "rc2",
    feature = "serpent",
    feature = "twofish"
))]
use super::{
    modes,
    traits::{BlockParams, BlockPrimitive, Direction, PrimitiveError},
};
#[cfg(any(
    feature = "aes",
    feature = "blowfish",
    feature = "camellia",
    feature = "cast128",
    feature = "cast256",
    feature = "des",
    feature = "gost",
    feature = "idea",
    feature = "rc2",
    feature = "serpent",
    feature = "twofish"
))]
use crate::common::mode::BlockMode;
#[cfg(any(
    feature = "aes",
    feature = "blowfish",
    feature = "camellia",
    feature = "cast128",
    feature = "cast256",
    feature = "des",
    feature = "gost",
    feature = "idea",
    feature = "rc2",
    feature = "serpent",
    feature = "twofish"
))]
use cipher::{InnerIvInit, KeyInit};

/// Runs an already keyed cipher of concrete type `$ty` in the requested mode.
/// `$ctr` is the `ctr` flavor whose counter spans the whole block.
#[cfg(any(
    feature = "aes",
    feature = "blowfish",
    feature = "camellia",
    feature = "cast128",
    feature = "cast256",
    feature = "des",
    feature = "gost",
    feature = "idea",
    feature = "rc2",
    feature = "serpent",
    feature = "twofish"
))]
macro_rules! run_modes {
    ($cipher:expr, $ty:ty, $ctr:ident, $direction:expr, $params:expr, $input:expr) => {{
        let cipher: $ty = $cipher;
        let params: &BlockParams<'_> = $params;
        match params.mode {
            BlockMode::Ecb => modes::ecb(cipher, $direction, params.padding, $input),
            BlockMode::Cbc => modes::cbc(cipher, params.iv, $direction, params.padding, $input),
            BlockMode::Cfb => modes::cfb(cipher, params.iv, $direction, $input),
            BlockMode::Ofb => modes::keystream(
                ofb::Ofb::<$ty>::from_core(ofb::OfbCore::<$ty>::inner_iv_slice_init(
                    cipher, params.iv,
                )?),
                $input,
            ),
            BlockMode::Ctr => modes::keystream(
                ctr::$ctr::<$ty>::from_core(
                    ctr::CtrCore::<$ty, ctr::flavors::$ctr>::inner_iv_slice_init(cipher, params.iv)?,
                ),
                $input,
            ),
        }
    }};
}

/// Declares a wrapper for an algorithm with a single concrete cipher type
/// keyed through `KeyInit`.
#[cfg(any(
    feature = "blowfish",
    feature = "cast128",
    feature = "cast256",
    feature = "des",
    feature = "gost",
    feature = "idea",
    feature = "serpent",
    feature = "twofish"
))]
macro_rules! impl_block_primitive {
    ($wrapper:ident, $ty:ty, $ctr:ident) => {
        impl_block_primitive!($wrapper, $ty, $ctr, |key| key.to_vec());
    };
    ($wrapper:ident, $ty:ty, $ctr:ident, |$key:ident| $prepare:expr) => {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $wrapper;

        impl BlockPrimitive for $wrapper {
            fn transform(
                &self,
                direction: Direction,
                params: &BlockParams<'_>,
                input: &[u8],
            ) -> Result<Vec<u8>, PrimitiveError> {
                let prepared = {
                    let $key: &[u8] = params.key;
                    zeroize::Zeroizing::new($prepare)
                };
                let cipher = <$ty as KeyInit>::new_from_slice(&prepared)?;
                run_modes!(cipher, $ty, $ctr, direction, params, input)
            }
        }
    };
}

/// Declares the registry slot for an algorithm: the wrapper when its feature
/// is compiled in, `None` otherwise.
macro_rules! primitive_slot {
    ($feature:literal, $slot:ident, $wrapper:ident) => {
        #[cfg(feature = $feature)]
        pub(crate) const $slot: Option<Primitive> = Some(Primitive::Block(&$wrapper));
        #[cfg(not(feature = $feature))]
        pub(crate) const $slot: Option<Primitive> = None;
    };
}

#[cfg(any(feature = "aes", feature = "camellia", feature = "rc2"))]
fn unsupported_key(algorithm: &str, len: usize) -> PrimitiveError {
    PrimitiveError::new(format!("{algorithm} does not accept a {len}-byte key"))
}

// --- AES ---
#[cfg(feature = "aes")]
#[derive(Clone, Copy, Debug, Default)]
pub struct AesPrimitive;

#[cfg(feature = "aes")]
impl BlockPrimitive for AesPrimitive {
    fn transform(
        &self,
        direction: Direction,
        params: &BlockParams<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        use aes::{Aes128, Aes192, Aes256};
        let key = params.key;
        match key.len() {
            16 => run_modes!(Aes128::new_from_slice(key)?, Aes128, Ctr128BE, direction, params, input),
            24 => run_modes!(Aes192::new_from_slice(key)?, Aes192, Ctr128BE, direction, params, input),
            32 => run_modes!(Aes256::new_from_slice(key)?, Aes256, Ctr128BE, direction, params, input),
            n => Err(unsupported_key("AES", n)),
        }
    }
}

// --- Camellia ---
#[cfg(feature = "camellia")]
#[derive(Clone, Copy, Debug, Default)]
pub struct CamelliaPrimitive;

#[cfg(feature = "camellia")]
impl BlockPrimitive for CamelliaPrimitive {
    fn transform(
        &self,
        direction: Direction,
        params: &BlockParams<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        use camellia::{Camellia128, Camellia192, Camellia256};
        let key = params.key;
        match key.len() {
            16 => run_modes!(Camellia128::new_from_slice(key)?, Camellia128, Ctr128BE, direction, params, input),
            24 => run_modes!(Camellia192::new_from_slice(key)?, Camellia192, Ctr128BE, direction, params, input),
            32 => run_modes!(Camellia256::new_from_slice(key)?, Camellia256, Ctr128BE, direction, params, input),
            n => Err(unsupported_key("Camellia", n)),
        }
    }
}

// --- RC2 ---
#[cfg(feature = "rc2")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Rc2Primitive;

#[cfg(feature = "rc2")]
impl BlockPrimitive for Rc2Primitive {
    fn transform(
        &self,
        direction: Direction,
        params: &BlockParams<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        let key = params.key;
        if key.is_empty() || key.len() > 128 {
            return Err(unsupported_key("RC2", key.len()));
        }
        let bits = params
            .effective_key_length
            .unwrap_or(key.len() * 8)
            .clamp(1, 1024);
        let cipher = rc2::Rc2::new_with_eff_key_len(key, bits);
        run_modes!(cipher, rc2::Rc2, Ctr64BE, direction, params, input)
    }
}

/// CAST-256 treats short keys as if they were zero-padded to 32 bytes.
#[cfg(feature = "cast256")]
fn cast256_key(key: &[u8]) -> Vec<u8> {
    let mut padded = vec![0u8; 32];
    let n = key.len().min(32);
    padded[..n].copy_from_slice(&key[..n]);
    padded
}

#[cfg(feature = "blowfish")]
impl_block_primitive!(BlowfishPrimitive, blowfish::Blowfish, Ctr64BE);
#[cfg(feature = "cast128")]
impl_block_primitive!(Cast128Primitive, cast5::Cast5, Ctr64BE);
#[cfg(feature = "cast256")]
impl_block_primitive!(Cast256Primitive, cast6::Cast6, Ctr128BE, |key| cast256_key(key));
#[cfg(feature = "des")]
impl_block_primitive!(DesPrimitive, des::Des, Ctr64BE);
#[cfg(feature = "des")]
impl_block_primitive!(DesEde2Primitive, des::TdesEde2, Ctr64BE);
#[cfg(feature = "des")]
impl_block_primitive!(DesEde3Primitive, des::TdesEde3, Ctr64BE);
#[cfg(feature = "gost")]
impl_block_primitive!(GostPrimitive, magma::Magma, Ctr64BE);
#[cfg(feature = "idea")]
impl_block_primitive!(IdeaPrimitive, idea::Idea, Ctr64BE);
#[cfg(feature = "serpent")]
impl_block_primitive!(SerpentPrimitive, serpent::Serpent, Ctr128BE);
#[cfg(feature = "twofish")]
impl_block_primitive!(TwofishPrimitive, twofish::Twofish, Ctr128BE);

primitive_slot!("aes", AES, AesPrimitive);
primitive_slot!("blowfish", BLOWFISH, BlowfishPrimitive);
primitive_slot!("camellia", CAMELLIA, CamelliaPrimitive);
primitive_slot!("cast128", CAST128, Cast128Primitive);
primitive_slot!("cast256", CAST256, Cast256Primitive);
primitive_slot!("des", DES, DesPrimitive);
primitive_slot!("des", DES_EDE2, DesEde2Primitive);
primitive_slot!("des", DES_EDE3, DesEde3Primitive);
primitive_slot!("gost", GOST, GostPrimitive);
primitive_slot!("idea", IDEA, IdeaPrimitive);
primitive_slot!("rc2", RC2, Rc2Primitive);
primitive_slot!("serpent", SERPENT, SerpentPrimitive);
primitive_slot!("twofish", TWOFISH, TwofishPrimitive);

//! `seal-cipher` gives a large family of symmetric block and stream ciphers
//! one configuration-and-execution model. Callers pick an algorithm by name,
//! set a key, an IV, a mode, a padding and the data, and encrypt or decrypt,
//! whatever the underlying algorithm is. Cross-field rules (key length
//! normalization, mode/padding compatibility, block-only settings, RNG
//! availability) are checked before any state changes.
//!
//! `seal-cipher` 为众多对称分组密码和流密码提供统一的配置与执行模型。
//!
//! ```no_run
//! use seal_cipher::prelude::*;
//!
//! # fn main() -> seal_cipher::Result<()> {
//! let mut cipher = CipherFactory::new().create("aes")?;
//! cipher.set_key(b"0123456789abcdef");
//! cipher.set_rand_iv(cipher.block_size())?;
//! cipher.set_plaintext(b"attack at dawn");
//! let ciphertext = cipher.encrypt()?.to_vec();
//! cipher.set_ciphertext(&ciphertext);
//! assert_eq!(cipher.decrypt()?, b"attack at dawn");
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod cipher;
pub mod common;
pub mod error;
pub mod factory;
pub mod keys;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::algorithms::{Algorithm, CipherFamily, Registry};
    pub use crate::cipher::{Applied, CipherInstance};
    pub use crate::common::{BlockMode, CipherOptions, OptionValue, OptionsBuilder, Padding, RandomSource};
    pub use crate::error::{Error, Result};
    pub use crate::factory::CipherFactory;
    pub use crate::keys::{KeyLengthPolicy, SymmetricKey};
}

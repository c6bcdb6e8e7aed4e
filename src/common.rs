//! Catalogs shared by every cipher instance: modes, paddings, RNG sources and
//! the option set.
//!
//! 所有密码实例共享的目录：工作模式、填充、随机数源以及选项集合。

pub mod config;
pub mod mode;
pub mod padding;
pub mod rng;

pub use config::{CipherOptions, OptionValue, OptionsBuilder};
pub use mode::BlockMode;
pub use padding::Padding;
pub use rng::RandomSource;

//! Resolves algorithm names into cipher instances.
//!
//! 将算法名称解析为密码实例。

use crate::algorithms::definitions::Algorithm;
use crate::algorithms::registry::Registry;
use crate::cipher::CipherInstance;
use crate::common::config::CipherOptions;
use crate::error::Result;

/// Creates cipher instances by symbolic name.
///
/// 按符号名称创建密码实例。
#[derive(Clone, Copy, Debug, Default)]
pub struct CipherFactory;

impl CipherFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates an instance of the named algorithm with its default settings.
    ///
    /// Fails with `UnknownAlgorithm` if the name is not registered and with
    /// `DisabledAlgorithm` if its primitive was compiled out.
    pub fn create(&self, name: &str) -> Result<CipherInstance> {
        let descriptor = Registry::global().lookup(name)?;
        CipherInstance::new(descriptor.algorithm)
    }

    pub fn create_algorithm(&self, algorithm: Algorithm) -> Result<CipherInstance> {
        CipherInstance::new(algorithm)
    }

    /// Creates an instance and applies `options` to it.
    pub fn create_with_options(&self, name: &str, options: &CipherOptions) -> Result<CipherInstance> {
        let mut cipher = self.create(name)?;
        cipher.apply_options(options)?;
        Ok(cipher)
    }

    /// Names of the algorithms that can be created, in registration order.
    pub fn available(&self) -> Vec<&'static str> {
        Registry::global().list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_unknown_and_disabled_names() {
        let factory = CipherFactory::new();
        assert!(matches!(
            factory.create("enigma"),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            factory.create("mars"),
            Err(Error::DisabledAlgorithm(_))
        ));
        assert!(matches!(
            factory.create("seal"),
            Err(Error::DisabledAlgorithm(_))
        ));
    }

    #[test]
    fn test_every_available_algorithm_can_be_created() {
        let factory = CipherFactory::new();
        for name in factory.available() {
            let cipher = factory.create(name).unwrap();
            assert_eq!(cipher.cipher_type(), name);
            assert_eq!(cipher.key_length(), cipher.default_key_length());
        }
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_aliases_resolve_to_the_canonical_algorithm() {
        let cipher = CipherFactory::new().create("Rijndael").unwrap();
        assert_eq!(cipher.algorithm(), Algorithm::Aes);
        assert_eq!(cipher.algorithm_name(), "AES");
    }
}

//! Applies a [`CipherOptions`] set to an instance.
//!
//! 将 `CipherOptions` 选项集合应用到密码实例上。

use super::CipherInstance;
use crate::common::config::CipherOptions;
use crate::error::{Error, Result};
use tracing::debug;

fn conflict(first: &str, second: &str) -> Error {
    Error::ConflictingOption {
        first: first.to_string(),
        second: second.to_string(),
    }
}

/// Fails on the first pair of mutually exclusive options that are both set.
fn check_exclusive(options: &CipherOptions) -> Result<()> {
    let pairs = [
        ("plaintext", options.plaintext.is_some(), "plaintext_hex", options.plaintext_hex.is_some()),
        ("ciphertext", options.ciphertext.is_some(), "ciphertext_hex", options.ciphertext_hex.is_some()),
        ("key", options.key.is_some(), "key_hex", options.key_hex.is_some()),
    ];
    for (first, has_first, second, has_second) in pairs {
        if has_first && has_second {
            return Err(conflict(first, second));
        }
    }

    let iv_group = [
        ("rand_iv", options.rand_iv.is_some()),
        ("iv", options.iv.is_some()),
        ("iv_hex", options.iv_hex.is_some()),
    ];
    let mut present = iv_group.iter().filter(|(_, set)| *set).map(|(name, _)| *name);
    if let (Some(first), Some(second)) = (present.next(), present.next()) {
        return Err(conflict(first, second));
    }
    Ok(())
}

impl CipherInstance {
    /// Applies every option that is set, in dependency order: buffers, key
    /// length, key, effective key length, rounds, RNG, IV, mode and finally
    /// padding (a mode change resets the padding).
    ///
    /// The first failing option aborts the call and the instance is left
    /// exactly as it was before.
    ///
    /// 按依赖顺序应用所有已设置的选项。任一选项失败都会中止调用，实例保持调用前的状态。
    pub fn apply_options(&mut self, options: &CipherOptions) -> Result<()> {
        check_exclusive(options)?;

        let mut staged = self.clone();
        staged.apply_in_order(options)?;
        *self = staged;

        debug!("applied options to {} cipher instance", self.descriptor.name);
        Ok(())
    }

    fn apply_in_order(&mut self, options: &CipherOptions) -> Result<()> {
        if let Some(plaintext) = &options.plaintext {
            self.set_plaintext(plaintext);
        } else if let Some(plaintext) = &options.plaintext_hex {
            self.set_plaintext_hex(plaintext)?;
        }

        if let Some(ciphertext) = &options.ciphertext {
            self.set_ciphertext(ciphertext);
        } else if let Some(ciphertext) = &options.ciphertext_hex {
            self.set_ciphertext_hex(ciphertext)?;
        }

        if let Some(length) = options.key_length {
            self.set_key_length(length)?;
        }

        if let Some(key) = &options.key {
            self.set_key(key);
        } else if let Some(key) = &options.key_hex {
            self.set_key_hex(key)?;
        }

        if let Some(bits) = options.effective_key_length {
            self.set_effective_key_length(bits)?;
        }

        if let Some(rounds) = options.rounds {
            self.set_rounds(rounds)?;
        }

        if let Some(rng) = options.rng {
            self.set_rng(rng)?;
        }

        if let Some(length) = options.rand_iv {
            self.set_rand_iv(length)?;
        } else if let Some(iv) = &options.iv {
            self.set_iv(iv);
        } else if let Some(iv) = &options.iv_hex {
            self.set_iv_hex(iv)?;
        }

        if let Some(mode) = options.block_mode {
            self.set_block_mode(mode)?;
        }

        if let Some(padding) = options.padding {
            self.set_padding(padding)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::definitions::Algorithm;
    use crate::cipher::CipherInstance;
    use crate::common::config::{CipherOptions, OptionValue};
    use crate::common::mode::BlockMode;
    use crate::common::padding::Padding;
    use crate::error::Error;

    #[cfg(feature = "aes")]
    #[test]
    fn test_padding_survives_a_mode_change_in_the_same_call() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        let options = CipherOptions::builder()
            .set_padding(Padding::Zeros)
            .set_block_mode(BlockMode::Ecb)
            .build();
        cipher.apply_options(&options).unwrap();
        assert_eq!(cipher.block_mode(), Some(BlockMode::Ecb));
        assert_eq!(cipher.padding(), Some(Padding::Zeros));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_key_is_normalized_to_the_requested_length() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        let options = CipherOptions::builder()
            .set_key(vec![7u8; 10])
            .set_key_length(24)
            .build();
        cipher.apply_options(&options).unwrap();
        assert_eq!(cipher.key_length(), 24);
        assert_eq!(cipher.key().unwrap().len(), 24);
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_conflicts_are_reported_before_anything_changes() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        let options = CipherOptions::builder()
            .set_plaintext(b"abc".to_vec())
            .set_rand_iv(16)
            .set_iv_hex("00")
            .build();
        let err = cipher.apply_options(&options).unwrap_err();
        assert!(matches!(
            err,
            Error::ConflictingOption { ref first, ref second } if first == "rand_iv" && second == "iv_hex"
        ));
        assert!(cipher.plaintext().is_empty());

        let options = CipherOptions::builder()
            .set_key(vec![1u8; 16])
            .set_key_hex("01")
            .build();
        assert!(matches!(
            cipher.apply_options(&options),
            Err(Error::ConflictingOption { .. })
        ));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_failure_leaves_the_instance_untouched() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        let options = CipherOptions::from_pairs([
            ("plaintext", OptionValue::from("data")),
            ("key_length", OptionValue::from(16usize)),
            ("key_hex", OptionValue::from("00112233445566778899aabbccddeeff")),
            ("block_mode", OptionValue::from("counter")),
            ("padding", OptionValue::from("pkcs")),
        ])
        .unwrap();

        assert!(matches!(
            cipher.apply_options(&options),
            Err(Error::IncompatiblePadding { .. })
        ));
        assert!(cipher.plaintext().is_empty());
        assert!(cipher.key().is_none());
        assert_eq!(cipher.block_mode(), Some(BlockMode::Cbc));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_effective_key_length_is_rejected_for_aes() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        let options = CipherOptions::builder().set_effective_key_length(64).build();
        assert!(matches!(
            cipher.apply_options(&options),
            Err(Error::UnsupportedOption { .. })
        ));
    }

    #[cfg(feature = "arc4")]
    #[test]
    fn test_block_options_on_a_stream_cipher() {
        let mut cipher = CipherInstance::new(Algorithm::Arc4).unwrap();
        let options = CipherOptions::builder().set_block_mode(BlockMode::Ecb).build();
        assert!(matches!(
            cipher.apply_options(&options),
            Err(Error::InvalidOperationForCipherType { .. })
        ));
        let options = CipherOptions::builder().set_rounds(16).build();
        assert!(matches!(
            cipher.apply_options(&options),
            Err(Error::InvalidOperationForCipherType { .. })
        ));
    }
}

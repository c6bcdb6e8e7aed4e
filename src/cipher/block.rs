//! Settings that only exist for block ciphers: mode, padding, rounds and the
//! RC2 effective key length.
//!
//! 仅分组密码具有的设置：工作模式、填充、轮数以及 RC2 的有效密钥长度。

use super::{effective_limit, CipherInstance};
use crate::common::mode::BlockMode;
use crate::common::padding::Padding;
use crate::error::{Error, Result};
use tracing::debug;

impl CipherInstance {
    /// `None` for stream ciphers.
    pub fn block_mode(&self) -> Option<BlockMode> {
        self.block_settings().map(|s| s.mode)
    }

    pub fn block_mode_name(&self) -> Option<&'static str> {
        self.block_mode().map(BlockMode::display_name)
    }

    /// Installs `mode` and resets the padding to the mode's default.
    ///
    /// 设置工作模式，并将填充重置为该模式的默认值。
    pub fn set_block_mode<M>(&mut self, mode: M) -> Result<()>
    where
        M: TryInto<BlockMode>,
        Error: From<M::Error>,
    {
        let name = self.descriptor.name;
        let settings = self.block_settings_mut("block mode")?;
        let mode = mode.try_into()?;
        settings.mode = mode;
        settings.padding = mode.default_padding();
        debug!(
            "{} mode set to {}, padding reset to {}",
            name,
            mode.symbol(),
            settings.padding.symbol()
        );
        Ok(())
    }

    /// `None` for stream ciphers.
    pub fn padding(&self) -> Option<Padding> {
        self.block_settings().map(|s| s.padding)
    }

    pub fn padding_name(&self) -> Option<&'static str> {
        self.padding().map(Padding::display_name)
    }

    /// Installs `padding` if the current mode accepts it.
    pub fn set_padding<P>(&mut self, padding: P) -> Result<()>
    where
        P: TryInto<Padding>,
        Error: From<P::Error>,
    {
        let name = self.descriptor.name;
        let settings = self.block_settings_mut("padding")?;
        let padding = padding.try_into()?;
        if !settings.mode.accepts(padding) {
            return Err(Error::IncompatiblePadding {
                padding: padding.symbol(),
                mode: settings.mode.symbol(),
            });
        }
        settings.padding = padding;
        debug!("{} padding set to {}", name, padding.symbol());
        Ok(())
    }

    /// `None` for stream ciphers.
    pub fn rounds(&self) -> Option<u32> {
        let policy = self.descriptor.rounds?;
        let settings = self.block_settings()?;
        Some(
            settings
                .rounds
                .unwrap_or_else(|| policy.default_rounds(self.key_length)),
        )
    }

    /// Sets the round count. Only algorithms with a variable round count
    /// accept anything other than the value already in use.
    pub fn set_rounds(&mut self, rounds: u32) -> Result<()> {
        let key_length = self.key_length;
        let policy = self.descriptor.rounds;
        let settings = self.block_settings_mut("rounds")?;
        let Some(policy) = policy else {
            return Err(Error::InvalidRounds {
                requested: rounds,
                used: 0,
            });
        };
        let used = policy.resolve(rounds, key_length);
        if used != rounds {
            return Err(Error::InvalidRounds {
                requested: rounds,
                used,
            });
        }
        if policy.is_variable() {
            settings.rounds = Some(used);
        }
        Ok(())
    }

    /// Effective key length in bits. `None` unless the algorithm is RC2.
    pub fn effective_key_length(&self) -> Option<usize> {
        if !self.descriptor.effective_key_length {
            return None;
        }
        let limit = effective_limit(self.key_length);
        let settings = self.block_settings()?;
        Some(settings.effective_key_length.unwrap_or(limit).min(limit))
    }

    /// Sets the RC2 effective key length in bits. The value must lie in
    /// `1..=min(1024, key length in bits)`.
    ///
    /// 设置 RC2 的有效密钥长度（比特）。
    pub fn set_effective_key_length(&mut self, bits: usize) -> Result<()> {
        if !self.descriptor.effective_key_length {
            return Err(Error::UnsupportedOption {
                option: "effective_key_length",
                algorithm: self.descriptor.name,
            });
        }
        let limit = effective_limit(self.key_length);
        let used = bits.clamp(1, limit);
        if used != bits {
            return Err(Error::InvalidEffectiveKeyLength {
                requested: bits,
                used,
            });
        }
        let settings = self.block_settings_mut("effective_key_length")?;
        settings.effective_key_length = Some(used);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::definitions::Algorithm;
    use crate::cipher::CipherInstance;
    use crate::common::mode::BlockMode;
    use crate::common::padding::Padding;
    use crate::error::Error;

    #[cfg(feature = "aes")]
    #[test]
    fn test_mode_change_resets_padding() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        assert_eq!(cipher.block_mode(), Some(BlockMode::Cbc));
        assert_eq!(cipher.padding(), Some(Padding::Pkcs));

        cipher.set_padding("zeroes").unwrap();
        cipher.set_block_mode("ecb").unwrap();
        assert_eq!(cipher.padding(), Some(Padding::Pkcs));

        cipher.set_block_mode(BlockMode::Ctr).unwrap();
        assert_eq!(cipher.padding(), Some(Padding::None));
        assert_eq!(cipher.block_mode_name(), Some("CTR"));
        assert_eq!(cipher.padding_name(), Some("NoPadding"));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_invalid_names_leave_settings_untouched() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        assert!(matches!(cipher.set_block_mode("xts"), Err(Error::InvalidMode(_))));
        assert!(matches!(cipher.set_padding("iso10126"), Err(Error::InvalidPadding(_))));
        assert_eq!(cipher.block_mode(), Some(BlockMode::Cbc));
        assert_eq!(cipher.padding(), Some(Padding::Pkcs));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_counter_mode_rejects_zero_padding() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        cipher.set_block_mode("counter").unwrap();
        let err = cipher.set_padding(Padding::Zeros).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompatiblePadding {
                padding: "zeroes",
                mode: "counter"
            }
        ));
        assert_eq!(cipher.padding(), Some(Padding::None));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_rounds_follow_the_key_length() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        assert_eq!(cipher.rounds(), Some(10));
        assert!(matches!(
            cipher.set_rounds(12),
            Err(Error::InvalidRounds {
                requested: 12,
                used: 10
            })
        ));
        cipher.set_rounds(10).unwrap();
        cipher.set_key_length(32).unwrap();
        assert_eq!(cipher.rounds(), Some(14));
    }

    #[cfg(feature = "rc2")]
    #[test]
    fn test_rc2_effective_key_length() {
        let mut cipher = CipherInstance::new(Algorithm::Rc2).unwrap();
        assert_eq!(cipher.effective_key_length(), Some(128));

        assert!(matches!(
            cipher.set_effective_key_length(1025),
            Err(Error::InvalidEffectiveKeyLength { requested: 1025, .. })
        ));
        assert_eq!(cipher.effective_key_length(), Some(128));

        cipher.set_effective_key_length(64).unwrap();
        assert_eq!(cipher.effective_key_length(), Some(64));

        cipher.set_key_length(4).unwrap();
        assert_eq!(cipher.effective_key_length(), Some(32));

        cipher.set_key_length(16).unwrap();
        assert_eq!(cipher.effective_key_length(), Some(64));

        cipher.set_key_length(128).unwrap();
        cipher.set_effective_key_length(1024).unwrap();
        assert!(cipher.set_effective_key_length(0).is_err());
    }

    #[cfg(feature = "aes")]
    #[test]
    fn test_effective_key_length_is_rc2_only() {
        let mut cipher = CipherInstance::new(Algorithm::Aes).unwrap();
        assert_eq!(cipher.effective_key_length(), None);
        assert!(matches!(
            cipher.set_effective_key_length(64),
            Err(Error::UnsupportedOption { .. })
        ));
    }

    #[cfg(feature = "arc4")]
    #[test]
    fn test_stream_ciphers_have_no_block_settings() {
        let mut cipher = CipherInstance::new(Algorithm::Arc4).unwrap();
        assert_eq!(cipher.block_mode(), None);
        assert_eq!(cipher.padding(), None);
        assert_eq!(cipher.rounds(), None);
        for result in [
            cipher.set_block_mode(BlockMode::Ecb),
            cipher.set_padding(Padding::None),
            cipher.set_rounds(16),
        ] {
            assert!(matches!(
                result,
                Err(Error::InvalidOperationForCipherType { .. })
            ));
        }
        assert!(matches!(
            cipher.set_effective_key_length(40),
            Err(Error::UnsupportedOption { .. })
        ));
    }
}

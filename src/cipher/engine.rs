//! Runs the configured primitive over the stored plaintext or ciphertext.
//!
//! 使用当前配置的原语处理已存储的明文或密文。

use super::{CipherInstance, FamilyState};
use crate::algorithms::traits::{BlockParams, Direction, Primitive};
use crate::error::{Error, Result};
use tracing::{debug, warn};

impl CipherInstance {
    /// Encrypts the stored plaintext and replaces the stored ciphertext.
    ///
    /// On failure the stored ciphertext is left as it was.
    ///
    /// 加密已存储的明文并覆盖已存储的密文。失败时密文保持不变。
    pub fn encrypt(&mut self) -> Result<&[u8]> {
        let ciphertext = self.transform(Direction::Encrypt, &self.plaintext)?;
        self.ciphertext = ciphertext;
        Ok(&self.ciphertext)
    }

    /// Decrypts the stored ciphertext and replaces the stored plaintext.
    ///
    /// On failure the stored plaintext is left as it was.
    pub fn decrypt(&mut self) -> Result<&[u8]> {
        let plaintext = self.transform(Direction::Decrypt, &self.ciphertext)?;
        self.plaintext = plaintext;
        Ok(&self.plaintext)
    }

    /// Like [`encrypt`](Self::encrypt), returning the ciphertext as hex.
    pub fn encrypt_hex(&mut self) -> Result<String> {
        self.encrypt().map(hex::encode)
    }

    /// Like [`decrypt`](Self::decrypt), returning the plaintext as hex.
    pub fn decrypt_hex(&mut self) -> Result<String> {
        self.decrypt().map(hex::encode)
    }

    fn transform(&self, direction: Direction, input: &[u8]) -> Result<Vec<u8>> {
        let key = self.key.as_ref().ok_or(Error::MissingKey)?;
        let primitive = self
            .descriptor
            .primitive
            .ok_or_else(|| Error::DisabledAlgorithm(self.descriptor.name.to_string()))?;

        let result = match (primitive, &self.state) {
            (Primitive::Block(block), FamilyState::Block(settings)) => {
                if settings.mode.requires_iv() && self.iv.len() != self.block_size() {
                    return Err(Error::InvalidIvLength {
                        expected: self.block_size(),
                        actual: self.iv.len(),
                    });
                }
                let params = BlockParams {
                    key: key.as_bytes(),
                    iv: &self.iv,
                    mode: settings.mode,
                    padding: settings.padding,
                    rounds: self.rounds().unwrap_or_default(),
                    effective_key_length: self.effective_key_length(),
                };
                block.transform(direction, &params, input)
            }
            (Primitive::Stream(stream), FamilyState::Stream) => {
                stream.apply_keystream(key.as_bytes(), input)
            }
            _ => {
                return Err(Error::InvalidOperationForCipherType {
                    operation: "transform",
                    algorithm: self.descriptor.name,
                })
            }
        };

        match result {
            Ok(output) => {
                debug!(
                    "{} {:?}: {} bytes in, {} bytes out",
                    self.descriptor.name,
                    direction,
                    input.len(),
                    output.len()
                );
                Ok(output)
            }
            Err(e) => {
                warn!("{} {:?} failed: {}", self.descriptor.name, direction, e);
                Err(Error::CryptoFailure(e))
            }
        }
    }
}

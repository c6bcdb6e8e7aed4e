//! Generic drivers that run a keyed block cipher through a mode of operation
//! and a padding scheme.
//!
//! 驱动已初始化的分组密码按指定工作模式和填充方案运行的通用函数。

use super::traits::{Direction, PrimitiveError};
use crate::common::padding::Padding;
use cipher::block_padding::{AnsiX923, Iso7816, NoPadding, Pkcs7, ZeroPadding};
use cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, InnerIvInit, StreamCipher};

fn check_aligned(len: usize, block_size: usize) -> Result<(), PrimitiveError> {
    if len % block_size != 0 {
        return Err(PrimitiveError::new(format!(
            "data length {len} is not a multiple of the {block_size}-byte block size"
        )));
    }
    Ok(())
}

/// Pads `input` and encrypts it block by block.
pub(crate) fn encrypt_padded<E>(
    encryptor: E,
    padding: Padding,
    input: &[u8],
) -> Result<Vec<u8>, PrimitiveError>
where
    E: BlockEncryptMut,
{
    let out = match padding {
        Padding::None => {
            check_aligned(input.len(), <E as cipher::BlockSizeUser>::block_size())?;
            encryptor.encrypt_padded_vec_mut::<NoPadding>(input)
        }
        Padding::Zeros => encryptor.encrypt_padded_vec_mut::<ZeroPadding>(input),
        Padding::Pkcs => encryptor.encrypt_padded_vec_mut::<Pkcs7>(input),
        Padding::OneAndZeros => encryptor.encrypt_padded_vec_mut::<Iso7816>(input),
        Padding::AnsiX923 => encryptor.encrypt_padded_vec_mut::<AnsiX923>(input),
    };
    Ok(out)
}

/// Decrypts `input` block by block and strips the padding.
pub(crate) fn decrypt_padded<D>(
    decryptor: D,
    padding: Padding,
    input: &[u8],
) -> Result<Vec<u8>, PrimitiveError>
where
    D: BlockDecryptMut,
{
    check_aligned(input.len(), <D as cipher::BlockSizeUser>::block_size())?;
    if input.is_empty() {
        // zero padding maps an empty plaintext to an empty ciphertext
        if matches!(padding, Padding::None | Padding::Zeros) {
            return Ok(Vec::new());
        }
        return Err(PrimitiveError::new("ciphertext is empty"));
    }
    let out = match padding {
        Padding::None => decryptor.decrypt_padded_vec_mut::<NoPadding>(input)?,
        Padding::Zeros => decryptor.decrypt_padded_vec_mut::<ZeroPadding>(input)?,
        Padding::Pkcs => decryptor.decrypt_padded_vec_mut::<Pkcs7>(input)?,
        Padding::OneAndZeros => decryptor.decrypt_padded_vec_mut::<Iso7816>(input)?,
        Padding::AnsiX923 => decryptor.decrypt_padded_vec_mut::<AnsiX923>(input)?,
    };
    Ok(out)
}

pub(crate) fn ecb<C>(
    cipher: C,
    direction: Direction,
    padding: Padding,
    input: &[u8],
) -> Result<Vec<u8>, PrimitiveError>
where
    C: BlockEncryptMut + BlockDecryptMut,
{
    match direction {
        Direction::Encrypt => encrypt_padded(cipher, padding, input),
        Direction::Decrypt => decrypt_padded(cipher, padding, input),
    }
}

pub(crate) fn cbc<C>(
    cipher: C,
    iv: &[u8],
    direction: Direction,
    padding: Padding,
    input: &[u8],
) -> Result<Vec<u8>, PrimitiveError>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut,
{
    match direction {
        Direction::Encrypt => {
            let encryptor = cbc::Encryptor::<C>::inner_iv_slice_init(cipher, iv)?;
            encrypt_padded(encryptor, padding, input)
        }
        Direction::Decrypt => {
            let decryptor = cbc::Decryptor::<C>::inner_iv_slice_init(cipher, iv)?;
            decrypt_padded(decryptor, padding, input)
        }
    }
}

/// Full-block CFB over input of any length.
pub(crate) fn cfb<C>(
    cipher: C,
    iv: &[u8],
    direction: Direction,
    input: &[u8],
) -> Result<Vec<u8>, PrimitiveError>
where
    C: BlockCipher + BlockEncryptMut,
{
    let mut buf = input.to_vec();
    match direction {
        Direction::Encrypt => {
            cfb_mode::BufEncryptor::<C>::inner_iv_slice_init(cipher, iv)?.encrypt(&mut buf)
        }
        Direction::Decrypt => {
            cfb_mode::BufDecryptor::<C>::inner_iv_slice_init(cipher, iv)?.decrypt(&mut buf)
        }
    }
    Ok(buf)
}

/// XORs `input` with the keystream of `stream`. Used for OFB, CTR and the
/// native stream ciphers, where both directions are the same operation.
pub(crate) fn keystream<S>(mut stream: S, input: &[u8]) -> Result<Vec<u8>, PrimitiveError>
where
    S: StreamCipher,
{
    let mut buf = input.to_vec();
    stream.try_apply_keystream(&mut buf)?;
    Ok(buf)
}

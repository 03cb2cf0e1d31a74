use aes_gcm::aead::consts::{U12, U16};
use aes_gcm::aead::generic_array::ArrayLength;
use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::core::types::SecretKey;
use crate::provider::error::Error;

const KEY_OFFSET: usize = 0;
const KEY_BYTE_SIZE: usize = 32;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Base64url, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Standard Base64, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// AES-256-GCM decryption of payloads sealed by the registration service.
///
/// The tag is 128 bits and appended to the ciphertext, the IV is the decoded
/// salt (96 or 128 bits) and there is no associated data. Of the decoded
/// secret only bytes `KEY_OFFSET..KEY_OFFSET + KEY_BYTE_SIZE` are used;
/// longer secrets are truncated, shorter ones fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecryptionService;

impl DecryptionService {
    pub fn new() -> Self {
        Self
    }

    pub fn decrypt(
        &self,
        cipher_text: &str,
        salt: &str,
        secret: &SecretKey,
    ) -> Result<String, Error> {
        if cipher_text.trim().is_empty() {
            return Err(Error::InvalidArgument("cipher_text"));
        }
        if salt.trim().is_empty() {
            return Err(Error::InvalidArgument("salt"));
        }

        let failed = || Error::DecryptionFailed {
            cipher_text: cipher_text.to_string(),
        };

        let iv = URL_SAFE_LENIENT.decode(salt).map_err(|_| failed())?;
        let sealed = URL_SAFE_LENIENT.decode(cipher_text).map_err(|_| failed())?;
        let key = decode_secret_key(secret).ok_or_else(failed)?;

        let plain = match iv.len() {
            12 => open::<U12>(&key, &iv, &sealed),
            16 => open::<U16>(&key, &iv, &sealed),
            _ => None,
        }
        .ok_or_else(failed)?;

        String::from_utf8(plain).map_err(|_| failed())
    }
}

fn open<N>(key: &[u8], iv: &[u8], sealed: &[u8]) -> Option<Vec<u8>>
where
    N: ArrayLength<u8>,
    AesGcm<Aes256, N>: KeyInit + Aead,
{
    let cipher = AesGcm::<Aes256, N>::new_from_slice(key).ok()?;
    cipher
        .decrypt(Nonce::<AesGcm<Aes256, N>>::from_slice(iv), sealed)
        .ok()
}

fn decode_secret_key(secret: &SecretKey) -> Option<Vec<u8>> {
    let raw = STANDARD_LENIENT.decode(secret.as_str()).ok()?;
    raw.get(KEY_OFFSET..KEY_OFFSET + KEY_BYTE_SIZE)
        .map(<[u8]>::to_vec)
}

/// Checks that `secret` can key the cipher. Used when loading configuration.
pub fn validate_secret_key(secret: &SecretKey) -> bool {
    decode_secret_key(secret).is_some()
}

//! Symmetric encryption for stored host secrets
//!
//! AES-256-GCM keyed by the SHA-256 of the database secret. Ciphertexts are
//! stored as base64 of `nonce || ciphertext`.

use crate::error::{Result, StoreError};
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

pub struct SecretCipher {
    cipher: Aes256Gcm,
}

impl SecretCipher {
    pub fn new(secret: &str) -> Result<Self> {
        let key = Sha256::digest(secret.as_bytes());
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| StoreError::Cipher(e.to_string()))?;
        Ok(Self { cipher })
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| StoreError::Cipher(e.to_string()))?;

        let mut payload = nonce.to_vec();
        payload.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(payload))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let payload = STANDARD
            .decode(encoded)
            .map_err(|e| StoreError::Cipher(e.to_string()))?;
        if payload.len() < NONCE_LEN {
            return Err(StoreError::Cipher("ciphertext too short".to_string()));
        }

        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| StoreError::Cipher("wrong secret or corrupted value".to_string()))?;

        String::from_utf8(plaintext).map_err(|e| StoreError::Cipher(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let cipher = SecretCipher::new("correct horse").unwrap();
        let sealed = cipher.encrypt("s3cr3t pass").unwrap();

        assert_ne!(sealed, "s3cr3t pass");
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "s3cr3t pass");
    }

    #[test]
    fn test_nonce_differs_per_call() {
        let cipher = SecretCipher::new("k").unwrap();
        assert_ne!(cipher.encrypt("same").unwrap(), cipher.encrypt("same").unwrap());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let sealed = SecretCipher::new("right").unwrap().encrypt("value").unwrap();
        let result = SecretCipher::new("wrong").unwrap().decrypt(&sealed);
        assert!(matches!(result, Err(StoreError::Cipher(_))));
    }

    #[test]
    fn test_garbage_input_fails() {
        let cipher = SecretCipher::new("k").unwrap();
        assert!(cipher.decrypt("not base64!!").is_err());
        assert!(cipher.decrypt("AAAA").is_err());
    }
}

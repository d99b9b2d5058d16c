//! BIP39 mnemonic generation and Ed25519 key derivation.
//!
//! A 24-word mnemonic (256-bit entropy) is expanded to a BIP39 seed, then
//! HMAC-SHA512 keyed with the BIP44 path `m/44'/607'/0'/0/0` (607 = TON
//! coin type) derives the 32-byte Ed25519 secret key.

use bip39::Mnemonic;
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use thiserror::Error;
use tonkit_types::{KeyPair, PrivateKey, PublicKey};

type HmacSha512 = Hmac<Sha512>;

/// BIP44 derivation path, used as the HMAC key during child-key derivation.
const BIP44_PATH: &str = "m/44'/607'/0'/0/0";

/// Errors arising from mnemonic operations.
#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// Generate a new 24-word BIP39 mnemonic from 256-bit entropy.
pub fn generate_mnemonic() -> Result<String, MnemonicError> {
    let mut entropy = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut entropy);
    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Derive an Ed25519 keypair from a BIP39 mnemonic phrase.
pub fn keypair_from_mnemonic(phrase: &str) -> Result<KeyPair, MnemonicError> {
    let mnemonic = Mnemonic::parse_normalized(phrase)
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;

    // BIP39 seed (PBKDF2-HMAC-SHA512, empty passphrase), then one
    // HMAC-SHA512 round keyed with the derivation path. The first 32 bytes
    // of the output become the Ed25519 secret key.
    let seed = mnemonic.to_seed_normalized("");

    let mut mac = HmacSha512::new_from_slice(BIP44_PATH.as_bytes())
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    mac.update(&seed);
    let output = mac.finalize().into_bytes();

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&output[..32]);

    let signing_key = SigningKey::from_bytes(&secret);
    let verifying_key = signing_key.verifying_key();

    Ok(KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    })
}

/// Whether a phrase is a valid BIP39 mnemonic.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_normalized(phrase).is_ok()
}

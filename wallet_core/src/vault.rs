//! Encrypted mnemonic storage.
//!
//! Mnemonics are encrypted with the user's passcode:
//! 1. Argon2id derives a 32-byte key from passcode + per-entry random salt
//! 2. AES-256-GCM encrypts the phrase with a random nonce
//! 3. Entries are stored in one JSON file, keyed by the wallet's key id
//!
//! Decryption failure is indistinguishable from a wrong passcode, which is
//! exactly the error surfaced to the signing flow.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tonkit_types::Wallet;
use zeroize::Zeroizing;

use crate::error::SecretError;

/// Argon2id parameters: 64 MiB memory, 3 iterations, 1 lane.
const ARGON2_MEMORY_KIB: u32 = 65536;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

const SALT_LEN: usize = 32;
/// AES-GCM nonce length (96 bits).
const NONCE_LEN: usize = 12;

const VAULT_VERSION: u32 = 1;

/// Secret-storage collaborator consumed by the transfer signer.
pub trait SecretStore: Send + Sync {
    /// Load and decrypt the mnemonic for a wallet.
    ///
    /// Fails with `NotFound` when no secret is stored for the wallet and
    /// `BadPasscode` when the passcode does not decrypt the entry.
    fn load_mnemonic(
        &self,
        wallet: &Wallet,
        passcode: &str,
    ) -> Result<Zeroizing<String>, SecretError>;
}

/// One encrypted vault entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct VaultEntry {
    kdf_params: KdfParams,
    /// Hex-encoded salt.
    salt: String,
    /// Hex-encoded nonce.
    nonce: String,
    /// Hex-encoded ciphertext.
    ciphertext: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct KdfParams {
    memory: u32,
    iterations: u32,
    parallelism: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct VaultFile {
    version: u32,
    entries: HashMap<String, VaultEntry>,
}

impl VaultFile {
    fn empty() -> Self {
        Self {
            version: VAULT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// File-backed encrypted mnemonic vault.
pub struct MnemonicVault {
    path: PathBuf,
}

impl MnemonicVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Encrypt and store a wallet's mnemonic, replacing any previous entry.
    pub fn store_mnemonic(
        &self,
        wallet: &Wallet,
        phrase: &str,
        passcode: &str,
    ) -> Result<(), SecretError> {
        let key_id = wallet_key(wallet)?;
        let mut rng = rand::thread_rng();

        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut nonce_bytes);

        let derived = derive_key(passcode, &salt)?;
        let cipher = Aes256Gcm::new_from_slice(&derived)
            .map_err(|e| SecretError::Format(format!("AES key init failed: {e}")))?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), phrase.as_bytes())
            .map_err(|e| SecretError::Format(format!("encryption failed: {e}")))?;

        let mut file = self.read_file()?.unwrap_or_else(VaultFile::empty);
        file.entries.insert(
            key_id,
            VaultEntry {
                kdf_params: KdfParams {
                    memory: ARGON2_MEMORY_KIB,
                    iterations: ARGON2_ITERATIONS,
                    parallelism: ARGON2_PARALLELISM,
                },
                salt: hex::encode(salt),
                nonce: hex::encode(nonce_bytes),
                ciphertext: hex::encode(ciphertext),
            },
        );
        self.write_file(&file)
    }

    /// Remove a wallet's entry. Removing a missing entry is not an error.
    pub fn remove_mnemonic(&self, wallet: &Wallet) -> Result<(), SecretError> {
        let key_id = wallet_key(wallet)?;
        let Some(mut file) = self.read_file()? else {
            return Ok(());
        };
        file.entries.remove(&key_id);
        self.write_file(&file)
    }

    fn read_file(&self) -> Result<Option<VaultFile>, SecretError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| SecretError::Io(e.to_string()))?;
        let file: VaultFile =
            serde_json::from_str(&json).map_err(|e| SecretError::Format(e.to_string()))?;
        if file.version != VAULT_VERSION {
            return Err(SecretError::Format(format!(
                "unsupported vault version: {}",
                file.version
            )));
        }
        Ok(Some(file))
    }

    fn write_file(&self, file: &VaultFile) -> Result<(), SecretError> {
        let json = serde_json::to_string_pretty(file)
            .map_err(|e| SecretError::Format(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| SecretError::Io(e.to_string()))
    }
}

impl SecretStore for MnemonicVault {
    fn load_mnemonic(
        &self,
        wallet: &Wallet,
        passcode: &str,
    ) -> Result<Zeroizing<String>, SecretError> {
        let key_id = wallet_key(wallet)?;
        let file = self
            .read_file()?
            .ok_or_else(|| SecretError::NotFound(key_id.clone()))?;
        let entry = file
            .entries
            .get(&key_id)
            .ok_or_else(|| SecretError::NotFound(key_id.clone()))?;

        let salt = decode_hex(&entry.salt, "salt")?;
        let nonce_bytes = decode_hex(&entry.nonce, "nonce")?;
        let ciphertext = decode_hex(&entry.ciphertext, "ciphertext")?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(SecretError::Format("invalid nonce length".into()));
        }

        let derived = derive_key(passcode, &salt)?;
        let cipher = Aes256Gcm::new_from_slice(&derived)
            .map_err(|e| SecretError::Format(format!("AES key init failed: {e}")))?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|_| SecretError::BadPasscode)?;

        String::from_utf8(plaintext)
            .map(Zeroizing::new)
            .map_err(|_| SecretError::Format("decrypted entry is not valid UTF-8".into()))
    }
}

/// The vault key for a wallet; custody kinds without key material have
/// nothing to store.
fn wallet_key(wallet: &Wallet) -> Result<String, SecretError> {
    wallet
        .key_id()
        .ok_or_else(|| SecretError::NotFound("wallet has no key material".into()))
}

fn decode_hex(s: &str, field: &str) -> Result<Vec<u8>, SecretError> {
    hex::decode(s).map_err(|e| SecretError::Format(format!("invalid {field} hex: {e}")))
}

/// Derive a 32-byte key from a passcode and salt using Argon2id.
fn derive_key(passcode: &str, salt: &[u8]) -> Result<[u8; 32], SecretError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(ARGON2_OUTPUT_LEN),
    )
    .map_err(|e| SecretError::Format(format!("Argon2 params error: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = [0u8; 32];
    argon2
        .hash_password_into(passcode.as_bytes(), salt, &mut output)
        .map_err(|e| SecretError::Format(format!("Argon2 hashing failed: {e}")))?;
    Ok(output)
}

/// Plaintext in-memory store for tests and previews.
#[derive(Default)]
pub struct MemorySecretStore {
    entries: Mutex<HashMap<String, (String, String)>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(
        &self,
        wallet: &Wallet,
        phrase: &str,
        passcode: &str,
    ) -> Result<(), SecretError> {
        let key_id = wallet_key(wallet)?;
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key_id, (passcode.to_owned(), phrase.to_owned()));
        Ok(())
    }
}

impl SecretStore for MemorySecretStore {
    fn load_mnemonic(
        &self,
        wallet: &Wallet,
        passcode: &str,
    ) -> Result<Zeroizing<String>, SecretError> {
        let key_id = wallet_key(wallet)?;
        let entries = self.entries.lock().expect("store lock poisoned");
        let (expected, phrase) = entries
            .get(&key_id)
            .ok_or(SecretError::NotFound(key_id.clone()))?;
        if expected != passcode {
            return Err(SecretError::BadPasscode);
        }
        Ok(Zeroizing::new(phrase.clone()))
    }
}

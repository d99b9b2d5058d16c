//! Mnemonic handling and Ed25519 signing for the tonkit wallet core.
//!
//! Key derivation follows BIP39 + BIP44: a 24-word mnemonic yields a seed,
//! and HMAC-SHA512 keyed with the TON derivation path produces the Ed25519
//! secret key.

pub mod mnemonic;
pub mod sign;

pub use mnemonic::{generate_mnemonic, keypair_from_mnemonic, validate_mnemonic, MnemonicError};
pub use sign::{generate_keypair, keypair_from_seed, sign_message, verify_signature};

//! Ed25519 key generation, message signing, and verification.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use tonkit_types::{KeyPair, PrivateKey, PublicKey, Signature};

/// Generate a fresh random key pair.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Deterministically derive a key pair from a 32-byte seed.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Sign a message with a private key.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let kp = generate_keypair();
        let msg = b"unsigned transfer payload";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
        assert!(!verify_signature(b"different payload", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_rejected() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let sig = sign_message(b"payload", &kp1.private);
        assert!(!verify_signature(b"payload", &sig, &kp2.public));
    }

    #[test]
    fn seed_derivation_deterministic() {
        let kp1 = keypair_from_seed(&[9u8; 32]);
        let kp2 = keypair_from_seed(&[9u8; 32]);
        assert_eq!(kp1.public, kp2.public);
        let sig1 = sign_message(b"x", &kp1.private);
        let sig2 = sign_message(b"x", &kp2.private);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn malformed_public_key_fails_verification() {
        let kp = generate_keypair();
        let sig = sign_message(b"payload", &kp.private);
        assert!(!verify_signature(b"payload", &sig, &PublicKey([0xFF; 32])));
    }
}

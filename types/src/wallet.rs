//! Wallet identity: network plus key-custody kind.

use serde::{Deserialize, Serialize};

use crate::keys::PublicKey;

/// Which chain the wallet lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
}

/// Wallet contract revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revision {
    V3R1,
    V3R2,
    V4R2,
    V5R1,
}

impl Revision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Revision::V3R1 => "v3r1",
            Revision::V3R2 => "v3r2",
            Revision::V4R2 => "v4r2",
            Revision::V5R1 => "v5r1",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "v3r1" => Some(Revision::V3R1),
            "v3r2" => Some(Revision::V3R2),
            "v4r2" => Some(Revision::V4R2),
            "v5r1" => Some(Revision::V5R1),
            _ => None,
        }
    }
}

/// How the wallet's private key is held.
///
/// Closed enum: the transfer signer matches on it exhaustively, so a new
/// custody kind cannot be added without updating the signing paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletKind {
    /// Key derived from a locally stored mnemonic.
    Regular {
        public_key: PublicKey,
        revision: Revision,
    },
    /// Key held by an out-of-process signer (hardware device or companion app).
    External {
        public_key: PublicKey,
        revision: Revision,
    },
    /// Time-locked contract; cannot sign locally.
    Lockup,
    /// No key material at all.
    WatchOnly,
}

/// A wallet. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub network: Network,
    pub kind: WalletKind,
}

impl Wallet {
    pub fn new(network: Network, kind: WalletKind) -> Self {
        Self { network, kind }
    }

    /// The wallet's public key, for custody kinds that carry one.
    pub fn public_key(&self) -> Option<&PublicKey> {
        match &self.kind {
            WalletKind::Regular { public_key, .. } => Some(public_key),
            WalletKind::External { public_key, .. } => Some(public_key),
            WalletKind::Lockup | WalletKind::WatchOnly => None,
        }
    }

    /// Stable identifier for keying secret storage and caches.
    ///
    /// `None` for custody kinds without key material.
    pub fn key_id(&self) -> Option<String> {
        self.public_key().map(PublicKey::to_hex)
    }
}

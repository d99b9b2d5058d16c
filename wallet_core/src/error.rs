use thiserror::Error;

/// Terminal failure reasons for a signing request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    /// The wallet's custody kind cannot produce a signature locally
    /// (lockup and watch-only wallets). Not retryable.
    #[error("wallet kind cannot sign: {0}")]
    IncorrectWalletKind(&'static str),

    #[error("secret storage: {0}")]
    Secret(#[from] SecretError),

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

/// Errors from the secret-storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("no mnemonic stored for wallet {0}")]
    NotFound(String),

    #[error("wrong passcode or corrupted vault entry")]
    BadPasscode,

    #[error("vault i/o error: {0}")]
    Io(String),

    #[error("vault format error: {0}")]
    Format(String),
}

//! Transfer-signing state machine.
//!
//! One signing request moves through:
//!
//! `Idle → Dispatching → {AwaitingPasscode | AwaitingExternalSignature}
//!   → {Signed | Failed | Cancelled}`
//!
//! Terminal states are absorbing and fire exactly once. Exactly-once is
//! enforced mechanically: the pending-state values own a oneshot sender
//! and their terminal methods consume `self`, so a second outcome cannot
//! be produced. Dropping a pending state without resolving it counts as
//! cancellation (the flow was abandoned).
//!
//! Cryptographic failures are not retried here; they surface as `Failed`
//! and the caller decides whether to re-prompt. Cancellation is always an
//! explicit user action; the request's validity window (`valid_until`)
//! bounds the unsigned message on chain, never the UI flow.

use std::sync::Arc;

use tokio::sync::oneshot;
use tonkit_types::{Wallet, WalletKind};

use crate::deeplink::SignUrl;
use crate::error::SignError;
use crate::vault::SecretStore;

/// A prepared transfer awaiting a signature. Consumed exactly once.
#[derive(Debug, Clone)]
pub struct TransferSignRequest {
    pub wallet: Wallet,
    /// Serialized unsigned transfer payload, opaque to the signer.
    pub payload: Vec<u8>,
    /// Chain-side validity window of the unsigned message (Unix seconds).
    pub valid_until: u64,
    pub seqno: u32,
}

/// The single terminal outcome of a signing request.
#[derive(Debug, Clone, PartialEq)]
pub enum SignOutcome {
    Signed(Vec<u8>),
    Failed(SignError),
    Cancelled,
}

/// Awaits the terminal outcome of one signing request.
///
/// Resolves exactly once. If every pending handle is dropped without a
/// terminal call, the flow was abandoned and the receipt resolves to
/// `Cancelled`.
pub struct SignReceipt {
    rx: oneshot::Receiver<SignOutcome>,
}

impl SignReceipt {
    pub async fn outcome(self) -> SignOutcome {
        self.rx.await.unwrap_or(SignOutcome::Cancelled)
    }
}

/// Where a signing request went after dispatch.
pub enum SignFlow<S> {
    /// Regular custody: waiting for the user to confirm with a passcode.
    AwaitingPasscode(PasscodeChallenge<S>),
    /// External custody: waiting for the out-of-process signer's callback.
    /// There is no timeout; abandoning the prompt is the only way out.
    AwaitingExternalSignature(ExternalSignPrompt),
    /// The request terminated at dispatch (lockup / watch-only wallets).
    Done(SignOutcome),
}

/// Dispatches signing requests by wallet custody kind.
pub struct TransferSigner<S> {
    secrets: Arc<S>,
    /// Return scheme embedded into external-signer deep links.
    return_url: String,
}

impl<S: SecretStore> TransferSigner<S> {
    pub fn new(secrets: Arc<S>, return_url: impl Into<String>) -> Self {
        Self {
            secrets,
            return_url: return_url.into(),
        }
    }

    /// Dispatch a request, returning the pending flow and a receipt that
    /// resolves with the single terminal outcome.
    pub fn begin(&self, request: TransferSignRequest) -> (SignFlow<S>, SignReceipt) {
        let (tx, rx) = oneshot::channel();
        let receipt = SignReceipt { rx };

        let flow = match &request.wallet.kind {
            WalletKind::Regular { .. } => {
                tracing::debug!(seqno = request.seqno, "awaiting passcode confirmation");
                SignFlow::AwaitingPasscode(PasscodeChallenge {
                    secrets: Arc::clone(&self.secrets),
                    request,
                    tx,
                })
            }
            WalletKind::External {
                public_key,
                revision,
            } => {
                let url = SignUrl {
                    public_key: public_key.clone(),
                    body: request.payload.clone(),
                    revision: *revision,
                    return_url: self.return_url.clone(),
                };
                tracing::debug!(seqno = request.seqno, "awaiting external signature");
                SignFlow::AwaitingExternalSignature(ExternalSignPrompt { url, tx })
            }
            WalletKind::Lockup => {
                SignFlow::Done(resolve(tx, failed_kind("lockup")))
            }
            WalletKind::WatchOnly => {
                SignFlow::Done(resolve(tx, failed_kind("watch-only")))
            }
        };
        (flow, receipt)
    }
}

fn failed_kind(kind: &'static str) -> SignOutcome {
    SignOutcome::Failed(SignError::IncorrectWalletKind(kind))
}

/// Deliver the outcome through the oneshot and hand it back to the caller.
/// A dropped receipt is fine; the flow side still observes the outcome.
fn resolve(tx: oneshot::Sender<SignOutcome>, outcome: SignOutcome) -> SignOutcome {
    let _ = tx.send(outcome.clone());
    outcome
}

/// Pending local signing, waiting for the user's passcode.
///
/// `confirm` and `cancel` consume the challenge, so exactly one terminal
/// outcome can ever be produced from it.
pub struct PasscodeChallenge<S> {
    secrets: Arc<S>,
    request: TransferSignRequest,
    tx: oneshot::Sender<SignOutcome>,
}

impl<S: SecretStore> PasscodeChallenge<S> {
    /// The user confirmed: load the mnemonic, derive the key pair, and
    /// sign the payload locally.
    pub fn confirm(self, passcode: &str) -> SignOutcome {
        let outcome = self.sign_locally(passcode);
        if let SignOutcome::Failed(err) = &outcome {
            tracing::warn!(error = %err, "local signing failed");
        }
        resolve(self.tx, outcome)
    }

    /// The user dismissed the passcode prompt.
    pub fn cancel(self) -> SignOutcome {
        resolve(self.tx, SignOutcome::Cancelled)
    }

    fn sign_locally(&self, passcode: &str) -> SignOutcome {
        let phrase = match self.secrets.load_mnemonic(&self.request.wallet, passcode) {
            Ok(phrase) => phrase,
            Err(err) => return SignOutcome::Failed(SignError::Secret(err)),
        };
        let keypair = match tonkit_crypto::keypair_from_mnemonic(&phrase) {
            Ok(kp) => kp,
            Err(err) => return SignOutcome::Failed(SignError::Derivation(err.to_string())),
        };
        // The derived key must belong to this wallet; a mismatch means the
        // stored mnemonic does not correspond to the wallet's public key.
        if Some(&keypair.public) != self.request.wallet.public_key() {
            return SignOutcome::Failed(SignError::Derivation(
                "derived key does not match wallet public key".into(),
            ));
        }
        let signature = tonkit_crypto::sign_message(&self.request.payload, &keypair.private);
        SignOutcome::Signed(signature.to_vec())
    }
}

/// Pending external signing, waiting for the out-of-process callback.
pub struct ExternalSignPrompt {
    url: SignUrl,
    tx: oneshot::Sender<SignOutcome>,
}

impl ExternalSignPrompt {
    /// The deep link to hand to the external signer.
    pub fn url(&self) -> String {
        self.url.encode()
    }

    /// The external signer called back with signed bytes.
    pub fn resolve(self, signed: Vec<u8>) -> SignOutcome {
        resolve(self.tx, SignOutcome::Signed(signed))
    }

    /// The user abandoned the external signing flow.
    pub fn abandon(self) -> SignOutcome {
        resolve(self.tx, SignOutcome::Cancelled)
    }
}

//! Wallet core library.
//!
//! Provides the valuation and signing subsystem of the wallet:
//! - Rate conversion at full integer precision (`rates`)
//! - Multi-asset total-balance aggregation with cache (`total_balance`)
//! - Transfer-signing state machine over wallet custody kinds (`signer`)
//! - Deep-link URL codec for external signers (`deeplink`)
//! - Debounced recipient resolution (`recipient`)
//! - Encrypted mnemonic vault (`vault`)
//! - Balance/rate update bus (`events`)

pub mod deeplink;
pub mod error;
pub mod events;
pub mod rates;
pub mod recipient;
pub mod signer;
pub mod total_balance;
pub mod vault;

pub use deeplink::{SignUrl, SignUrlError};
pub use error::{SecretError, SignError};
pub use events::{StoreEvent, UpdateBus};
pub use recipient::{DomainResolver, KnownAccounts, RecipientResolver, RecipientState};
pub use signer::{
    ExternalSignPrompt, PasscodeChallenge, SignFlow, SignOutcome, SignReceipt,
    TransferSignRequest, TransferSigner,
};
pub use total_balance::{
    calculate_total_balance, BalanceSource, MemoryTotalBalanceRepository, RateIndex, RateSource,
    TotalBalanceRepository, TotalBalanceService,
};
pub use vault::{MemorySecretStore, MnemonicVault, SecretStore};

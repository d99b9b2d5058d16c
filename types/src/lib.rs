//! Fundamental types for the tonkit wallet core.
//!
//! This crate defines the domain types shared across the workspace:
//! amounts, currencies, rates, asset balances, addresses, wallets,
//! recipients, keys, and timestamps.

pub mod address;
pub mod amount;
pub mod balance;
pub mod currency;
pub mod keys;
pub mod rate;
pub mod recipient;
pub mod time;
pub mod wallet;

pub use address::{Address, AddressError};
pub use amount::Amount;
pub use balance::{AssetBalance, JettonInfo, TotalBalance};
pub use currency::Currency;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use rate::Rate;
pub use recipient::{Recipient, ResolvedRecipient};
pub use time::Timestamp;
pub use wallet::{Network, Revision, Wallet, WalletKind};

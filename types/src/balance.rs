//! Asset balances and the aggregated total.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Amount;
use crate::time::Timestamp;

/// Metadata identifying a jetton (fungible token).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonInfo {
    /// Address of the jetton master contract.
    pub master: Address,
    pub symbol: String,
    /// Fractional digits of the jetton's raw amounts.
    pub decimals: u32,
}

/// One position contributing to a wallet's net worth.
///
/// Amounts are non-negative by construction (`Amount` wraps a `BigUint`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetBalance {
    Ton(Amount),
    Jetton { amount: Amount, info: JettonInfo },
    Staking {
        amount: Amount,
        pending_deposit: Amount,
        pending_withdraw: Amount,
    },
}

impl AssetBalance {
    /// The principal amount of the position, pending flows excluded.
    pub fn amount(&self) -> &Amount {
        match self {
            AssetBalance::Ton(amount) => amount,
            AssetBalance::Jetton { amount, .. } => amount,
            AssetBalance::Staking { amount, .. } => amount,
        }
    }
}

/// The normalized sum of all converted asset balances at one common scale.
///
/// Invariant: `amount.fractional_digits()` equals the maximum scale among
/// the converted items that contributed; smaller-scale items were upscaled
/// before summation, never downscaled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalBalance {
    pub amount: Amount,
    pub computed_at: Timestamp,
}

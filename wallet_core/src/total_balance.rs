//! Multi-asset total-balance aggregation.
//!
//! Converts each asset balance into the display currency, aligns every
//! converted amount to the maximum fractional scale among them (upscaling
//! only, so no precision is ever lost), and sums with integer arithmetic.
//!
//! Assets with no usable rate for the requested currency are skipped, not
//! zero-valued: the asset stays visible elsewhere, only the grand total
//! omits it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use num_bigint::BigUint;
use num_traits::Zero;
use tokio::sync::broadcast;
use tonkit_types::{Address, Amount, AssetBalance, Currency, Rate, Timestamp, TotalBalance};

use crate::events::StoreEvent;
use crate::rates;

/// Rate tables for the native token and each jetton, keyed by jetton master.
#[derive(Clone, Debug, Default)]
pub struct RateIndex {
    ton: Vec<Rate>,
    jettons: HashMap<Address, Vec<Rate>>,
}

impl RateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ton_rates(&mut self, rates: Vec<Rate>) {
        self.ton = rates;
    }

    pub fn set_jetton_rates(&mut self, master: Address, rates: Vec<Rate>) {
        self.jettons.insert(master, rates);
    }

    /// The native-token rate for `currency`, if a usable one exists.
    /// Zero rates count as "no valuation available".
    pub fn ton_rate(&self, currency: Currency) -> Option<&Rate> {
        usable_rate(&self.ton, currency)
    }

    /// The rate for a jetton in `currency`, if a usable one exists.
    pub fn jetton_rate(&self, master: &Address, currency: Currency) -> Option<&Rate> {
        usable_rate(self.jettons.get(master)?, currency)
    }
}

fn usable_rate(rates: &[Rate], currency: Currency) -> Option<&Rate> {
    rates
        .iter()
        .find(|r| r.currency == currency && !r.rate.is_zero())
}

/// Aggregate all balances into one total in `currency`.
///
/// Pure aside from its inputs; safe to call repeatedly and concurrently.
pub fn calculate_total_balance(
    balances: &[AssetBalance],
    currency: Currency,
    rates: &RateIndex,
    now: Timestamp,
) -> TotalBalance {
    let mut converted = Vec::with_capacity(balances.len());
    for balance in balances {
        let item = match balance {
            AssetBalance::Ton(amount) => rates
                .ton_rate(currency)
                .map(|rate| rates::convert(amount, rate)),
            AssetBalance::Jetton { amount, info } => rates
                .jetton_rate(&info.master, currency)
                .map(|rate| rates::convert(amount, rate)),
            AssetBalance::Staking {
                amount,
                pending_deposit,
                pending_withdraw,
            } => {
                // Pending flows are still the owner's funds; value the whole
                // position at the native-token rate.
                let position = amount
                    .add_aligned(pending_deposit)
                    .add_aligned(pending_withdraw);
                rates
                    .ton_rate(currency)
                    .map(|rate| rates::convert(&position, rate))
            }
        };
        match item {
            Some(amount) => converted.push(amount),
            None => {
                tracing::debug!(%currency, "no rate for asset, skipping from total");
            }
        }
    }

    let max_scale = converted
        .iter()
        .map(Amount::fractional_digits)
        .max()
        .unwrap_or(0);

    let mut sum = BigUint::zero();
    for item in &converted {
        sum += item.upscaled_to(max_scale).value();
    }

    TotalBalance {
        amount: Amount::new(sum, max_scale),
        computed_at: now,
    }
}

/// Cache for computed totals, keyed by address + currency.
///
/// The cache only exists to avoid a blank display before the first
/// computation completes; recomputation from live balances and rates is
/// always authoritative.
pub trait TotalBalanceRepository: Send + Sync {
    fn get(&self, address: &Address, currency: Currency) -> Option<TotalBalance>;
    fn save(&self, total: &TotalBalance, address: &Address, currency: Currency);
}

/// In-memory repository.
#[derive(Default)]
pub struct MemoryTotalBalanceRepository {
    entries: Mutex<HashMap<(Address, Currency), TotalBalance>>,
}

impl MemoryTotalBalanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TotalBalanceRepository for MemoryTotalBalanceRepository {
    fn get(&self, address: &Address, currency: Currency) -> Option<TotalBalance> {
        self.entries
            .lock()
            .expect("repository lock poisoned")
            .get(&(address.clone(), currency))
            .cloned()
    }

    fn save(&self, total: &TotalBalance, address: &Address, currency: Currency) {
        self.entries
            .lock()
            .expect("repository lock poisoned")
            .insert((address.clone(), currency), total.clone());
    }
}

/// Live balances for an address (balance store collaborator).
pub trait BalanceSource: Send + Sync {
    fn balances(&self, address: &Address) -> Vec<AssetBalance>;
}

/// Current rate tables (rate store collaborator).
pub trait RateSource: Send + Sync {
    fn rates(&self) -> RateIndex;
}

/// Recomputes and caches total balances whenever the stores update.
pub struct TotalBalanceService<B, R, P> {
    balances: Arc<B>,
    rates: Arc<R>,
    repository: Arc<P>,
}

impl<B, R, P> TotalBalanceService<B, R, P>
where
    B: BalanceSource,
    R: RateSource,
    P: TotalBalanceRepository,
{
    pub fn new(balances: Arc<B>, rates: Arc<R>, repository: Arc<P>) -> Self {
        Self {
            balances,
            rates,
            repository,
        }
    }

    /// Read the cached total without recomputing.
    pub fn cached(&self, address: &Address, currency: Currency) -> Option<TotalBalance> {
        self.repository.get(address, currency)
    }

    /// Recompute the total from live balances and rates, and cache it.
    pub fn refresh(&self, address: &Address, currency: Currency) -> TotalBalance {
        let balances = self.balances.balances(address);
        let rates = self.rates.rates();
        let total = calculate_total_balance(&balances, currency, &rates, Timestamp::now());
        self.repository.save(&total, address, currency);
        tracing::debug!(
            address = %address,
            %currency,
            total = %total.amount,
            "total balance refreshed"
        );
        total
    }

    /// Consume store events, refreshing on each update until the bus closes.
    ///
    /// `watched` is the set of addresses to refresh when rates change;
    /// balance updates always refresh the address they name.
    pub async fn run(
        &self,
        mut rx: broadcast::Receiver<StoreEvent>,
        watched: Vec<Address>,
        currency: Currency,
    ) {
        loop {
            match rx.recv().await {
                Ok(StoreEvent::BalancesDidUpdate { address }) => {
                    self.refresh(&address, currency);
                }
                Ok(StoreEvent::RatesDidUpdate) => {
                    for address in &watched {
                        self.refresh(address, currency);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "update bus lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

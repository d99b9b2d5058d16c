//! Exchange rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Price of one unit of a base asset in `currency`.
///
/// The rate is an exact decimal; converting an amount decomposes it into
/// mantissa and scale so no floating point ever enters the arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub currency: Currency,
    pub rate: Decimal,
    /// 24-hour price change, when the rate source provides one.
    pub diff_24h: Option<Decimal>,
}

impl Rate {
    pub fn new(currency: Currency, rate: Decimal) -> Self {
        Self {
            currency,
            rate,
            diff_24h: None,
        }
    }

    pub fn with_diff_24h(mut self, diff: Decimal) -> Self {
        self.diff_24h = Some(diff);
        self
    }
}

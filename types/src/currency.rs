//! Display currencies supported by the wallet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency a balance can be valued in.
///
/// Closed enum: valuation code matches on it exhaustively, so adding a
/// currency forces every conversion path to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Chf,
    Cny,
    Krw,
    Idr,
    Inr,
    Jpy,
    Rub,
    Uah,
    Aed,
    Ton,
}

impl Currency {
    /// ISO-style uppercase code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Krw => "KRW",
            Currency::Idr => "IDR",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
            Currency::Aed => "AED",
            Currency::Ton => "TON",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

//! Rate conversion at full integer precision.
//!
//! A rate is an exact decimal. Conversion decomposes it into mantissa and
//! scale: the result value is `amount.value * mantissa` and the result
//! scale is `amount.fractional_digits + rate_scale`. No rounding happens
//! here; truncation to a display precision is the caller's concern.

use num_bigint::BigUint;
use rust_decimal::Decimal;
use tonkit_types::{Amount, Rate};

/// Convert a token amount into the rate's currency.
///
/// The rate must be non-negative; a negative rate converts as zero.
/// A zero rate yields a zero amount; callers that need "no valuation
/// available" semantics must check for a missing/zero rate themselves
/// (the total-balance aggregation skips such assets entirely).
pub fn convert(amount: &Amount, rate: &Rate) -> Amount {
    let (mantissa, scale) = decompose(rate.rate);
    Amount::new(
        amount.value() * mantissa,
        amount.fractional_digits() + scale,
    )
}

/// Reciprocal conversion: a fiat amount back into token units.
///
/// Inverts the rate at the `Decimal` working precision (28 significant
/// digits) before converting, so the result may be truncated. Returns
/// `None` when the rate is zero or the inversion overflows.
pub fn convert_to_token(amount: &Amount, rate: &Rate) -> Option<Amount> {
    if rate.rate.is_zero() {
        return None;
    }
    let inverse = Decimal::ONE.checked_div(rate.rate)?;
    let inverted = Rate {
        currency: rate.currency,
        rate: inverse,
        diff_24h: None,
    };
    Some(convert(amount, &inverted))
}

/// Strip the decimal point: `2.5` becomes `(25, 1)`.
///
/// Trailing zeros are normalized away first so the scale is canonical
/// (`2.50` also becomes `(25, 1)`). Negative rates clamp to zero.
fn decompose(rate: Decimal) -> (BigUint, u32) {
    let rate = rate.normalize();
    if rate.is_sign_negative() {
        return (BigUint::from(0u32), rate.scale());
    }
    (BigUint::from(rate.mantissa().unsigned_abs()), rate.scale())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonkit_types::Currency;

    fn usd(rate: Decimal) -> Rate {
        Rate::new(Currency::Usd, rate)
    }

    #[test]
    fn one_ton_at_two_fifty() {
        // 1.0 TON (9 fractional digits) at $2.50 = $2.50 at 10 digits.
        let amount = Amount::from_u128(1_000_000_000, 9);
        let converted = convert(&amount, &usd(Decimal::new(25, 1)));
        assert_eq!(converted, Amount::from_u128(25_000_000_000, 10));
        assert_eq!(converted.to_string(), "2.5000000000");
    }

    #[test]
    fn scale_adds_rate_scale() {
        let amount = Amount::from_u128(123, 4);
        let converted = convert(&amount, &usd(Decimal::new(12_345, 3)));
        assert_eq!(converted.fractional_digits(), 4 + 3);
        assert_eq!(converted.value(), &BigUint::from(123u32 * 12_345u32));
    }

    #[test]
    fn trailing_zeros_do_not_inflate_scale() {
        let amount = Amount::from_u128(100, 2);
        // 2.50 normalizes to mantissa 25, scale 1.
        let converted = convert(&amount, &usd(Decimal::new(250, 2)));
        assert_eq!(converted, Amount::from_u128(2_500, 3));
    }

    #[test]
    fn integral_rate_has_zero_scale() {
        let amount = Amount::from_u128(7, 2);
        let converted = convert(&amount, &usd(Decimal::new(3, 0)));
        assert_eq!(converted, Amount::from_u128(21, 2));
    }

    #[test]
    fn zero_rate_converts_to_zero() {
        let amount = Amount::from_u128(999, 9);
        let converted = convert(&amount, &usd(Decimal::ZERO));
        assert!(converted.is_zero());
    }

    #[test]
    fn zero_amount_converts_to_zero() {
        let converted = convert(&Amount::zero(9), &usd(Decimal::new(25, 1)));
        assert!(converted.is_zero());
    }

    #[test]
    fn reciprocal_conversion_inverts_rate() {
        // $5.00 at $2.50/TON = 2 TON. Rate 2.5 inverts to 0.4 exactly.
        let fiat = Amount::from_u128(500, 2);
        let tokens = convert_to_token(&fiat, &usd(Decimal::new(25, 1))).unwrap();
        assert_eq!(tokens, Amount::from_u128(2_000, 3));
        assert_eq!(tokens.to_string(), "2.000");
    }

    #[test]
    fn reciprocal_of_zero_rate_is_none() {
        let fiat = Amount::from_u128(100, 2);
        assert!(convert_to_token(&fiat, &usd(Decimal::ZERO)).is_none());
    }

    #[test]
    fn scale_monotonicity_holds_for_many_rates() {
        let amount = Amount::from_u128(41, 3);
        for (mantissa, scale) in [(1i64, 0u32), (25, 1), (1_234_567, 6), (999_999_999, 9)] {
            let rate = usd(Decimal::new(mantissa, scale));
            let converted = convert(&amount, &rate);
            assert_eq!(
                converted.fractional_digits(),
                amount.fractional_digits() + rate.rate.normalize().scale()
            );
        }
    }
}

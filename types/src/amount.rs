//! Scaled integer token amounts.
//!
//! Amounts are arbitrary-precision unsigned integers paired with a
//! fractional-digit count: the real value is `value / 10^fractional_digits`.
//! All arithmetic is integer arithmetic; two amounts are only added after
//! aligning to the larger scale.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative token or fiat amount at a fixed decimal scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    value: BigUint,
    fractional_digits: u32,
}

impl Amount {
    pub fn new(value: BigUint, fractional_digits: u32) -> Self {
        Self {
            value,
            fractional_digits,
        }
    }

    pub fn from_u128(value: u128, fractional_digits: u32) -> Self {
        Self::new(BigUint::from(value), fractional_digits)
    }

    pub fn zero(fractional_digits: u32) -> Self {
        Self::new(BigUint::zero(), fractional_digits)
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn fractional_digits(&self) -> u32 {
        self.fractional_digits
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Rescale to a larger fractional-digit count by multiplying the raw
    /// value by `10^(scale - fractional_digits)`.
    ///
    /// Upscaling is exact. A target scale at or below the current one
    /// returns the amount unchanged; this type never downscales.
    pub fn upscaled_to(&self, scale: u32) -> Amount {
        if scale <= self.fractional_digits {
            return self.clone();
        }
        let factor = pow10(scale - self.fractional_digits);
        Amount::new(&self.value * factor, scale)
    }

    /// Add two amounts, aligning both to the larger scale first.
    pub fn add_aligned(&self, other: &Amount) -> Amount {
        let scale = self.fractional_digits.max(other.fractional_digits);
        let lhs = self.upscaled_to(scale);
        let rhs = other.upscaled_to(scale);
        Amount::new(lhs.value + rhs.value, scale)
    }
}

/// `10^exp` as a `BigUint`.
pub fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fractional_digits == 0 {
            return write!(f, "{}", self.value);
        }
        let digits = self.value.to_string();
        let scale = self.fractional_digits as usize;
        if digits.len() <= scale {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        } else {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{int}.{frac}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upscale_multiplies_by_power_of_ten() {
        let a = Amount::from_u128(2_500, 2);
        let up = a.upscaled_to(4);
        assert_eq!(up, Amount::from_u128(250_000, 4));
    }

    #[test]
    fn upscale_to_smaller_scale_is_identity() {
        let a = Amount::from_u128(123, 6);
        assert_eq!(a.upscaled_to(3), a);
        assert_eq!(a.upscaled_to(6), a);
    }

    #[test]
    fn add_aligned_uses_larger_scale() {
        let a = Amount::from_u128(2_500, 2); // 25.00
        let b = Amount::from_u128(250, 4); // 0.0250
        let sum = a.add_aligned(&b);
        assert_eq!(sum, Amount::from_u128(250_250, 4)); // 25.0250
    }

    #[test]
    fn add_aligned_is_commutative() {
        let a = Amount::from_u128(7, 1);
        let b = Amount::from_u128(19, 3);
        assert_eq!(a.add_aligned(&b), b.add_aligned(&a));
    }

    #[test]
    fn display_renders_decimal_point() {
        assert_eq!(Amount::from_u128(250_250, 4).to_string(), "25.0250");
        assert_eq!(Amount::from_u128(5, 2).to_string(), "0.05");
        assert_eq!(Amount::from_u128(42, 0).to_string(), "42");
        assert_eq!(Amount::zero(3).to_string(), "0.000");
    }

    #[test]
    fn zero_is_zero() {
        assert!(Amount::zero(9).is_zero());
        assert!(!Amount::from_u128(1, 9).is_zero());
    }
}

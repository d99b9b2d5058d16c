use proptest::prelude::*;

use tonkit_types::{Address, Amount};

proptest! {
    /// Upscaling multiplies the raw value by the exact power of ten.
    #[test]
    fn amount_upscale_exact(value in 0u128..u128::MAX / 1_000_000, scale in 0u32..12, extra in 0u32..6) {
        let amount = Amount::from_u128(value, scale);
        let up = amount.upscaled_to(scale + extra);
        prop_assert_eq!(up.fractional_digits(), scale + extra);
        prop_assert_eq!(up.value(), &(amount.value() * tonkit_types::amount::pow10(extra)));
    }

    /// Upscaling never changes the represented value: rendering the upscaled
    /// amount parses back to the same rational number (checked via raw value).
    #[test]
    fn amount_upscale_preserves_value(value in 0u128..1_000_000_000_000u128, scale in 0u32..9) {
        let amount = Amount::from_u128(value, scale);
        let up = amount.upscaled_to(scale + 3);
        // up / 10^(scale+3) == value / 10^scale  <=>  up == value * 10^3
        prop_assert_eq!(up.value(), &(amount.value() * 1000u32));
    }

    /// Aligned addition equals integer addition after upscaling both sides.
    #[test]
    fn amount_add_aligned_exact(
        a in 0u128..1_000_000_000_000u128,
        b in 0u128..1_000_000_000_000u128,
        sa in 0u32..9,
        sb in 0u32..9,
    ) {
        let lhs = Amount::from_u128(a, sa);
        let rhs = Amount::from_u128(b, sb);
        let sum = lhs.add_aligned(&rhs);
        let scale = sa.max(sb);
        prop_assert_eq!(sum.fractional_digits(), scale);
        let expected = lhs.upscaled_to(scale).value() + rhs.upscaled_to(scale).value();
        prop_assert_eq!(sum.value(), &expected);
    }

    /// Raw address form round-trips.
    #[test]
    fn address_raw_roundtrip(hash in prop::array::uniform32(0u8..), wc in -1i8..=0) {
        let addr = Address::new(wc, hash);
        prop_assert_eq!(Address::from_raw(&addr.to_raw()).unwrap(), addr);
    }

    /// User-friendly address form round-trips under all tag flags.
    #[test]
    fn address_friendly_roundtrip(
        hash in prop::array::uniform32(0u8..),
        wc in -1i8..=0,
        bounceable: bool,
        testnet: bool,
    ) {
        let addr = Address::new(wc, hash);
        let friendly = addr.to_friendly(bounceable, testnet);
        prop_assert_eq!(friendly.len(), 48);
        prop_assert_eq!(Address::from_friendly(&friendly).unwrap(), addr);
    }
}

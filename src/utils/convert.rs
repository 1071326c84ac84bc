use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{QuoteError, Result};

const MAX_EXPONENT: u32 = 1_000;

/// 10^exp as an unbounded integer
pub fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Convert an amount in indivisible units into whole tokens
pub fn units_to_ui(amount: &BigUint, decimals: u8) -> BigRational {
    BigRational::new(
        BigInt::from(amount.clone()),
        BigInt::from(pow10(decimals as u32)),
    )
}

/// Convert a decimal token amount (as reported by the catalog) into indivisible units.
///
/// The float is taken at its exact binary value, scaled by 10^decimals and
/// truncated, so anything below one unit is lost.
pub fn ui_to_units(amount: f64, decimals: u8) -> Result<BigUint> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(QuoteError::Decode(format!(
            "reserve amount {} is not a finite non-negative number",
            amount
        )));
    }

    let exact = BigRational::from_float(amount)
        .ok_or_else(|| QuoteError::Decode(format!("reserve amount {} is not representable", amount)))?;
    let scaled = exact * BigRational::from_integer(BigInt::from(pow10(decimals as u32)));

    scaled
        .trunc()
        .to_integer()
        .to_biguint()
        .ok_or_else(|| QuoteError::Decode(format!("reserve amount {} is negative", amount)))
}

/// Parse a decimal string such as `1`, `0.25`, `.5` or `1.5e-3` exactly
pub fn parse_decimal(input: &str) -> Result<BigRational> {
    let invalid = || QuoteError::InvalidInput(format!("invalid decimal number: {:?}", input));

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
        Some(pos) => {
            let exponent: i32 = unsigned[pos + 1..].parse().map_err(|_| invalid())?;
            if exponent.unsigned_abs() > MAX_EXPONENT {
                return Err(invalid());
            }
            (&unsigned[..pos], exponent)
        }
        None => (unsigned, 0),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (mantissa, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    let digits = format!("{}{}", whole, fraction);
    let mut numerator: BigInt = digits.parse().map_err(|_| invalid())?;
    if negative {
        numerator = -numerator;
    }

    let scale = exponent - fraction.len() as i32;
    let ten = BigInt::from(10);
    let value = if scale >= 0 {
        BigRational::from_integer(numerator * ten.pow(scale as u32))
    } else {
        BigRational::new(numerator, ten.pow(scale.unsigned_abs()))
    };

    Ok(value)
}

/// Lossy conversion of a rational to f64, for display and logging only
pub fn ratio_to_f64(value: &BigRational) -> f64 {
    if value.is_zero() {
        return 0.0;
    }
    value.to_f64().unwrap_or_else(|| {
        if value.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

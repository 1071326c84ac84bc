use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

/// Shorten an address for display, e.g. `EPjF...Dt1v`
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Display precision derived from the magnitude of a price
pub fn display_decimals(price: &BigRational) -> u32 {
    let ratio = |n: i64, d: i64| BigRational::new(BigInt::from(n), BigInt::from(d));

    if *price < ratio(1, 100) {
        8
    } else if *price < ratio(1, 1) {
        6
    } else if *price < ratio(100, 1) {
        4
    } else {
        2
    }
}

/// Render a rational as a fixed-point decimal, rounding half away from zero
pub fn format_fixed(value: &BigRational, decimals: u32) -> String {
    let scale = BigInt::from(10).pow(decimals);
    let scaled = (value * BigRational::from_integer(scale)).round().to_integer();

    let sign = if scaled.is_negative() { "-" } else { "" };
    let mut digits = scaled.abs().to_string();

    let decimals = decimals as usize;
    if decimals == 0 {
        return format!("{}{}", sign, digits);
    }
    if digits.len() <= decimals {
        digits = format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits);
    }
    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    format!("{}{}.{}", sign, whole, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[rstest]
    #[case(ratio(1, 1000), 8)]
    #[case(ratio(1, 100), 6)]
    #[case(ratio(1, 2), 6)]
    #[case(ratio(1, 1), 4)]
    #[case(ratio(9999, 100), 4)]
    #[case(ratio(100, 1), 2)]
    #[case(ratio(50_050, 1), 2)]
    fn test_display_decimals(#[case] price: BigRational, #[case] expected: u32) {
        assert_eq!(display_decimals(&price), expected);
    }

    #[rstest]
    #[case(ratio(20_408_163, 1_000_000), 4, "20.4082")]
    #[case(ratio(1, 3), 6, "0.333333")]
    #[case(ratio(2, 3), 6, "0.666667")]
    #[case(ratio(1, 1000), 8, "0.00100000")]
    #[case(ratio(5, 2), 0, "3")]
    #[case(ratio(-1, 8), 2, "-0.13")]
    #[case(ratio(123, 1), 2, "123.00")]
    fn test_format_fixed(#[case] value: BigRational, #[case] decimals: u32, #[case] expected: &str) {
        assert_eq!(format_fixed(&value, decimals), expected);
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("7XawhbbxtsRcQA8KTkHT9f9nc6d69UwqCDh6U5EEbEmX"),
            "7Xaw...bEmX"
        );
        assert_eq!(short_address("ABCDEFGH"), "ABCDEFGH");
        assert_eq!(short_address("ABCDEFGHI"), "ABCD...FGHI");
    }
}

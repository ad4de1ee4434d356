//! Aspect ratios parsed from `n:d` text.
//!
//! Both parts are kept as exact decimals so the proportional split and the
//! two-digit ratio rounding never see float truncation.
//!
//! ```
//! use zenaspect::AspectRatio;
//!
//! let ratio: AspectRatio = "1.85:1".parse().unwrap();
//! assert_eq!(ratio.to_string(), "1.85:1");
//! assert_eq!(ratio.flipped().to_string(), "1:1.85");
//! assert!(ratio.is_landscape());
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

/// Longest significant digit run accepted in one ratio part.
const MAX_DIGITS: usize = 12;

/// Ratio parse error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RatioError {
    /// Text has no `:` between the two parts.
    #[error("expected `n:d`")]
    MissingSeparator,
    /// A part is not an unsigned integer or decimal.
    #[error("ratio part is not a number")]
    InvalidNumber,
    /// A part is zero.
    #[error("ratio part is zero")]
    ZeroPart,
}

/// Exact non-negative decimal: `mantissa / 10^scale`.
///
/// Trailing fractional zeros are stripped at parse time, so `1.50` and `1.5`
/// compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: u64,
    scale: u32,
}

impl Decimal {
    /// An integer value.
    pub const fn from_int(value: u32) -> Self {
        Self {
            mantissa: value as u64,
            scale: 0,
        }
    }

    /// Digits without the decimal point.
    pub const fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Number of fractional digits.
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 / pow10(self.scale) as f64
    }

    /// `self` rescaled to `scale` fractional digits (as an integer).
    fn widen(&self, scale: u32) -> u128 {
        self.mantissa as u128 * pow10(scale - self.scale)
    }
}

impl FromStr for Decimal {
    type Err = RatioError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(RatioError::InvalidNumber);
        }
        // A second '.' lands in frac_part and fails the digit check.
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(RatioError::InvalidNumber);
        }

        let int_part = int_part.trim_start_matches('0');
        let frac_part = frac_part.trim_end_matches('0');
        if int_part.len() + frac_part.len() > MAX_DIGITS {
            return Err(RatioError::InvalidNumber);
        }

        let mantissa = int_part
            .bytes()
            .chain(frac_part.bytes())
            .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));
        if mantissa == 0 {
            return Err(RatioError::ZeroPart);
        }
        Ok(Self {
            mantissa,
            scale: frac_part.len() as u32,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let unit = pow10(self.scale) as u64;
        write!(
            f,
            "{}.{:0width$}",
            self.mantissa / unit,
            self.mantissa % unit,
            width = self.scale as usize
        )
    }
}

/// A ratio `n : d` of two positive exact decimals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    n: Decimal,
    d: Decimal,
}

impl AspectRatio {
    /// Square, `1:1`.
    pub const SQUARE: Self = Self {
        n: Decimal::from_int(1),
        d: Decimal::from_int(1),
    };

    /// Integer ratio `n:d`.
    pub fn new(n: u32, d: u32) -> Result<Self, RatioError> {
        if n == 0 || d == 0 {
            return Err(RatioError::ZeroPart);
        }
        Ok(Self {
            n: Decimal::from_int(n),
            d: Decimal::from_int(d),
        })
    }

    /// Width part.
    pub const fn n(&self) -> Decimal {
        self.n
    }

    /// Height part.
    pub const fn d(&self) -> Decimal {
        self.d
    }

    /// `d:n`.
    pub const fn flipped(&self) -> Self {
        Self {
            n: self.d,
            d: self.n,
        }
    }

    /// `n / d` as a float.
    pub fn value(&self) -> f64 {
        self.n.to_f64() / self.d.to_f64()
    }

    /// True when wider than tall.
    pub fn is_landscape(&self) -> bool {
        let (n, d) = self.common_scale();
        n > d
    }

    /// Both parts as integers over a shared power of ten.
    fn common_scale(&self) -> (u128, u128) {
        let scale = self.n.scale.max(self.d.scale);
        (self.n.widen(scale), self.d.widen(scale))
    }

    /// Partition `total` proportionally to the two parts.
    ///
    /// Each share is rounded half-to-even on its own, so when both land on a
    /// tie the shares may miss `total` by one.
    pub(crate) fn split(&self, total: u64) -> (u64, u64) {
        let (n, d) = self.common_scale();
        let sum = n + d;
        let total = total as u128;
        (
            div_round_half_even(n * total, sum) as u64,
            div_round_half_even(d * total, sum) as u64,
        )
    }

    /// `n / d` rounded half-to-even to two decimals, in hundredths.
    pub(crate) fn hundredths(&self) -> u128 {
        let (n, d) = self.common_scale();
        div_round_half_even(n * 100, d)
    }

    /// How `n / d`, rounded to two decimals, compares with 1.
    pub(crate) fn rounded_orientation(&self) -> Ordering {
        self.hundredths().cmp(&100)
    }
}

impl FromStr for AspectRatio {
    type Err = RatioError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (n, d) = text.split_once(':').ok_or(RatioError::MissingSeparator)?;
        Ok(Self {
            n: n.parse()?,
            d: d.parse()?,
        })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.n, self.d)
    }
}

const fn pow10(exp: u32) -> u128 {
    10u128.pow(exp)
}

fn div_round_half_even(num: u128, den: u128) -> u128 {
    let q = num / den;
    let r = num % den;
    match (2 * r).cmp(&den) {
        Ordering::Greater => q + 1,
        Ordering::Equal => q + (q & 1),
        Ordering::Less => q,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ar(text: &str) -> AspectRatio {
        text.parse().unwrap()
    }

    #[test]
    fn parse_integers() {
        let r = ar("16:9");
        assert_eq!(r.n(), Decimal::from_int(16));
        assert_eq!(r.d(), Decimal::from_int(9));
        assert_eq!(r, AspectRatio::new(16, 9).unwrap());
    }

    #[test]
    fn parse_decimals_exactly() {
        let r = ar("2.39:1");
        assert_eq!(r.n().mantissa(), 239);
        assert_eq!(r.n().scale(), 2);
        assert_eq!(ar("1.50:1"), ar("1.5:1"));
        assert_eq!(ar(".5:1").n(), ar("0.5:1").n());
    }

    #[test]
    fn parse_tolerates_padding() {
        assert_eq!(ar(" 16 : 9 "), ar("16:9"));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert_eq!("abc:def".parse::<AspectRatio>(), Err(RatioError::InvalidNumber));
        assert_eq!("16:".parse::<AspectRatio>(), Err(RatioError::InvalidNumber));
        assert_eq!("1.2.3:1".parse::<AspectRatio>(), Err(RatioError::InvalidNumber));
        assert_eq!("-1:1".parse::<AspectRatio>(), Err(RatioError::InvalidNumber));
        assert_eq!("1:2:3".parse::<AspectRatio>(), Err(RatioError::InvalidNumber));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert_eq!("169".parse::<AspectRatio>(), Err(RatioError::MissingSeparator));
    }

    #[test]
    fn parse_rejects_zero_parts() {
        assert_eq!("16:0".parse::<AspectRatio>(), Err(RatioError::ZeroPart));
        assert_eq!("0.00:1".parse::<AspectRatio>(), Err(RatioError::ZeroPart));
        assert_eq!(AspectRatio::new(0, 9), Err(RatioError::ZeroPart));
    }

    #[test]
    fn parse_rejects_too_many_digits() {
        assert_eq!(
            "1234567890123:1".parse::<AspectRatio>(),
            Err(RatioError::InvalidNumber)
        );
        assert!("000000000000016:9".parse::<AspectRatio>().is_ok());
    }

    #[test]
    fn display_round_trips_text() {
        assert_eq!(ar("21:9").to_string(), "21:9");
        assert_eq!(ar("1.85:1").to_string(), "1.85:1");
        assert_eq!(ar("0.05:1").to_string(), "0.05:1");
    }

    #[test]
    fn flipped_swaps_parts() {
        assert_eq!(ar("16:9").flipped(), ar("9:16"));
        assert_eq!(ar("16:9").flipped().flipped(), ar("16:9"));
    }

    #[test]
    fn landscape_detection() {
        assert!(ar("16:9").is_landscape());
        assert!(!ar("9:16").is_landscape());
        assert!(!AspectRatio::SQUARE.is_landscape());
        assert!(ar("1.01:1").is_landscape());
    }

    #[test]
    fn split_rounds_half_even() {
        // 1/4 * 10 = 2.5, 3/4 * 10 = 7.5
        assert_eq!(ar("1:3").split(10), (2, 8));
        // 3/4 * 554 = 415.5, 1/4 * 554 = 138.5
        assert_eq!(ar("3:1").split(554), (416, 138));
        // 3/8 * 4 = 1.5, 5/8 * 4 = 2.5
        assert_eq!(ar("3:5").split(4), (2, 2));
        assert_eq!(ar("16:9").split(1024), (655, 369));
        assert_eq!(ar("1:1").split(1024), (512, 512));
    }

    #[test]
    fn split_mixed_scales() {
        // 1.5 : 1 over 10 -> 6 : 4
        assert_eq!(ar("1.5:1").split(10), (6, 4));
    }

    #[test]
    fn hundredths_rounds_half_even() {
        assert_eq!(ar("16:9").hundredths(), 178);
        assert_eq!(ar("1.125:1").hundredths(), 112);
        assert_eq!(ar("1.135:1").hundredths(), 114);
        assert_eq!(ar("1:1").hundredths(), 100);
        assert_eq!(ar("1:300").hundredths(), 0);
    }

    #[test]
    fn rounded_orientation_uses_two_decimals() {
        assert_eq!(ar("1.004:1").rounded_orientation(), Ordering::Equal);
        assert_eq!(ar("1.006:1").rounded_orientation(), Ordering::Greater);
        assert_eq!(ar("3:4").rounded_orientation(), Ordering::Less);
    }

    #[test]
    fn value_is_quotient() {
        assert!((ar("16:9").value() - 16.0 / 9.0).abs() < 1e-12);
    }
}

//! Exact decimal numbers that remember their visible fraction digits.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::Error;

/// Most fraction digits a [`PluralNumber`] can carry.
pub const MAX_FRACTION_DIGITS: u32 = 18;

/// A decimal number as written, e.g. `1`, `1.0` or `-2.50`.
///
/// `1.0` and `1` compare equal, but keep their own representation:
/// trailing fraction zeros matter to the `v` and `f` plural operands.
#[derive(Debug, Clone, Copy)]
pub struct PluralNumber {
    negative: bool,
    integer: u64,
    fraction: u64,
    fraction_digits: u32,
}

impl PluralNumber {
    pub(crate) fn new(integer: u64, fraction: u64, fraction_digits: u32) -> Self {
        debug_assert!(fraction_digits <= MAX_FRACTION_DIGITS);
        debug_assert!(fraction < 10u64.pow(fraction_digits));
        PluralNumber {
            negative: false,
            integer,
            fraction,
            fraction_digits,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.integer == 0 && self.fraction == 0
    }

    pub fn abs(&self) -> Self {
        PluralNumber {
            negative: false,
            ..*self
        }
    }

    pub fn integer_part(&self) -> u64 {
        self.integer
    }

    /// Visible fraction digits as an integer, trailing zeros included.
    pub fn fraction_part(&self) -> u64 {
        self.fraction
    }

    /// Count of visible fraction digits, trailing zeros included.
    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    /// `self % modulus` on the magnitude; the fraction carries over unchanged.
    pub(crate) fn rem_integer(&self, modulus: u64) -> Self {
        debug_assert!(modulus > 0);
        PluralNumber {
            negative: false,
            integer: self.integer % modulus,
            ..*self
        }
    }

    /// The magnitude expressed in units of `10^-scale`.
    pub(crate) fn scaled(&self, scale: u32) -> Option<u128> {
        let shift = scale.checked_sub(self.fraction_digits)?;
        let unit = 10u128.checked_pow(scale)?;
        let fraction = u128::from(self.fraction).checked_mul(10u128.checked_pow(shift)?)?;
        u128::from(self.integer)
            .checked_mul(unit)?
            .checked_add(fraction)
    }

    /// Inverse of [`PluralNumber::scaled`].
    pub(crate) fn from_scaled(units: u128, scale: u32) -> Option<Self> {
        let unit = 10u128.checked_pow(scale)?;
        let integer = u64::try_from(units / unit).ok()?;
        let fraction = u64::try_from(units % unit).ok()?;
        Some(PluralNumber::new(integer, fraction, scale))
    }

    fn fraction_at(&self, digits: u32) -> u64 {
        self.fraction * 10u64.pow(digits - self.fraction_digits)
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let digits = self.fraction_digits.max(other.fraction_digits);
        self.integer
            .cmp(&other.integer)
            .then_with(|| self.fraction_at(digits).cmp(&other.fraction_at(digits)))
    }
}

impl PartialEq for PluralNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PluralNumber {}

impl PartialOrd for PluralNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PluralNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl FromStr for PluralNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidNumber(s.to_string());

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (integer_text, fraction_text) = match unsigned.split_once('.') {
            Some((integer, fraction)) if !fraction.is_empty() => (integer, fraction),
            Some(_) => return Err(invalid()),
            None => (unsigned, ""),
        };

        let all_digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if integer_text.is_empty() || !all_digits(integer_text) || !all_digits(fraction_text) {
            return Err(invalid());
        }

        let fraction_digits = u32::try_from(fraction_text.len()).map_err(|_| invalid())?;
        if fraction_digits > MAX_FRACTION_DIGITS {
            return Err(invalid());
        }

        let integer = integer_text.parse::<u64>().map_err(|_| invalid())?;
        let fraction = if fraction_text.is_empty() {
            0
        } else {
            fraction_text.parse::<u64>().map_err(|_| invalid())?
        };

        Ok(PluralNumber {
            negative,
            integer,
            fraction,
            fraction_digits,
        })
    }
}

impl Display for PluralNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer)?;
        if self.fraction_digits > 0 {
            write!(
                f,
                ".{:0width$}",
                self.fraction,
                width = self.fraction_digits as usize
            )?;
        }
        Ok(())
    }
}

impl From<u64> for PluralNumber {
    fn from(value: u64) -> Self {
        PluralNumber::new(value, 0, 0)
    }
}

impl From<u32> for PluralNumber {
    fn from(value: u32) -> Self {
        PluralNumber::from(u64::from(value))
    }
}

impl From<usize> for PluralNumber {
    fn from(value: usize) -> Self {
        PluralNumber::from(value as u64)
    }
}

impl From<i64> for PluralNumber {
    fn from(value: i64) -> Self {
        PluralNumber {
            negative: value < 0,
            ..PluralNumber::from(value.unsigned_abs())
        }
    }
}

impl From<i32> for PluralNumber {
    fn from(value: i32) -> Self {
        PluralNumber::from(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> PluralNumber {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_keep_representation() {
        for text in ["0", "1", "1.0", "1.50", "-2.05", "1000000.0", "0.0000001"] {
            assert_eq!(num(text).to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", ".5", "1.", "1..2", "a", "1e6", "--1", "1.1234567890123456789"] {
            assert!(text.parse::<PluralNumber>().is_err(), "{text}");
        }
    }

    #[test]
    fn test_value_equality_ignores_trailing_zeros() {
        assert_eq!(num("1.0"), num("1"));
        assert_eq!(num("2.50"), num("2.5"));
        assert_ne!(num("2.05"), num("2.5"));
        assert_eq!(num("-0.0"), num("0"));
    }

    #[test]
    fn test_ordering() {
        assert!(num("1.5") > num("1"));
        assert!(num("1.05") < num("1.5"));
        assert!(num("-3") < num("-2.5"));
        assert!(num("-1") < num("0.1"));
        assert!(num("10") > num("9.99"));
    }

    #[test]
    fn test_rem_integer_keeps_fraction() {
        assert_eq!(num("112.5").rem_integer(100), num("12.5"));
        assert_eq!(num("112.5").rem_integer(100).fraction_digits(), 1);
        assert_eq!(num("-21").rem_integer(10), num("1"));
    }

    #[test]
    fn test_scaled_round_trip() {
        let n = num("1.5");
        assert_eq!(n.scaled(2), Some(150));
        assert_eq!(n.scaled(0), None);
        let back = PluralNumber::from_scaled(150, 2).unwrap();
        assert_eq!(back.to_string(), "1.50");
    }

    #[test]
    fn test_from_signed_integers() {
        let n = PluralNumber::from(-5i32);
        assert!(n.is_negative());
        assert_eq!(n.abs(), PluralNumber::from(5u32));
        assert_eq!(n.to_string(), "-5");
    }
}

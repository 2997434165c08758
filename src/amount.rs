use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fixed-point decimal with 2 decimal places, stored as a scaled integer (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 100;

    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(value: i64) -> Self {
        Amount(value)
    }

    pub fn from_units(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    /// `None` when the sum does not fit.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

/// Returned when a string is not a decimal with at most 2 fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount '{0}'")]
pub struct ParseAmountError(String);

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Accepts `12`, `12.5`, `12.50`, `-3` and `12,50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseAmountError(s.to_string());
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = match digits.split_once(['.', ',']) {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
            return Err(err());
        }

        let whole: i64 = whole.parse().map_err(|_| err())?;
        // "5" -> 50 cents, "05" -> 5 cents
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        let cents = whole
            .checked_mul(Self::SCALE)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(err)?;

        Ok(Amount(if negative { -cents } else { cents }))
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_detects_overflow() {
        let max = Amount::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Amount::from_cents(1)), None);
        assert_eq!(
            Amount::from_cents(1).checked_add(Amount::from_cents(2)),
            Some(Amount::from_cents(3))
        );
    }

    #[test]
    fn from_units_scales() {
        assert_eq!(Amount::from_units(500), Amount::from_cents(50_000));
    }

    #[test]
    fn display_formats() {
        assert_eq!(Amount::from_cents(10_000).to_string(), "100.00");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!(Amount::from_cents(-5025).to_string(), "-50.25");
    }

    #[test]
    fn parse_accepts_common_forms() {
        assert_eq!("12".parse(), Ok(Amount::from_cents(1200)));
        assert_eq!("12.5".parse(), Ok(Amount::from_cents(1250)));
        assert_eq!("12.05".parse(), Ok(Amount::from_cents(1205)));
        assert_eq!("10,50".parse(), Ok(Amount::from_cents(1050)));
        assert_eq!(" 7 ".parse(), Ok(Amount::from_cents(700)));
        assert_eq!("-3".parse(), Ok(Amount::from_cents(-300)));
        assert_eq!("0".parse(), Ok(Amount::ZERO));
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "-", "abc", "1.234", ".5", "1.2.3", "1e3", "--1", "+1"] {
            assert!(input.parse::<Amount>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn parse_trailing_separator_is_whole_units() {
        assert_eq!("12.".parse(), Ok(Amount::from_units(12)));
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!("99999999999999999999".parse::<Amount>().is_err());
    }

    #[test]
    fn is_positive() {
        assert!(Amount::from_cents(1).is_positive());
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::from_cents(-1).is_positive());
    }

    #[test]
    fn arithmetic() {
        let mut a = Amount::from_cents(100);
        a += Amount::from_cents(50);
        assert_eq!(a, Amount::from_cents(150));
        a -= Amount::from_cents(30);
        assert_eq!(a, Amount::from_cents(120));
        assert_eq!(a - Amount::from_cents(20), Amount::from_cents(100));
        assert_eq!(a + Amount::from_cents(1), Amount::from_cents(121));
    }

    #[test]
    fn sum() {
        let total: Amount = [1, 2, 3].into_iter().map(Amount::from_units).sum();
        assert_eq!(total, Amount::from_units(6));
    }

    #[test]
    fn ordering() {
        assert!(Amount::from_cents(-100) < Amount::ZERO);
        assert!(Amount::ZERO < Amount::from_cents(100));
    }
}

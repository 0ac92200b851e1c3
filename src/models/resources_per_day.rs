//! Daily goal expressed as resources per day.
//!
//! A decimal with two fractional digits: `1.00` means one full resource
//! for every working day, `0.50` half of it. Stored as hundredths so that
//! the distributor weight is exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Resources devoted per day, with scale 2.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ResourcesPerDay {
    hundredths: u32,
}

/// Error parsing a [`ResourcesPerDay`] amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid resources per day amount: {0:?}")]
pub struct ParseResourcesPerDayError(String);

impl ResourcesPerDay {
    /// Amount from hundredths (`150` is `1.50`).
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self { hundredths }
    }

    /// A whole number of resources per day.
    pub const fn units(units: u32) -> Self {
        Self::from_hundredths(units * 100)
    }

    /// The amount in hundredths.
    #[inline]
    pub const fn hundredths(&self) -> u32 {
        self.hundredths
    }

    /// Whether no resource time is devoted.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.hundredths == 0
    }

    /// Integer weight for proportional distribution: the amount with the
    /// decimal point moved two places right (2.03 becomes 203).
    #[inline]
    pub fn normalized_weight(&self) -> u64 {
        u64::from(self.hundredths)
    }
}

impl FromStr for ResourcesPerDay {
    type Err = ParseResourcesPerDayError;

    /// Parses `"1"`, `"1.5"` or `"0.50"`. Digits beyond the second decimal
    /// round half up on the third.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseResourcesPerDayError(s.to_string());
        let trimmed = s.trim();
        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(err());
        }

        let units: u32 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| err())?
        };
        let digits: Vec<u32> = frac_part
            .bytes()
            .map(|b| u32::from(b - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let cents = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|&d| d >= 5);

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(tenths * 10 + cents + u32::from(round_up)))
            .map(Self::from_hundredths)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for ResourcesPerDay {
    type Error = ParseResourcesPerDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourcesPerDay> for String {
    fn from(value: ResourcesPerDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ResourcesPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("1".parse::<ResourcesPerDay>().unwrap().hundredths(), 100);
        assert_eq!("1.5".parse::<ResourcesPerDay>().unwrap().hundredths(), 150);
        assert_eq!("0.50".parse::<ResourcesPerDay>().unwrap().hundredths(), 50);
        assert_eq!("2.03".parse::<ResourcesPerDay>().unwrap().hundredths(), 203);
        assert_eq!(".25".parse::<ResourcesPerDay>().unwrap().hundredths(), 25);
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!("0.125".parse::<ResourcesPerDay>().unwrap().hundredths(), 13);
        assert_eq!("0.124".parse::<ResourcesPerDay>().unwrap().hundredths(), 12);
        assert_eq!("0.995".parse::<ResourcesPerDay>().unwrap().hundredths(), 100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<ResourcesPerDay>().is_err());
        assert!(".".parse::<ResourcesPerDay>().is_err());
        assert!("-1".parse::<ResourcesPerDay>().is_err());
        assert!("1.a".parse::<ResourcesPerDay>().is_err());
        assert!("1.2.3".parse::<ResourcesPerDay>().is_err());
    }

    #[test]
    fn test_normalized_weight() {
        assert_eq!(ResourcesPerDay::units(1).normalized_weight(), 100);
        assert_eq!(ResourcesPerDay::from_hundredths(150).normalized_weight(), 150);
        assert!(ResourcesPerDay::default().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourcesPerDay::from_hundredths(150).to_string(), "1.50");
        assert_eq!(ResourcesPerDay::from_hundredths(5).to_string(), "0.05");
        assert_eq!(ResourcesPerDay::units(2).to_string(), "2.00");
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let json = serde_json::to_string(&ResourcesPerDay::from_hundredths(50)).unwrap();
        assert_eq!(json, "\"0.50\"");
        let back: ResourcesPerDay = serde_json::from_str("\"1.25\"").unwrap();
        assert_eq!(back.hundredths(), 125);
        assert!(serde_json::from_str::<ResourcesPerDay>("\"abc\"").is_err());
    }
}

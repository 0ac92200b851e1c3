//! Effort value type.
//!
//! Effort is a non-negative amount of work measured in whole seconds.
//! Subtraction is only exposed in checked and saturating forms, so an
//! `Effort` can never become negative. Construction and addition saturate
//! at `u64::MAX` seconds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::ResourcesPerDay;

/// A non-negative amount of work, in seconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Effort {
    seconds: u64,
}

impl Effort {
    const SECONDS_PER_MINUTE: u64 = 60;
    const SECONDS_PER_HOUR: u64 = 3_600;

    /// The zero effort.
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    /// Effort of `seconds` seconds.
    pub const fn seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Effort of `minutes` minutes.
    pub const fn minutes(minutes: u64) -> Self {
        Self::seconds(minutes.saturating_mul(Self::SECONDS_PER_MINUTE))
    }

    /// Effort of `hours` hours.
    pub const fn hours(hours: u64) -> Self {
        Self::seconds(hours.saturating_mul(Self::SECONDS_PER_HOUR))
    }

    /// Effort of `hours:minutes:seconds`.
    pub const fn hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self::seconds(
            hours
                .saturating_mul(Self::SECONDS_PER_HOUR)
                .saturating_add(minutes.saturating_mul(Self::SECONDS_PER_MINUTE))
                .saturating_add(seconds),
        )
    }

    /// Number of seconds.
    #[inline]
    pub const fn as_seconds(&self) -> u64 {
        self.seconds
    }

    /// Whether this is the zero effort.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    /// `self - other`, or `None` if `other` is larger.
    pub fn checked_sub(self, other: Effort) -> Option<Effort> {
        self.seconds.checked_sub(other.seconds).map(Effort::seconds)
    }

    /// `self - other`, clamped at zero.
    pub fn saturating_sub(self, other: Effort) -> Effort {
        Effort::seconds(self.seconds.saturating_sub(other.seconds))
    }

    /// Portion of this effort devoted at the given resources-per-day rate.
    ///
    /// A full working day of 8h at 0.50 resources per day is 4h. The result
    /// is rounded half up to the nearest second.
    pub fn scale_by(self, rate: ResourcesPerDay) -> Effort {
        let scaled = (u128::from(self.seconds) * u128::from(rate.hundredths()) + 50) / 100;
        Effort::seconds(u64::try_from(scaled).unwrap_or(u64::MAX))
    }
}

impl Add for Effort {
    type Output = Effort;

    fn add(self, rhs: Effort) -> Effort {
        Effort::seconds(self.seconds.saturating_add(rhs.seconds))
    }
}

impl AddAssign for Effort {
    fn add_assign(&mut self, rhs: Effort) {
        self.seconds = self.seconds.saturating_add(rhs.seconds);
    }
}

impl Sum for Effort {
    fn sum<I: Iterator<Item = Effort>>(iter: I) -> Self {
        iter.fold(Effort::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Effort> for Effort {
    fn sum<I: Iterator<Item = &'a Effort>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / Self::SECONDS_PER_HOUR;
        let minutes = (self.seconds % Self::SECONDS_PER_HOUR) / Self::SECONDS_PER_MINUTE;
        let seconds = self.seconds % Self::SECONDS_PER_MINUTE;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};

use sdk::cosmwasm_std::Timestamp;

use crate::error::{Error, Result};

pub type Seconds = u64;

const NANOS_IN_SECOND: u64 = 1_000_000_000;

/// A timespan between [`Timestamp`]-s with a one second resolution.
///
/// Loan terms and funding cadences are all expressed in whole seconds so
/// a finer resolution would only introduce rounding on conversion.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(Seconds);

impl Duration {
    const SECONDS_IN_MINUTE: Seconds = 60;
    const SECONDS_IN_HOUR: Seconds = Self::SECONDS_IN_MINUTE * 60;
    const SECONDS_IN_DAY: Seconds = Self::SECONDS_IN_HOUR * 24;

    pub const HOUR: Duration = Self::from_hours(1);

    pub const DAY: Duration = Self::from_days(1);

    pub const YEAR: Duration = Self::from_days(365);

    pub const fn from_secs(secs: Seconds) -> Self {
        Self(secs)
    }

    pub const fn from_hours(hours: u16) -> Self {
        Self::from_secs(hours as Seconds * Self::SECONDS_IN_HOUR)
    }

    pub const fn from_days(days: u16) -> Self {
        Self::from_secs(days as Seconds * Self::SECONDS_IN_DAY)
    }

    /// The span from `start` to `end`, zero if `end` precedes `start`.
    pub fn between(start: &Timestamp, end: &Timestamp) -> Self {
        Self(end.seconds().saturating_sub(start.seconds()))
    }

    pub const fn secs(&self) -> Seconds {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_mul(&self, rhs: u64) -> Option<Self> {
        self.secs().checked_mul(rhs).map(Self::from_secs)
    }

    /// The moment `self` after `start`.
    ///
    /// Unlike `start + self` this fails instead of panicking when the result
    /// does not fit in a [`Timestamp`].
    pub fn after(&self, start: &Timestamp) -> Result<Timestamp> {
        self.secs()
            .checked_mul(NANOS_IN_SECOND)
            .and_then(|nanos| start.nanos().checked_add(nanos))
            .map(Timestamp::from_nanos)
            .ok_or_else(|| Error::addition_overflow(start, self))
    }

    /// How many whole `period`s fit in `self`.
    pub fn periods(&self, period: Self) -> Option<u64> {
        self.secs().checked_div(period.secs())
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        (&self).add(rhs)
    }
}

impl Add<Duration> for &Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Self::Output {
        self.plus_seconds(rhs.secs())
    }
}

impl AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        *self = self.add(rhs);
    }
}

impl Add<Duration> for Duration {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self::from_secs(self.secs().add(rhs.secs()))
    }
}

impl Sub<Duration> for Duration {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self::from_secs(self.secs().sub(rhs.secs()))
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_fmt(format_args!("{} {}", self.secs(), "secs"))
    }
}

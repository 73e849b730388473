use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// A non-negative span of time with a one second resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    secs: u64,
}

impl Duration {
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub fn seconds(amount: i64) -> Result<Self> {
        Self::scaled(amount, 1, "seconds")
    }

    pub fn minutes(amount: i64) -> Result<Self> {
        Self::scaled(amount, 60, "minutes")
    }

    pub fn hours(amount: i64) -> Result<Self> {
        Self::scaled(amount, 60 * 60, "hours")
    }

    pub fn days(amount: i64) -> Result<Self> {
        Self::scaled(amount, 24 * 60 * 60, "days")
    }

    pub fn to_seconds(&self) -> u64 {
        self.secs
    }

    fn scaled(amount: i64, unit: u64, unit_name: &str) -> Result<Self> {
        let amount = u64::try_from(amount).map_err(|_| {
            Error::InvalidDuration(format!(
                "amounts cannot be negative, received {amount} {unit_name}"
            ))
        })?;

        let secs = amount.checked_mul(unit).ok_or_else(|| {
            Error::InvalidDuration(format!("{amount} {unit_name} does not fit in seconds"))
        })?;

        Ok(Self { secs })
    }
}

/// Parse a human readable span, e.g. "60s" or "1m 30s"
impl FromStr for Duration {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parsed = humantime::parse_duration(value.trim())
            .map_err(|e| Error::InvalidDuration(format!("{value:?}: {e}")))?;

        if parsed.subsec_nanos() != 0 {
            return Err(Error::InvalidDuration(format!(
                "{value:?} is not a whole number of seconds"
            )));
        }

        Ok(Self::from_secs(parsed.as_secs()))
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.secs == 0 {
            return write!(f, "0s");
        }

        write!(
            f,
            "{}",
            humantime::format_duration(std::time::Duration::from_secs(self.secs))
        )
    }
}

impl From<Duration> for std::time::Duration {
    fn from(duration: Duration) -> Self {
        std::time::Duration::from_secs(duration.secs)
    }
}

/// Serialized as a plain number of seconds
impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.secs)
    }
}

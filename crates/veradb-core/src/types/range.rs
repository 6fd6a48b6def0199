use crate::types::Decimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// NumberRange
///
/// Inclusive decimal interval; either bound may be open. Used by delta
/// mutations to constrain the value after the delta is applied.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NumberRange {
    pub from: Option<Decimal>,
    pub to: Option<Decimal>,
}

impl NumberRange {
    #[must_use]
    pub const fn new(from: Option<Decimal>, to: Option<Decimal>) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn between(from: Decimal, to: Decimal) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.from.is_none_or(|from| value >= from) && self.to.is_none_or(|to| value <= to)
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "[{from}, ")?,
            None => write!(f, "(*, ")?,
        }
        match self.to {
            Some(to) => write!(f, "{to}]"),
            None => write!(f, "*)"),
        }
    }
}

///
/// DateTimeRange
///
/// Inclusive validity interval over UTC instants; either bound may be
/// open. Prices carry an optional one of these.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DateTimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateTimeRange {
    #[must_use]
    pub const fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    #[must_use]
    pub const fn until(to: DateTime<Utc>) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    /// Whether `moment` falls inside the interval.
    #[must_use]
    pub fn is_valid_at(&self, moment: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| moment >= from) && self.to.is_none_or(|to| moment <= to)
    }
}

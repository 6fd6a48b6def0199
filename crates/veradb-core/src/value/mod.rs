#[cfg(test)]
mod tests;

use crate::types::{Currency, DateTimeRange, Decimal, Locale};
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Closed tagged union of every value an attribute or associated-data
/// document may carry. Attributes hold scalar variants only; `List` and
/// `Map` exist for associated-data documents and nest recursively.
///
/// Type compatibility against a schema is decided by comparing
/// [`ValueKind`] tags, never by runtime reflection.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Currency(Currency),
    DateTimeRange(DateTimeRange),
    Decimal(Decimal),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    List(Vec<Self>),
    Locale(Locale),
    Map(Vec<(String, Self)>),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// The static scalar-kind tag for this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Currency(_) => ValueKind::Currency,
            Self::DateTimeRange(_) => ValueKind::DateTimeRange,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Int8(_) => ValueKind::Int8,
            Self::Int16(_) => ValueKind::Int16,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::List(_) => ValueKind::List,
            Self::Locale(_) => ValueKind::Locale,
            Self::Map(_) => ValueKind::Map,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Decimal representation of the numeric variants; `None` otherwise.
    ///
    /// Used by delta-range checks so all numeric kinds share one
    /// comparison surface.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Int8(v) => Some(Decimal::from(*v)),
            Self::Int16(v) => Some(Decimal::from(*v)),
            Self::Int32(v) => Some(Decimal::from(*v)),
            Self::Int64(v) => Some(Decimal::from(*v)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Int8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

///
/// ValueKind
///
/// Static registry of the supported scalar kinds, mirroring the `Value`
/// variants one-to-one. Schemas declare attribute types with this tag
/// and the guard compares tags to validate incoming values.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum ValueKind {
    Bool,
    Currency,
    DateTimeRange,
    Decimal,
    Int8,
    Int16,
    Int32,
    Int64,
    List,
    Locale,
    Map,
    Text,
    Timestamp,
}

impl ValueKind {
    /// Kinds a delta mutation may be applied to.
    #[must_use]
    pub const fn supports_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Decimal | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    /// Kinds with a total order, required for sortable attributes.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        !matches!(self, Self::DateTimeRange | Self::List | Self::Map)
    }

    /// Kinds an attribute slot may hold (associated data also allows
    /// `List` and `Map`).
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::List | Self::Map)
    }
}

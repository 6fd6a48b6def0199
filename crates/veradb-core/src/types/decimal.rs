use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign};
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};

///
/// Decimal
///
/// Exact decimal amount used for prices, tax rates, and decimal
/// attributes. Wraps `rust_decimal` so the rest of the engine never
/// touches floating point.
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Sub,
    SubAssign,
)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    /// Construct a decimal from mantissa and scale.
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    /// Overflow-checked addition.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<i8> for Decimal {
    fn from(v: i8) -> Self {
        Self(WrappedDecimal::from(v))
    }
}

impl From<i16> for Decimal {
    fn from(v: i16) -> Self {
        Self(WrappedDecimal::from(v))
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Self(WrappedDecimal::from(v))
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self(WrappedDecimal::from(v))
    }
}

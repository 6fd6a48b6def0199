use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Version
///
/// Monotone change counter carried by every versioned object. The first
/// accepted write produces `Version::INITIAL`; every later accepted
/// change produces `next()`. A no-op keeps the version untouched, which
/// is what makes replayed batches idempotent.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Version(u32);

impl Version {
    pub const INITIAL: Self = Self(1);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The version the next accepted change must carry.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

use crate::{key::AttributeKey, value::Value, version::Version};
use serde::{Deserialize, Serialize};

///
/// AttributeValue
///
/// One versioned attribute slot. A remove never deletes the slot; it
/// produces the next version with `dropped = true` so replay history is
/// preserved. A later upsert resurrects the slot at the next version.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AttributeValue {
    pub version: Version,
    pub key: AttributeKey,
    pub value: Value,
    pub dropped: bool,
}

impl AttributeValue {
    /// A fresh slot at the initial version.
    #[must_use]
    pub const fn new(key: AttributeKey, value: Value) -> Self {
        Self {
            version: Version::INITIAL,
            key,
            value,
            dropped: false,
        }
    }

    /// The next version of this slot carrying `value`.
    #[must_use]
    pub fn replaced(&self, value: Value) -> Self {
        Self {
            version: self.version.next(),
            key: self.key.clone(),
            value,
            dropped: false,
        }
    }

    /// The next version of this slot, tombstoned.
    #[must_use]
    pub fn tombstoned(&self) -> Self {
        Self {
            version: self.version.next(),
            key: self.key.clone(),
            value: self.value.clone(),
            dropped: true,
        }
    }
}

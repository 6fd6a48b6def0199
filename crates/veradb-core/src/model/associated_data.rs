use crate::{key::AssociatedDataKey, value::Value, version::Version};
use serde::{Deserialize, Serialize};

///
/// AssociatedDataValue
///
/// One versioned associated-data document. Unlike attributes the value
/// may be a scalar, an ordered list, or a string-keyed map, nested
/// recursively. Version and tombstone discipline match
/// [`AttributeValue`](crate::model::AttributeValue).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssociatedDataValue {
    pub version: Version,
    pub key: AssociatedDataKey,
    pub value: Value,
    pub dropped: bool,
}

impl AssociatedDataValue {
    #[must_use]
    pub const fn new(key: AssociatedDataKey, value: Value) -> Self {
        Self {
            version: Version::INITIAL,
            key,
            value,
            dropped: false,
        }
    }

    #[must_use]
    pub fn replaced(&self, value: Value) -> Self {
        Self {
            version: self.version.next(),
            key: self.key.clone(),
            value,
            dropped: false,
        }
    }

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

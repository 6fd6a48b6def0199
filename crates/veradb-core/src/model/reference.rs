use crate::{
    key::{AttributeKey, ReferenceKey},
    model::AttributeValue,
    version::Version,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Cardinality
///
/// Fixed at reference creation; never changed by local mutations.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum Cardinality {
    ExactlyOne,
    OneOrMore,
    #[default]
    ZeroOrMore,
    ZeroOrOne,
}

///
/// ReferenceGroup
///
/// Optional grouping of a reference target. Versioned and tombstoned
/// independently of the owning reference.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReferenceGroup {
    pub version: Version,
    pub group_type: Option<String>,
    pub primary_key: u32,
    pub dropped: bool,
}

impl ReferenceGroup {
    #[must_use]
    pub const fn new(group_type: Option<String>, primary_key: u32) -> Self {
        Self {
            version: Version::INITIAL,
            group_type,
            primary_key,
            dropped: false,
        }
    }
}

///
/// Reference
///
/// One versioned relation to another entity, optionally carrying its
/// own attribute set validated against the reference schema.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Reference {
    pub version: Version,
    pub key: ReferenceKey,
    pub cardinality: Cardinality,
    pub referenced_entity_type: String,
    pub group: Option<ReferenceGroup>,
    pub attributes: BTreeMap<AttributeKey, AttributeValue>,
    pub dropped: bool,
}

impl Reference {
    #[must_use]
    pub fn new(
        key: ReferenceKey,
        cardinality: Cardinality,
        referenced_entity_type: impl Into<String>,
    ) -> Self {
        Self {
            version: Version::INITIAL,
            key,
            cardinality,
            referenced_entity_type: referenced_entity_type.into(),
            group: None,
            attributes: BTreeMap::new(),
            dropped: false,
        }
    }

    /// The group, if set and not tombstoned.
    #[must_use]
    pub fn active_group(&self) -> Option<&ReferenceGroup> {
        self.group.as_ref().filter(|group| !group.dropped)
    }

    #[must_use]
    pub fn tombstoned(&self) -> Self {
        Self {
            version: self.version.next(),
            dropped: true,
            ..self.clone()
        }
    }
}

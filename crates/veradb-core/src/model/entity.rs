use crate::{
    key::{AssociatedDataKey, AttributeKey, ReferenceKey},
    model::{AssociatedDataValue, AttributeValue, PriceCollection, Reference},
    types::Locale,
    version::Version,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

///
/// Entity
///
/// One immutable versioned document snapshot. Snapshots are only ever
/// produced by replaying a mutation batch against the previous snapshot
/// (or against nothing, for a new entity); unchanged children are shared
/// between versions by value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entity {
    pub entity_type: String,
    pub primary_key: Option<u32>,
    pub version: Version,
    pub parent: Option<u32>,
    pub attributes: BTreeMap<AttributeKey, AttributeValue>,
    pub associated_data: BTreeMap<AssociatedDataKey, AssociatedDataValue>,
    pub prices: PriceCollection,
    pub references: BTreeMap<ReferenceKey, Reference>,
    pub locales: BTreeSet<Locale>,
    pub dropped: bool,
}

impl Entity {
    /// Empty snapshot for an entity that does not exist yet.
    #[must_use]
    pub fn new(entity_type: impl Into<String>, primary_key: Option<u32>) -> Self {
        Self {
            entity_type: entity_type.into(),
            primary_key,
            version: Version::INITIAL,
            parent: None,
            attributes: BTreeMap::new(),
            associated_data: BTreeMap::new(),
            prices: PriceCollection::default(),
            references: BTreeMap::new(),
            locales: BTreeSet::new(),
            dropped: false,
        }
    }

    /// Locales used by live localized attributes and associated data.
    ///
    /// The stored `locales` set is always recomputed from this after a
    /// batch is replayed.
    #[must_use]
    pub fn collect_locales(&self) -> BTreeSet<Locale> {
        let attribute_locales = self
            .attributes
            .values()
            .filter(|v| !v.dropped)
            .filter_map(|v| v.key.locale.clone());

        let associated_data_locales = self
            .associated_data
            .values()
            .filter(|v| !v.dropped)
            .filter_map(|v| v.key.locale.clone());

        attribute_locales.chain(associated_data_locales).collect()
    }

    /// Live attribute values, reference attributes excluded.
    pub fn active_attributes(&self) -> impl Iterator<Item = &AttributeValue> {
        self.attributes.values().filter(|v| !v.dropped)
    }

    /// Live associated-data values.
    pub fn active_associated_data(&self) -> impl Iterator<Item = &AssociatedDataValue> {
        self.associated_data.values().filter(|v| !v.dropped)
    }

    /// Live references.
    pub fn active_references(&self) -> impl Iterator<Item = &Reference> {
        self.references.values().filter(|r| !r.dropped)
    }
}

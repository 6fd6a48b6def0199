use crate::{
    key::PriceKey,
    types::{DateTimeRange, Decimal},
    version::Version,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// PriceInnerRecordHandling
///
/// How prices sharing an inner record id aggregate into one selling
/// price. Lives on the whole price collection, not on single prices.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum PriceInnerRecordHandling {
    LowestPrice,
    #[default]
    None,
    Sum,
    Unknown,
}

///
/// Price
///
/// One versioned price. Amounts are exact decimals; the optional
/// validity interval constrains when the price applies.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Price {
    pub version: Version,
    pub key: PriceKey,
    pub inner_record_id: Option<u32>,
    pub price_without_tax: Decimal,
    pub tax_rate: Decimal,
    pub price_with_tax: Decimal,
    pub validity: Option<DateTimeRange>,
    pub sellable: bool,
    pub dropped: bool,
}

impl Price {
    /// True when the business payload differs from `other`, ignoring
    /// version and tombstone state. Upserts use this to detect no-ops.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.inner_record_id != other.inner_record_id
            || self.price_without_tax != other.price_without_tax
            || self.tax_rate != other.tax_rate
            || self.price_with_tax != other.price_with_tax
            || self.validity != other.validity
            || self.sellable != other.sellable
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

///
/// PriceCollection
///
/// The whole versioned price sub-object of an entity. The inner-record
/// handling mode is collection-level state; switching it bumps only the
/// collection version, never the prices inside.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PriceCollection {
    pub version: Version,
    pub handling: PriceInnerRecordHandling,
    pub prices: BTreeMap<PriceKey, Price>,
}

impl PriceCollection {
    #[must_use]
    pub fn get(&self, key: &PriceKey) -> Option<&Price> {
        self.prices.get(key)
    }

    /// Live (non-tombstoned) prices.
    pub fn active(&self) -> impl Iterator<Item = &Price> {
        self.prices.values().filter(|price| !price.dropped)
    }
}

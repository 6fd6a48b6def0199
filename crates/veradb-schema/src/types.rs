use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// EvolutionMode
///
/// Named permission controlling whether an unknown element may be
/// auto-added to an entity schema by a local mutation, instead of the
/// mutation being rejected.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[remain::sorted]
pub enum EvolutionMode {
    AdaptPrimaryKeyGeneration,
    AddingAssociatedData,
    AddingAttributes,
    AddingCurrencies,
    AddingHierarchy,
    AddingLocales,
    AddingPrices,
    AddingReferences,
}

impl EvolutionMode {
    /// Every mode, the trusted default of a freshly created schema.
    #[must_use]
    pub fn all() -> BTreeSet<Self> {
        BTreeSet::from([
            Self::AdaptPrimaryKeyGeneration,
            Self::AddingAssociatedData,
            Self::AddingAttributes,
            Self::AddingCurrencies,
            Self::AddingHierarchy,
            Self::AddingLocales,
            Self::AddingPrices,
            Self::AddingReferences,
        ])
    }
}

///
/// CatalogEvolutionMode
///
/// Catalog-level counterpart of [`EvolutionMode`]; gates creating entity
/// schemas on first use.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub enum CatalogEvolutionMode {
    AddingEntitySchemas,
}

///
/// OrderDirection
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// OrderBehaviour
///
/// Where rows missing the compound element sort.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum OrderBehaviour {
    #[default]
    NullsLast,
    NullsFirst,
}

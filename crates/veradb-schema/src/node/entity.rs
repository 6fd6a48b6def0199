use crate::{
    node::{
        AssociatedDataSchema, AttributeSchema, NameVariants, ReferenceSchema,
        SortableAttributeCompoundSchema,
    },
    types::EvolutionMode,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use veradb_core::{
    types::{Currency, Locale},
    version::Version,
};

///
/// EntitySchema
///
/// The contract one entity type must satisfy. Immutable once returned;
/// every accepted schema mutation produces a new snapshot at the next
/// version.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntitySchema {
    pub version: Version,
    pub name: String,
    pub name_variants: NameVariants,
    pub description: Option<String>,
    pub deprecation_notice: Option<String>,
    pub with_generated_primary_key: bool,
    pub with_hierarchy: bool,
    pub with_price: bool,
    pub indexed_price_places: u8,
    pub locales: BTreeSet<Locale>,
    pub currencies: BTreeSet<Currency>,
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub associated_data: BTreeMap<String, AssociatedDataSchema>,
    pub references: BTreeMap<String, ReferenceSchema>,
    pub sortable_attribute_compounds: BTreeMap<String, SortableAttributeCompoundSchema>,
    pub evolution_modes: BTreeSet<EvolutionMode>,
}

impl EntitySchema {
    /// Fresh schema with every evolution mode allowed, mirroring the
    /// trusted-mode default for newly encountered entity types.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name_variants = NameVariants::from_ident(&name);

        Self {
            version: Version::INITIAL,
            name,
            name_variants,
            description: None,
            deprecation_notice: None,
            with_generated_primary_key: true,
            with_hierarchy: false,
            with_price: false,
            indexed_price_places: 2,
            locales: BTreeSet::new(),
            currencies: BTreeSet::new(),
            attributes: BTreeMap::new(),
            associated_data: BTreeMap::new(),
            references: BTreeMap::new(),
            sortable_attribute_compounds: BTreeMap::new(),
            evolution_modes: EvolutionMode::all(),
        }
    }

    #[must_use]
    pub fn allows(&self, mode: EvolutionMode) -> bool {
        self.evolution_modes.contains(&mode)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn associated_data_schema(&self, name: &str) -> Option<&AssociatedDataSchema> {
        self.associated_data.get(name)
    }

    #[must_use]
    pub fn reference(&self, name: &str) -> Option<&ReferenceSchema> {
        self.references.get(name)
    }

    #[must_use]
    pub fn supports_locale(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    #[must_use]
    pub fn supports_currency(&self, currency: &Currency) -> bool {
        self.currencies.contains(currency)
    }

    /// Clone at the next version; every accepted change goes through
    /// this exactly once.
    #[must_use]
    pub fn bumped(&self) -> Self {
        Self {
            version: self.version.next(),
            ..self.clone()
        }
    }
}

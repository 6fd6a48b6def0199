use crate::node::{AttributeSchema, EntitySchema, NameVariants};
use crate::types::CatalogEvolutionMode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use veradb_core::version::Version;

///
/// CatalogSchema
///
/// Container of entity schemas plus catalog-level (global) attributes.
/// Entity schemas are looked up through it by name, never embedded by
/// value anywhere else.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CatalogSchema {
    pub version: Version,
    pub name: String,
    pub name_variants: NameVariants,
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub entity_schemas: BTreeMap<String, EntitySchema>,
    pub evolution_modes: BTreeSet<CatalogEvolutionMode>,
}

impl CatalogSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name_variants = NameVariants::from_ident(&name);

        Self {
            version: Version::INITIAL,
            name,
            name_variants,
            attributes: BTreeMap::new(),
            entity_schemas: BTreeMap::new(),
            evolution_modes: BTreeSet::from([CatalogEvolutionMode::AddingEntitySchemas]),
        }
    }

    #[must_use]
    pub fn entity_schema(&self, name: &str) -> Option<&EntitySchema> {
        self.entity_schemas.get(name)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn allows(&self, mode: CatalogEvolutionMode) -> bool {
        self.evolution_modes.contains(&mode)
    }

    /// Clone at the next version.
    #[must_use]
    pub fn bumped(&self) -> Self {
        Self {
            version: self.version.next(),
            ..self.clone()
        }
    }
}
